pub mod actions;
pub mod error;
pub mod schema;
pub mod toolkit;

pub mod farcaster;
pub mod twitter;
pub mod wallet;

pub mod defi_actions;
pub mod farcaster_actions;
pub mod twitter_actions;
pub mod wallet_actions;

pub use actions::{Action, ActionExample, ActionMetadata, ActionRegistry};
pub use error::ConfigError;
pub use schema::{FieldKind, FieldSpec, InputSchema, ValidatedArgs, ValidationError};
pub use toolkit::{ActionTool, InvokeError, Toolkit, ToolkitError};

pub use farcaster::NeynarFarcaster;
pub use twitter::TwitterApi;
pub use wallet::HostedWallet;

pub use defi_actions::register_defi_actions;
pub use farcaster_actions::register_farcaster_actions;
pub use twitter_actions::register_twitter_actions;
pub use wallet_actions::register_wallet_actions;

pub use agent_actions_farcaster::FarcasterOperations;
pub use agent_actions_twitter::TwitterOperations;
pub use agent_actions_wallet::{
    DeployedContract, TradeResult, TransactionReceipt, WalletOperations,
};

use std::sync::Arc;

/// Convenience helper: every wallet and DeFi action bound to one wallet.
/// As more onchain domains are added, extend this to register their actions
/// as well.
pub fn wallet_toolkit(
    wallet: Arc<dyn WalletOperations>,
) -> Result<Toolkit<dyn WalletOperations>, ToolkitError> {
    let mut registry = ActionRegistry::new();
    register_wallet_actions(&mut registry);
    register_defi_actions(&mut registry);
    Toolkit::build(wallet, &registry)
}

/// Convenience helper: every Twitter action bound to one client.
pub fn twitter_toolkit(
    twitter: Arc<dyn TwitterOperations>,
) -> Result<Toolkit<dyn TwitterOperations>, ToolkitError> {
    let mut registry = ActionRegistry::new();
    register_twitter_actions(&mut registry);
    Toolkit::build(twitter, &registry)
}

/// Convenience helper: every Farcaster action bound to one client.
pub fn farcaster_toolkit(
    farcaster: Arc<dyn FarcasterOperations>,
) -> Result<Toolkit<dyn FarcasterOperations>, ToolkitError> {
    let mut registry = ActionRegistry::new();
    register_farcaster_actions(&mut registry);
    Toolkit::build(farcaster, &registry)
}

// plugins/wallet/src/lib.rs
use async_trait::async_trait;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Receipt for a transaction the wallet service signed and broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    pub transaction_hash: String,
    pub transaction_link: String,
}

/// Outcome of a swap: how much of the target asset came back, plus the
/// receipt of the transaction that performed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeResult {
    pub to_amount: String,
    pub transaction_hash: String,
    pub transaction_link: String,
}

/// A freshly deployed contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployedContract {
    pub contract_address: String,
    pub transaction_link: String,
}

/// Everything an onchain action needs from a wallet.
///
/// Amounts are strings holding whole numbers of atomic units (wei for ETH).
/// Implementations sign and broadcast however they like; callers only see
/// receipts.
#[async_trait]
pub trait WalletOperations: Send + Sync {
    /// Default address of the wallet, as a 0x-prefixed hex string.
    fn address(&self) -> String;

    /// Network the wallet is connected to, e.g. `base-mainnet`.
    fn network_id(&self) -> String;

    /// Balance of `asset_id` held by the default address, in atomic units.
    async fn balance(&self, asset_id: &str) -> Result<String>;

    /// Move `amount` of `asset_id` to `destination`.
    async fn transfer(
        &self,
        amount: &str,
        asset_id: &str,
        destination: &str,
        gasless: bool,
    ) -> Result<TransactionReceipt>;

    /// Swap `amount` of `from_asset_id` into `to_asset_id`.
    async fn trade(
        &self,
        amount: &str,
        from_asset_id: &str,
        to_asset_id: &str,
    ) -> Result<TradeResult>;

    /// Ask the testnet faucet for funds. `None` requests the native asset.
    /// Returns a link to the faucet transaction.
    async fn request_faucet(&self, asset_id: Option<&str>) -> Result<String>;

    /// Deploy an ERC-20 with the given name, symbol and total supply.
    async fn deploy_token(
        &self,
        name: &str,
        symbol: &str,
        total_supply: &str,
    ) -> Result<DeployedContract>;

    /// Call a state-changing contract method. `value` optionally attaches
    /// native funds to the call, in atomic units.
    async fn invoke_contract(
        &self,
        contract_address: &str,
        method: &str,
        args: Value,
        value: Option<&str>,
    ) -> Result<TransactionReceipt>;

    /// Call a read-only contract method and return its decoded result.
    async fn read_contract(&self, contract_address: &str, method: &str, args: Value)
        -> Result<Value>;
}

//! Core wallet actions.
//!
//! Includes:
//! - wallet details and balances
//! - transfers and trades
//! - faucet funds on testnets
//! - token deployment and ETH wrapping

use async_trait::async_trait;
use anyhow::Result;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::actions::{Action, ActionExample, ActionMetadata, ActionRegistry};
use crate::schema::{FieldKind, FieldSpec, InputSchema};
use agent_actions_wallet::WalletOperations;

/// Canonical WETH deposit contract on Base.
pub const WETH_ADDRESS: &str = "0x4200000000000000000000000000000000000006";

// =============================================================================
// get_wallet_details - Which wallet is this agent driving?
// =============================================================================

#[derive(Debug)]
pub struct GetWalletDetailsAction {
    meta: ActionMetadata,
}

impl GetWalletDetailsAction {
    pub fn new() -> Self {
        let examples = vec![ActionExample {
            input: json!({}),
            output: json!(
                "Wallet on network base-sepolia with default address 0x036CbD53842c5426634e7929541eC2318f3dCF7e"
            ),
            explanation: "Report the wallet's network and default address.".to_string(),
        }];

        let meta = ActionMetadata::new(
            "get_wallet_details",
            "getting wallet details",
            "Get details about the agent's wallet: the network it is connected to and its default address. Takes no inputs.",
        )
        .with_schema(InputSchema::new())
        .with_examples(examples);

        Self { meta }
    }
}

#[async_trait]
impl Action<dyn WalletOperations> for GetWalletDetailsAction {
    fn metadata(&self) -> &ActionMetadata {
        &self.meta
    }

    async fn call(&self, wallet: &dyn WalletOperations, _input: Value) -> Result<String> {
        Ok(format!(
            "Wallet on network {} with default address {}",
            wallet.network_id(),
            wallet.address(),
        ))
    }
}

// =============================================================================
// get_balance - Balance of one asset held by the wallet
// =============================================================================

#[derive(Debug)]
pub struct GetBalanceAction {
    meta: ActionMetadata,
}

impl GetBalanceAction {
    pub fn new() -> Self {
        let input_schema = InputSchema::new().field(FieldSpec::required(
            "asset_id",
            FieldKind::String,
            "The asset ID to get the balance for, e.g. `eth` or `usdc`",
        ));

        let examples = vec![ActionExample {
            input: json!({ "asset_id": "eth" }),
            output: json!(
                "Balance for eth in wallet 0x036CbD53842c5426634e7929541eC2318f3dCF7e: 1500000000000000000"
            ),
            explanation: "Report the wallet's ETH balance in atomic units (wei).".to_string(),
        }];

        let meta = ActionMetadata::new(
            "get_balance",
            "getting balance",
            "Get the balance of a specific asset in the agent's wallet. Provide the asset ID, e.g. `eth` or `usdc`. Balances come back in atomic units of the asset.",
        )
        .with_schema(input_schema)
        .with_examples(examples);

        Self { meta }
    }
}

#[async_trait]
impl Action<dyn WalletOperations> for GetBalanceAction {
    fn metadata(&self) -> &ActionMetadata {
        &self.meta
    }

    async fn call(&self, wallet: &dyn WalletOperations, input: Value) -> Result<String> {
        #[derive(Deserialize)]
        struct Input {
            asset_id: String,
        }

        let parsed: Input = serde_json::from_value(input)?;
        let balance = wallet.balance(&parsed.asset_id).await?;

        Ok(format!(
            "Balance for {} in wallet {}: {balance}",
            parsed.asset_id,
            wallet.address(),
        ))
    }
}

// =============================================================================
// transfer - Move an asset to another address
// =============================================================================

#[derive(Debug)]
pub struct TransferAction {
    meta: ActionMetadata,
}

impl TransferAction {
    pub fn new() -> Self {
        let input_schema = InputSchema::new()
            .field(FieldSpec::required(
                "amount",
                FieldKind::Amount,
                "The amount of the asset to transfer, in atomic units",
            ))
            .field(FieldSpec::required(
                "asset_id",
                FieldKind::String,
                "The asset ID to transfer, e.g. `eth` or `usdc`",
            ))
            .field(FieldSpec::required(
                "destination",
                FieldKind::Address,
                "The address to transfer the funds to",
            ))
            .field(
                FieldSpec::optional(
                    "gasless",
                    FieldKind::Boolean,
                    "Whether to attempt a gasless transfer; supported for usdc on mainnet networks",
                )
                .with_default(json!(false)),
            );

        let examples = vec![ActionExample {
            input: json!({
                "amount": "1000000",
                "asset_id": "usdc",
                "destination": "0x4200000000000000000000000000000000000006",
            }),
            output: json!(
                "Transferred 1000000 of usdc to 0x4200000000000000000000000000000000000006.\nTransaction hash: 0xabc\nTransaction link: https://sepolia.basescan.org/tx/0xabc"
            ),
            explanation: "Send one USDC (six decimals) to the given address.".to_string(),
        }];

        let meta = ActionMetadata::new(
            "transfer",
            "transferring the asset",
            "Transfer an asset from the agent's wallet to another onchain address. Amounts are whole numbers of atomic units, so 1 USDC is `1000000`.",
        )
        .with_schema(input_schema)
        .with_examples(examples);

        Self { meta }
    }
}

#[async_trait]
impl Action<dyn WalletOperations> for TransferAction {
    fn metadata(&self) -> &ActionMetadata {
        &self.meta
    }

    async fn call(&self, wallet: &dyn WalletOperations, input: Value) -> Result<String> {
        #[derive(Deserialize)]
        struct Input {
            amount: String,
            asset_id: String,
            destination: String,
            gasless: bool,
        }

        let parsed: Input = serde_json::from_value(input)?;
        let receipt = wallet
            .transfer(
                &parsed.amount,
                &parsed.asset_id,
                &parsed.destination,
                parsed.gasless,
            )
            .await?;

        Ok(format!(
            "Transferred {} of {} to {}.\nTransaction hash: {}\nTransaction link: {}",
            parsed.amount,
            parsed.asset_id,
            parsed.destination,
            receipt.transaction_hash,
            receipt.transaction_link,
        ))
    }
}

// =============================================================================
// trade - Swap one asset for another
// =============================================================================

#[derive(Debug)]
pub struct TradeAction {
    meta: ActionMetadata,
}

impl TradeAction {
    pub fn new() -> Self {
        let input_schema = InputSchema::new()
            .field(FieldSpec::required(
                "amount",
                FieldKind::Amount,
                "The amount of the from asset to trade, in atomic units",
            ))
            .field(FieldSpec::required(
                "from_asset_id",
                FieldKind::String,
                "The asset ID to trade out of",
            ))
            .field(FieldSpec::required(
                "to_asset_id",
                FieldKind::String,
                "The asset ID to receive",
            ));

        let examples = vec![ActionExample {
            input: json!({
                "amount": "1000000000000000000",
                "from_asset_id": "eth",
                "to_asset_id": "usdc",
            }),
            output: json!(
                "Traded 1000000000000000000 of eth for 3200000000 of usdc.\nTransaction hash: 0xdef\nTransaction link: https://basescan.org/tx/0xdef"
            ),
            explanation: "Swap one ETH into USDC at the market rate.".to_string(),
        }];

        let meta = ActionMetadata::new(
            "trade",
            "trading assets",
            "Trade a specified amount of one asset for another. Trades are only supported on mainnet networks.",
        )
        .with_schema(input_schema)
        .with_examples(examples);

        Self { meta }
    }
}

#[async_trait]
impl Action<dyn WalletOperations> for TradeAction {
    fn metadata(&self) -> &ActionMetadata {
        &self.meta
    }

    async fn call(&self, wallet: &dyn WalletOperations, input: Value) -> Result<String> {
        #[derive(Deserialize)]
        struct Input {
            amount: String,
            from_asset_id: String,
            to_asset_id: String,
        }

        let parsed: Input = serde_json::from_value(input)?;
        let trade = wallet
            .trade(&parsed.amount, &parsed.from_asset_id, &parsed.to_asset_id)
            .await?;

        Ok(format!(
            "Traded {} of {} for {} of {}.\nTransaction hash: {}\nTransaction link: {}",
            parsed.amount,
            parsed.from_asset_id,
            trade.to_amount,
            parsed.to_asset_id,
            trade.transaction_hash,
            trade.transaction_link,
        ))
    }
}

// =============================================================================
// request_faucet_funds - Testnet faucet
// =============================================================================

#[derive(Debug)]
pub struct RequestFaucetFundsAction {
    meta: ActionMetadata,
}

impl RequestFaucetFundsAction {
    pub fn new() -> Self {
        let input_schema = InputSchema::new().field(FieldSpec::optional(
            "asset_id",
            FieldKind::String,
            "The asset ID to request from the faucet; omit for the network's native asset",
        ));

        let examples = vec![ActionExample {
            input: json!({}),
            output: json!(
                "Received eth from the faucet.\nTransaction link: https://sepolia.basescan.org/tx/0xfaucet"
            ),
            explanation: "Request testnet ETH when no asset is given.".to_string(),
        }];

        let meta = ActionMetadata::new(
            "request_faucet_funds",
            "requesting faucet funds",
            "Request test funds from the faucet. Only works on testnet networks. If no asset ID is provided, the network's native asset is requested.",
        )
        .with_schema(input_schema)
        .with_examples(examples);

        Self { meta }
    }
}

#[async_trait]
impl Action<dyn WalletOperations> for RequestFaucetFundsAction {
    fn metadata(&self) -> &ActionMetadata {
        &self.meta
    }

    async fn call(&self, wallet: &dyn WalletOperations, input: Value) -> Result<String> {
        #[derive(Deserialize)]
        struct Input {
            #[serde(default)]
            asset_id: Option<String>,
        }

        let parsed: Input = serde_json::from_value(input)?;
        let link = wallet.request_faucet(parsed.asset_id.as_deref()).await?;
        let asset = parsed.asset_id.unwrap_or_else(|| "eth".to_string());

        Ok(format!(
            "Received {asset} from the faucet.\nTransaction link: {link}"
        ))
    }
}

// =============================================================================
// deploy_token - Deploy an ERC-20
// =============================================================================

#[derive(Debug)]
pub struct DeployTokenAction {
    meta: ActionMetadata,
}

impl DeployTokenAction {
    pub fn new() -> Self {
        let input_schema = InputSchema::new()
            .field(FieldSpec::required(
                "name",
                FieldKind::String,
                "The display name of the token, e.g. `My Token`",
            ))
            .field(FieldSpec::required(
                "symbol",
                FieldKind::String,
                "The ticker symbol of the token, e.g. `MTK`",
            ))
            .field(FieldSpec::required(
                "total_supply",
                FieldKind::Amount,
                "The total supply to mint, in atomic units",
            ));

        let examples = vec![ActionExample {
            input: json!({
                "name": "My Token",
                "symbol": "MTK",
                "total_supply": "1000000000000000000000000",
            }),
            output: json!(
                "Deployed token My Token (MTK) with total supply 1000000000000000000000000.\nContract address: 0x036CbD53842c5426634e7929541eC2318f3dCF7e\nTransaction link: https://basescan.org/tx/0xabc"
            ),
            explanation: "Deploy a million-token supply with 18 decimals.".to_string(),
        }];

        let meta = ActionMetadata::new(
            "deploy_token",
            "deploying token",
            "Deploy an ERC-20 token contract from the agent's wallet, with the given name, symbol and total supply. The supply is minted to the wallet's default address.",
        )
        .with_schema(input_schema)
        .with_examples(examples);

        Self { meta }
    }
}

#[async_trait]
impl Action<dyn WalletOperations> for DeployTokenAction {
    fn metadata(&self) -> &ActionMetadata {
        &self.meta
    }

    async fn call(&self, wallet: &dyn WalletOperations, input: Value) -> Result<String> {
        #[derive(Deserialize)]
        struct Input {
            name: String,
            symbol: String,
            total_supply: String,
        }

        let parsed: Input = serde_json::from_value(input)?;
        let contract = wallet
            .deploy_token(&parsed.name, &parsed.symbol, &parsed.total_supply)
            .await?;

        Ok(format!(
            "Deployed token {} ({}) with total supply {}.\nContract address: {}\nTransaction link: {}",
            parsed.name,
            parsed.symbol,
            parsed.total_supply,
            contract.contract_address,
            contract.transaction_link,
        ))
    }
}

// =============================================================================
// wrap_eth - ETH into WETH via the deposit contract
// =============================================================================

#[derive(Debug)]
pub struct WrapEthAction {
    meta: ActionMetadata,
}

impl WrapEthAction {
    pub fn new() -> Self {
        let input_schema = InputSchema::new().field(FieldSpec::required(
            "amount_to_wrap",
            FieldKind::Amount,
            "The amount of ETH to wrap, in wei",
        ));

        let examples = vec![ActionExample {
            input: json!({ "amount_to_wrap": "100000000000000000" }),
            output: json!(
                "Wrapped 100000000000000000 wei of ETH into WETH.\nTransaction hash: 0xabc\nTransaction link: https://basescan.org/tx/0xabc"
            ),
            explanation: "Wrap a tenth of an ETH.".to_string(),
        }];

        let meta = ActionMetadata::new(
            "wrap_eth",
            "wrapping ETH",
            "Wrap ETH into WETH by depositing into the canonical WETH contract. The amount is in wei.",
        )
        .with_schema(input_schema)
        .with_examples(examples);

        Self { meta }
    }
}

#[async_trait]
impl Action<dyn WalletOperations> for WrapEthAction {
    fn metadata(&self) -> &ActionMetadata {
        &self.meta
    }

    async fn call(&self, wallet: &dyn WalletOperations, input: Value) -> Result<String> {
        #[derive(Deserialize)]
        struct Input {
            amount_to_wrap: String,
        }

        let parsed: Input = serde_json::from_value(input)?;
        let receipt = wallet
            .invoke_contract(
                WETH_ADDRESS,
                "deposit",
                json!({}),
                Some(&parsed.amount_to_wrap),
            )
            .await?;

        Ok(format!(
            "Wrapped {} wei of ETH into WETH.\nTransaction hash: {}\nTransaction link: {}",
            parsed.amount_to_wrap, receipt.transaction_hash, receipt.transaction_link,
        ))
    }
}

// =============================================================================
// Register wallet actions
// =============================================================================

pub fn register_wallet_actions(registry: &mut ActionRegistry<dyn WalletOperations>) {
    registry.register(GetWalletDetailsAction::new());
    registry.register(GetBalanceAction::new());
    registry.register(TransferAction::new());
    registry.register(TradeAction::new());
    registry.register(RequestFaucetFundsAction::new());
    registry.register(DeployTokenAction::new());
    registry.register(WrapEthAction::new());
}

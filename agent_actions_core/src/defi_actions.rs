//! DeFi protocol actions.
//!
//! Includes:
//! - Morpho vault deposits and withdrawals
//! - Compound supply, borrow, repay and withdraw
//! - Uniswap v3 pool creation
//! - Pyth price feed lookups via Hermes

use async_trait::async_trait;
use anyhow::{anyhow, Result};
use bigdecimal::{num_bigint::BigInt, BigDecimal};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::actions::{Action, ActionExample, ActionMetadata, ActionRegistry};
use crate::schema::{FieldKind, FieldSpec, InputSchema};
use agent_actions_wallet::WalletOperations;

/// Compound's USDC Comet market on Base.
const COMPOUND_COMET_ADDRESS: &str = "0xb125E6687d4313864e53df431d5425969c15Eb2F";
/// Uniswap v3 factory on Base.
const UNISWAP_V3_FACTORY_ADDRESS: &str = "0x33128a8fC17869897dcE68Ed026d694621f6FDfD";
const PYTH_HERMES_URL: &str = "https://hermes.pyth.network";

const COMPOUND_COLLATERAL_ASSETS: &[&str] = &["weth", "cbeth", "cbbtc", "wsteth", "usdc"];
const COMPOUND_BASE_ASSETS: &[&str] = &["weth", "usdc"];
const UNISWAP_FEE_TIERS: &[&str] = &["100", "500", "3000", "10000"];

fn asset_address(asset_id: &str) -> Result<&'static str> {
    Ok(match asset_id {
        "weth" => "0x4200000000000000000000000000000000000006",
        "cbeth" => "0x2Ae3F1Ec7F1F5012CFEab0185bfc7aa3cf0DEc22",
        "cbbtc" => "0xcbB7C0000aB88B473b1f5aFd9ef808440eed33Bf",
        "wsteth" => "0xc1CBa3fCea344f92D9239c08C0568f6F2F0ee452",
        "usdc" => "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913",
        other => return Err(anyhow!("no known address for asset `{other}`")),
    })
}

/// ERC-20 approve so `spender` can pull `value` from the wallet.
async fn approve(
    wallet: &dyn WalletOperations,
    token_address: &str,
    spender: &str,
    value: &str,
) -> Result<()> {
    wallet
        .invoke_contract(
            token_address,
            "approve",
            json!({ "spender": spender, "value": value }),
            None,
        )
        .await?;
    Ok(())
}

// =============================================================================
// morpho_deposit - Deposit assets into a Morpho vault
// =============================================================================

#[derive(Debug)]
pub struct MorphoDepositAction {
    meta: ActionMetadata,
}

impl MorphoDepositAction {
    pub fn new() -> Self {
        let input_schema = InputSchema::new()
            .field(FieldSpec::required(
                "vault_address",
                FieldKind::Address,
                "The address of the Morpho vault to deposit into",
            ))
            .field(FieldSpec::required(
                "assets",
                FieldKind::Amount,
                "The amount of the underlying token to deposit, in atomic units",
            ))
            .field(FieldSpec::required(
                "receiver",
                FieldKind::Address,
                "The address that receives the vault shares",
            ))
            .field(FieldSpec::required(
                "token_address",
                FieldKind::Address,
                "The address of the underlying token the vault accepts",
            ));

        let examples = vec![ActionExample {
            input: json!({
                "vault_address": "0xA0E430870c4604CcfC7B38Ca7845B1FF653D0ff1",
                "assets": "1000000",
                "receiver": "0x036CbD53842c5426634e7929541eC2318f3dCF7e",
                "token_address": "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913",
            }),
            output: json!(
                "Deposited 1000000 atomic units into Morpho vault 0xA0E430870c4604CcfC7B38Ca7845B1FF653D0ff1.\nTransaction hash: 0xabc\nTransaction link: https://basescan.org/tx/0xabc"
            ),
            explanation: "Deposit one USDC into a Morpho vault.".to_string(),
        }];

        let meta = ActionMetadata::new(
            "morpho_deposit",
            "depositing to Morpho Vault",
            "Deposit assets into a Morpho vault. Approves the vault to spend the underlying token, then deposits. Amounts are whole numbers of atomic units.",
        )
        .with_schema(input_schema)
        .with_examples(examples);

        Self { meta }
    }
}

#[async_trait]
impl Action<dyn WalletOperations> for MorphoDepositAction {
    fn metadata(&self) -> &ActionMetadata {
        &self.meta
    }

    async fn call(&self, wallet: &dyn WalletOperations, input: Value) -> Result<String> {
        #[derive(Deserialize)]
        struct Input {
            vault_address: String,
            assets: String,
            receiver: String,
            token_address: String,
        }

        let parsed: Input = serde_json::from_value(input)?;
        approve(wallet, &parsed.token_address, &parsed.vault_address, &parsed.assets).await?;
        let receipt = wallet
            .invoke_contract(
                &parsed.vault_address,
                "deposit",
                json!({ "assets": parsed.assets, "receiver": parsed.receiver }),
                None,
            )
            .await?;

        Ok(format!(
            "Deposited {} atomic units into Morpho vault {}.\nTransaction hash: {}\nTransaction link: {}",
            parsed.assets, parsed.vault_address, receipt.transaction_hash, receipt.transaction_link,
        ))
    }
}

// =============================================================================
// morpho_withdraw - Withdraw assets from a Morpho vault
// =============================================================================

#[derive(Debug)]
pub struct MorphoWithdrawAction {
    meta: ActionMetadata,
}

impl MorphoWithdrawAction {
    pub fn new() -> Self {
        let input_schema = InputSchema::new()
            .field(FieldSpec::required(
                "vault_address",
                FieldKind::Address,
                "The address of the Morpho vault to withdraw from",
            ))
            .field(FieldSpec::required(
                "assets",
                FieldKind::Amount,
                "The amount of the underlying token to withdraw, in atomic units",
            ))
            .field(FieldSpec::required(
                "receiver",
                FieldKind::Address,
                "The address that receives the withdrawn assets",
            ));

        let examples = vec![ActionExample {
            input: json!({
                "vault_address": "0xA0E430870c4604CcfC7B38Ca7845B1FF653D0ff1",
                "assets": "1000000",
                "receiver": "0x036CbD53842c5426634e7929541eC2318f3dCF7e",
            }),
            output: json!(
                "Withdrew 1000000 atomic units from Morpho vault 0xA0E430870c4604CcfC7B38Ca7845B1FF653D0ff1.\nTransaction hash: 0xdef\nTransaction link: https://basescan.org/tx/0xdef"
            ),
            explanation: "Withdraw one USDC from the vault back to the wallet.".to_string(),
        }];

        let meta = ActionMetadata::new(
            "morpho_withdraw",
            "withdrawing from Morpho Vault",
            "Withdraw assets from a Morpho vault to a receiver address. Amounts are whole numbers of atomic units.",
        )
        .with_schema(input_schema)
        .with_examples(examples);

        Self { meta }
    }
}

#[async_trait]
impl Action<dyn WalletOperations> for MorphoWithdrawAction {
    fn metadata(&self) -> &ActionMetadata {
        &self.meta
    }

    async fn call(&self, wallet: &dyn WalletOperations, input: Value) -> Result<String> {
        #[derive(Deserialize)]
        struct Input {
            vault_address: String,
            assets: String,
            receiver: String,
        }

        let parsed: Input = serde_json::from_value(input)?;
        let receipt = wallet
            .invoke_contract(
                &parsed.vault_address,
                "withdraw",
                json!({
                    "assets": parsed.assets,
                    "receiver": parsed.receiver,
                    "owner": parsed.receiver,
                }),
                None,
            )
            .await?;

        Ok(format!(
            "Withdrew {} atomic units from Morpho vault {}.\nTransaction hash: {}\nTransaction link: {}",
            parsed.assets, parsed.vault_address, receipt.transaction_hash, receipt.transaction_link,
        ))
    }
}

// =============================================================================
// compound_supply - Supply collateral to Compound
// =============================================================================

#[derive(Debug)]
pub struct CompoundSupplyAction {
    meta: ActionMetadata,
}

impl CompoundSupplyAction {
    pub fn new() -> Self {
        let input_schema = InputSchema::new()
            .field(FieldSpec::required(
                "asset_id",
                FieldKind::Enum(COMPOUND_COLLATERAL_ASSETS),
                "The asset to supply as collateral",
            ))
            .field(FieldSpec::required(
                "amount",
                FieldKind::Amount,
                "The amount to supply, in atomic units",
            ));

        let examples = vec![ActionExample {
            input: json!({ "asset_id": "weth", "amount": "1000000000000000000" }),
            output: json!(
                "Supplied 1000000000000000000 atomic units of weth to Compound.\nTransaction hash: 0xabc\nTransaction link: https://basescan.org/tx/0xabc"
            ),
            explanation: "Supply one WETH as collateral.".to_string(),
        }];

        let meta = ActionMetadata::new(
            "compound_supply",
            "supplying to Compound",
            "Supply an asset as collateral to the Compound market. Approves the market to spend the asset, then supplies it.",
        )
        .with_schema(input_schema)
        .with_examples(examples);

        Self { meta }
    }
}

#[async_trait]
impl Action<dyn WalletOperations> for CompoundSupplyAction {
    fn metadata(&self) -> &ActionMetadata {
        &self.meta
    }

    async fn call(&self, wallet: &dyn WalletOperations, input: Value) -> Result<String> {
        #[derive(Deserialize)]
        struct Input {
            asset_id: String,
            amount: String,
        }

        let parsed: Input = serde_json::from_value(input)?;
        let token = asset_address(&parsed.asset_id)?;
        approve(wallet, token, COMPOUND_COMET_ADDRESS, &parsed.amount).await?;
        let receipt = wallet
            .invoke_contract(
                COMPOUND_COMET_ADDRESS,
                "supply",
                json!({ "asset": token, "amount": parsed.amount }),
                None,
            )
            .await?;

        Ok(format!(
            "Supplied {} atomic units of {} to Compound.\nTransaction hash: {}\nTransaction link: {}",
            parsed.amount, parsed.asset_id, receipt.transaction_hash, receipt.transaction_link,
        ))
    }
}

// =============================================================================
// compound_withdraw - Withdraw supplied collateral
// =============================================================================

#[derive(Debug)]
pub struct CompoundWithdrawAction {
    meta: ActionMetadata,
}

impl CompoundWithdrawAction {
    pub fn new() -> Self {
        let input_schema = InputSchema::new()
            .field(FieldSpec::required(
                "asset_id",
                FieldKind::Enum(COMPOUND_COLLATERAL_ASSETS),
                "The collateral asset to withdraw",
            ))
            .field(FieldSpec::required(
                "amount",
                FieldKind::Amount,
                "The amount to withdraw, in atomic units",
            ));

        let examples = vec![ActionExample {
            input: json!({ "asset_id": "weth", "amount": "500000000000000000" }),
            output: json!(
                "Withdrew 500000000000000000 atomic units of weth from Compound.\nTransaction hash: 0xdef\nTransaction link: https://basescan.org/tx/0xdef"
            ),
            explanation: "Withdraw half a WETH of collateral.".to_string(),
        }];

        let meta = ActionMetadata::new(
            "compound_withdraw",
            "withdrawing from Compound",
            "Withdraw a previously supplied asset from the Compound market back into the wallet.",
        )
        .with_schema(input_schema)
        .with_examples(examples);

        Self { meta }
    }
}

#[async_trait]
impl Action<dyn WalletOperations> for CompoundWithdrawAction {
    fn metadata(&self) -> &ActionMetadata {
        &self.meta
    }

    async fn call(&self, wallet: &dyn WalletOperations, input: Value) -> Result<String> {
        #[derive(Deserialize)]
        struct Input {
            asset_id: String,
            amount: String,
        }

        let parsed: Input = serde_json::from_value(input)?;
        let token = asset_address(&parsed.asset_id)?;
        let receipt = wallet
            .invoke_contract(
                COMPOUND_COMET_ADDRESS,
                "withdraw",
                json!({ "asset": token, "amount": parsed.amount }),
                None,
            )
            .await?;

        Ok(format!(
            "Withdrew {} atomic units of {} from Compound.\nTransaction hash: {}\nTransaction link: {}",
            parsed.amount, parsed.asset_id, receipt.transaction_hash, receipt.transaction_link,
        ))
    }
}

// =============================================================================
// compound_borrow - Borrow a base asset against collateral
// =============================================================================

#[derive(Debug)]
pub struct CompoundBorrowAction {
    meta: ActionMetadata,
}

impl CompoundBorrowAction {
    pub fn new() -> Self {
        let input_schema = InputSchema::new()
            .field(FieldSpec::required(
                "asset_id",
                FieldKind::Enum(COMPOUND_BASE_ASSETS),
                "The base asset to borrow",
            ))
            .field(FieldSpec::required(
                "amount",
                FieldKind::Amount,
                "The amount to borrow, in atomic units",
            ));

        let examples = vec![ActionExample {
            input: json!({ "asset_id": "usdc", "amount": "1000000" }),
            output: json!(
                "Borrowed 1000000 atomic units of usdc from Compound.\nTransaction hash: 0xabc\nTransaction link: https://basescan.org/tx/0xabc"
            ),
            explanation: "Borrow one USDC against supplied collateral.".to_string(),
        }];

        let meta = ActionMetadata::new(
            "compound_borrow",
            "borrowing from Compound",
            "Borrow a base asset from the Compound market against previously supplied collateral.",
        )
        .with_schema(input_schema)
        .with_examples(examples);

        Self { meta }
    }
}

#[async_trait]
impl Action<dyn WalletOperations> for CompoundBorrowAction {
    fn metadata(&self) -> &ActionMetadata {
        &self.meta
    }

    async fn call(&self, wallet: &dyn WalletOperations, input: Value) -> Result<String> {
        #[derive(Deserialize)]
        struct Input {
            asset_id: String,
            amount: String,
        }

        let parsed: Input = serde_json::from_value(input)?;
        let token = asset_address(&parsed.asset_id)?;
        // Borrowing the base asset is a withdraw on the Comet market.
        let receipt = wallet
            .invoke_contract(
                COMPOUND_COMET_ADDRESS,
                "withdraw",
                json!({ "asset": token, "amount": parsed.amount }),
                None,
            )
            .await?;

        Ok(format!(
            "Borrowed {} atomic units of {} from Compound.\nTransaction hash: {}\nTransaction link: {}",
            parsed.amount, parsed.asset_id, receipt.transaction_hash, receipt.transaction_link,
        ))
    }
}

// =============================================================================
// compound_repay - Repay borrowed base asset
// =============================================================================

#[derive(Debug)]
pub struct CompoundRepayAction {
    meta: ActionMetadata,
}

impl CompoundRepayAction {
    pub fn new() -> Self {
        let input_schema = InputSchema::new()
            .field(FieldSpec::required(
                "asset_id",
                FieldKind::Enum(COMPOUND_BASE_ASSETS),
                "The borrowed base asset to repay",
            ))
            .field(FieldSpec::required(
                "amount",
                FieldKind::Amount,
                "The amount to repay, in atomic units",
            ));

        let examples = vec![ActionExample {
            input: json!({ "asset_id": "usdc", "amount": "1000000" }),
            output: json!(
                "Repaid 1000000 atomic units of usdc to Compound.\nTransaction hash: 0xdef\nTransaction link: https://basescan.org/tx/0xdef"
            ),
            explanation: "Repay one USDC of outstanding debt.".to_string(),
        }];

        let meta = ActionMetadata::new(
            "compound_repay",
            "repaying to Compound",
            "Repay a borrowed base asset to the Compound market. Approves the market to spend the asset, then supplies it against the debt.",
        )
        .with_schema(input_schema)
        .with_examples(examples);

        Self { meta }
    }
}

#[async_trait]
impl Action<dyn WalletOperations> for CompoundRepayAction {
    fn metadata(&self) -> &ActionMetadata {
        &self.meta
    }

    async fn call(&self, wallet: &dyn WalletOperations, input: Value) -> Result<String> {
        #[derive(Deserialize)]
        struct Input {
            asset_id: String,
            amount: String,
        }

        let parsed: Input = serde_json::from_value(input)?;
        let token = asset_address(&parsed.asset_id)?;
        approve(wallet, token, COMPOUND_COMET_ADDRESS, &parsed.amount).await?;
        let receipt = wallet
            .invoke_contract(
                COMPOUND_COMET_ADDRESS,
                "supply",
                json!({ "asset": token, "amount": parsed.amount }),
                None,
            )
            .await?;

        Ok(format!(
            "Repaid {} atomic units of {} to Compound.\nTransaction hash: {}\nTransaction link: {}",
            parsed.amount, parsed.asset_id, receipt.transaction_hash, receipt.transaction_link,
        ))
    }
}

// =============================================================================
// uniswap_v3_create_pool - Create a Uniswap v3 pool
// =============================================================================

#[derive(Debug)]
pub struct UniswapV3CreatePoolAction {
    meta: ActionMetadata,
}

impl UniswapV3CreatePoolAction {
    pub fn new() -> Self {
        let input_schema = InputSchema::new()
            .field(FieldSpec::required(
                "token_a",
                FieldKind::Address,
                "The address of the first token in the pair",
            ))
            .field(FieldSpec::required(
                "token_b",
                FieldKind::Address,
                "The address of the second token in the pair",
            ))
            .field(FieldSpec::required(
                "fee",
                FieldKind::Enum(UNISWAP_FEE_TIERS),
                "The fee tier in hundredths of a bip; 3000 is the 0.3% tier",
            ));

        let examples = vec![ActionExample {
            input: json!({
                "token_a": "0x4200000000000000000000000000000000000006",
                "token_b": "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913",
                "fee": "3000",
            }),
            output: json!(
                "Created Uniswap v3 pool for 0x4200000000000000000000000000000000000006 and 0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913 at fee tier 3000.\nTransaction hash: 0xabc\nTransaction link: https://basescan.org/tx/0xabc"
            ),
            explanation: "Create the WETH/USDC pool at the 0.3% fee tier.".to_string(),
        }];

        let meta = ActionMetadata::new(
            "uniswap_v3_create_pool",
            "creating Uniswap v3 pool",
            "Create a Uniswap v3 pool for a pair of tokens at one of the supported fee tiers.",
        )
        .with_schema(input_schema)
        .with_examples(examples);

        Self { meta }
    }
}

#[async_trait]
impl Action<dyn WalletOperations> for UniswapV3CreatePoolAction {
    fn metadata(&self) -> &ActionMetadata {
        &self.meta
    }

    async fn call(&self, wallet: &dyn WalletOperations, input: Value) -> Result<String> {
        #[derive(Deserialize)]
        struct Input {
            token_a: String,
            token_b: String,
            fee: String,
        }

        let parsed: Input = serde_json::from_value(input)?;
        let receipt = wallet
            .invoke_contract(
                UNISWAP_V3_FACTORY_ADDRESS,
                "createPool",
                json!({
                    "tokenA": parsed.token_a,
                    "tokenB": parsed.token_b,
                    "fee": parsed.fee,
                }),
                None,
            )
            .await?;

        Ok(format!(
            "Created Uniswap v3 pool for {} and {} at fee tier {}.\nTransaction hash: {}\nTransaction link: {}",
            parsed.token_a,
            parsed.token_b,
            parsed.fee,
            receipt.transaction_hash,
            receipt.transaction_link,
        ))
    }
}

// =============================================================================
// pyth_fetch_price_feed_id - Look up a Pyth price feed by token symbol
// =============================================================================

#[derive(Debug)]
pub struct PythFetchPriceFeedIdAction {
    meta: ActionMetadata,
    hermes_url: String,
}

impl PythFetchPriceFeedIdAction {
    pub fn new() -> Self {
        let input_schema = InputSchema::new().field(FieldSpec::required(
            "token_symbol",
            FieldKind::String,
            "The token symbol to look up, e.g. `BTC`",
        ));

        let examples = vec![ActionExample {
            input: json!({ "token_symbol": "BTC" }),
            output: json!(
                "Price feed ID for BTC: e62df6c8b4a85fe1a67db44dc12de5db330f7ac66b72dc658afedf0f4a415b43"
            ),
            explanation: "Resolve the BTC/USD crypto feed.".to_string(),
        }];

        let meta = ActionMetadata::new(
            "pyth_fetch_price_feed_id",
            "fetching price feed ID from Pyth",
            "Fetch the Pyth price feed ID for a token symbol. The feed ID is needed before fetching a price.",
        )
        .with_schema(input_schema)
        .with_examples(examples);

        Self {
            meta,
            hermes_url: PYTH_HERMES_URL.to_string(),
        }
    }

    /// Point the action at another Hermes host. Tests use this to talk to a
    /// local mock server.
    pub fn with_hermes_url(mut self, hermes_url: &str) -> Self {
        self.hermes_url = hermes_url.trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl Action<dyn WalletOperations> for PythFetchPriceFeedIdAction {
    fn metadata(&self) -> &ActionMetadata {
        &self.meta
    }

    async fn call(&self, _wallet: &dyn WalletOperations, input: Value) -> Result<String> {
        #[derive(Deserialize)]
        struct Input {
            token_symbol: String,
        }

        let parsed: Input = serde_json::from_value(input)?;
        let symbol = parsed.token_symbol.to_uppercase();
        let url = format!(
            "{}/v2/price_feeds?query={}&asset_type=crypto",
            self.hermes_url,
            urlencoding::encode(&symbol),
        );

        let client = reqwest::Client::new();
        let response = client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(anyhow!("Hermes returned {}", response.status()));
        }
        let feeds: Value = response.json().await?;

        let feed_id = feeds
            .as_array()
            .into_iter()
            .flatten()
            .find(|feed| {
                feed["attributes"]["base"].as_str() == Some(symbol.as_str())
            })
            .and_then(|feed| feed["id"].as_str())
            .ok_or_else(|| anyhow!("no price feed found for {symbol}"))?;

        Ok(format!("Price feed ID for {symbol}: {feed_id}"))
    }
}

// =============================================================================
// pyth_fetch_price - Current price for a Pyth feed
// =============================================================================

#[derive(Debug)]
pub struct PythFetchPriceAction {
    meta: ActionMetadata,
    hermes_url: String,
}

impl PythFetchPriceAction {
    pub fn new() -> Self {
        let input_schema = InputSchema::new().field(FieldSpec::required(
            "price_feed_id",
            FieldKind::String,
            "The Pyth price feed ID, as returned by pyth_fetch_price_feed_id",
        ));

        let examples = vec![ActionExample {
            input: json!({
                "price_feed_id": "e62df6c8b4a85fe1a67db44dc12de5db330f7ac66b72dc658afedf0f4a415b43"
            }),
            output: json!(
                "Price for feed e62df6c8b4a85fe1a67db44dc12de5db330f7ac66b72dc658afedf0f4a415b43: 68269.02400000"
            ),
            explanation: "Fetch the current BTC/USD price.".to_string(),
        }];

        let meta = ActionMetadata::new(
            "pyth_fetch_price",
            "fetching price from Pyth",
            "Fetch the current price for a Pyth price feed ID. Prices are scaled by the feed's exponent before being reported.",
        )
        .with_schema(input_schema)
        .with_examples(examples);

        Self {
            meta,
            hermes_url: PYTH_HERMES_URL.to_string(),
        }
    }

    /// Point the action at another Hermes host. Tests use this to talk to a
    /// local mock server.
    pub fn with_hermes_url(mut self, hermes_url: &str) -> Self {
        self.hermes_url = hermes_url.trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl Action<dyn WalletOperations> for PythFetchPriceAction {
    fn metadata(&self) -> &ActionMetadata {
        &self.meta
    }

    async fn call(&self, _wallet: &dyn WalletOperations, input: Value) -> Result<String> {
        #[derive(Deserialize)]
        struct Input {
            price_feed_id: String,
        }

        let parsed: Input = serde_json::from_value(input)?;
        let url = format!(
            "{}/v2/updates/price/latest?ids[]={}",
            self.hermes_url,
            urlencoding::encode(&parsed.price_feed_id),
        );

        let client = reqwest::Client::new();
        let response = client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(anyhow!("Hermes returned {}", response.status()));
        }
        let update: Value = response.json().await?;

        let price = &update["parsed"][0]["price"];
        let raw = price["price"]
            .as_str()
            .ok_or_else(|| anyhow!("no parsed price for feed {}", parsed.price_feed_id))?
            .parse::<i64>()?;
        let expo = price["expo"]
            .as_i64()
            .ok_or_else(|| anyhow!("no exponent for feed {}", parsed.price_feed_id))?;

        let scaled = BigDecimal::new(BigInt::from(raw), -expo);
        Ok(format!(
            "Price for feed {}: {scaled}",
            parsed.price_feed_id
        ))
    }
}

// =============================================================================
// Register DeFi actions
// =============================================================================

pub fn register_defi_actions(registry: &mut ActionRegistry<dyn WalletOperations>) {
    registry.register(MorphoDepositAction::new());
    registry.register(MorphoWithdrawAction::new());
    registry.register(CompoundSupplyAction::new());
    registry.register(CompoundWithdrawAction::new());
    registry.register(CompoundBorrowAction::new());
    registry.register(CompoundRepayAction::new());
    registry.register(UniswapV3CreatePoolAction::new());
    registry.register(PythFetchPriceFeedIdAction::new());
    registry.register(PythFetchPriceAction::new());
}

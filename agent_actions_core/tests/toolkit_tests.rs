//! End-to-end tests: registries built from the real action families, bound
//! to hand-rolled mock collaborators, driven through the string-only
//! toolkit surface the way a host framework would.

use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::{json, Value};

use agent_actions_core::{
    farcaster_toolkit, twitter_toolkit, wallet_toolkit, ActionRegistry, Toolkit, ToolkitError,
};
use agent_actions_core::twitter_actions::{self, PostTweetAction};
use agent_actions_farcaster::FarcasterOperations;
use agent_actions_twitter::TwitterOperations;
use agent_actions_wallet::{
    DeployedContract, TradeResult, TransactionReceipt, WalletOperations,
};

// =============================================================================
// Mock collaborators
// =============================================================================

/// Wallet that records every call it receives and answers with canned data.
#[derive(Default)]
struct RecordingWallet {
    calls: Mutex<Vec<String>>,
}

impl RecordingWallet {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn record(&self, entry: String) {
        self.calls.lock().unwrap().push(entry);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn receipt(suffix: &str) -> TransactionReceipt {
        TransactionReceipt {
            transaction_hash: format!("0xhash-{suffix}"),
            transaction_link: format!("https://basescan.org/tx/0xhash-{suffix}"),
        }
    }
}

#[async_trait]
impl WalletOperations for RecordingWallet {
    fn address(&self) -> String {
        "0x036CbD53842c5426634e7929541eC2318f3dCF7e".to_string()
    }

    fn network_id(&self) -> String {
        "base-sepolia".to_string()
    }

    async fn balance(&self, asset_id: &str) -> Result<String> {
        self.record(format!("balance:{asset_id}"));
        Ok("1500000000000000000".to_string())
    }

    async fn transfer(
        &self,
        amount: &str,
        asset_id: &str,
        destination: &str,
        gasless: bool,
    ) -> Result<TransactionReceipt> {
        self.record(format!("transfer:{amount}:{asset_id}:{destination}:{gasless}"));
        Ok(Self::receipt("transfer"))
    }

    async fn trade(
        &self,
        amount: &str,
        from_asset_id: &str,
        to_asset_id: &str,
    ) -> Result<TradeResult> {
        self.record(format!("trade:{amount}:{from_asset_id}:{to_asset_id}"));
        Ok(TradeResult {
            to_amount: "3200000000".to_string(),
            transaction_hash: "0xhash-trade".to_string(),
            transaction_link: "https://basescan.org/tx/0xhash-trade".to_string(),
        })
    }

    async fn request_faucet(&self, asset_id: Option<&str>) -> Result<String> {
        self.record(format!("faucet:{}", asset_id.unwrap_or("native")));
        Ok("https://sepolia.basescan.org/tx/0xfaucet".to_string())
    }

    async fn deploy_token(
        &self,
        name: &str,
        symbol: &str,
        total_supply: &str,
    ) -> Result<DeployedContract> {
        self.record(format!("deploy_token:{name}:{symbol}:{total_supply}"));
        Ok(DeployedContract {
            contract_address: "0xAb5801a7D398351b8bE11C439e05C5B3259aeC9B".to_string(),
            transaction_link: "https://basescan.org/tx/0xhash-deploy".to_string(),
        })
    }

    async fn invoke_contract(
        &self,
        contract_address: &str,
        method: &str,
        _args: Value,
        value: Option<&str>,
    ) -> Result<TransactionReceipt> {
        self.record(format!(
            "invoke:{contract_address}:{method}:{}",
            value.unwrap_or("-")
        ));
        Ok(Self::receipt("invoke"))
    }

    async fn read_contract(
        &self,
        contract_address: &str,
        method: &str,
        _args: Value,
    ) -> Result<Value> {
        self.record(format!("read:{contract_address}:{method}"));
        Ok(json!({ "ok": true }))
    }
}

/// Twitter client that answers with canned payloads, or fails every call
/// when constructed with `failing()`.
struct StubTwitter {
    fail: bool,
    calls: Mutex<Vec<String>>,
}

impl StubTwitter {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            fail: false,
            calls: Mutex::new(Vec::new()),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            calls: Mutex::new(Vec::new()),
        })
    }

    fn record(&self, entry: String) {
        self.calls.lock().unwrap().push(entry);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TwitterOperations for StubTwitter {
    async fn account_details(&self) -> Result<Value> {
        self.record("account_details".to_string());
        if self.fail {
            return Err(anyhow!("Request failed with status 401"));
        }
        Ok(json!({ "data": { "id": "12345", "username": "agent" } }))
    }

    async fn account_mentions(&self, user_id: &str, max_results: u64) -> Result<Value> {
        self.record(format!("mentions:{user_id}:{max_results}"));
        if self.fail {
            return Err(anyhow!("Request failed with status 401"));
        }
        Ok(json!({ "data": [{ "id": "1", "text": "@agent hi" }] }))
    }

    async fn create_tweet(&self, text: &str, in_reply_to: Option<&str>) -> Result<Value> {
        self.record(format!("tweet:{text}:{}", in_reply_to.unwrap_or("-")));
        if self.fail {
            return Err(anyhow!("Request failed with status 429: Too Many Requests"));
        }
        Ok(json!({ "data": { "id": "1", "text": text } }))
    }
}

struct StubFarcaster;

#[async_trait]
impl FarcasterOperations for StubFarcaster {
    async fn account_details(&self) -> Result<Value> {
        Ok(json!({ "users": [{ "fid": 42, "username": "agent" }] }))
    }

    async fn publish_cast(&self, text: &str) -> Result<Value> {
        Ok(json!({ "success": true, "cast": { "hash": "0xcast", "text": text } }))
    }
}

// =============================================================================
// Wallet toolkit
// =============================================================================

#[tokio::test]
async fn get_balance_round_trip_reaches_the_wallet() {
    let wallet = RecordingWallet::new();
    let toolkit = wallet_toolkit(wallet.clone()).unwrap();

    let out = toolkit.invoke("get_balance", json!({ "asset_id": "eth" })).await;

    assert!(out.contains("eth"), "got: {out}");
    assert!(out.contains("1500000000000000000"), "got: {out}");
    assert_eq!(wallet.calls(), vec!["balance:eth"]);
}

#[tokio::test]
async fn invalid_input_never_reaches_the_wallet() {
    let wallet = RecordingWallet::new();
    let toolkit = wallet_toolkit(wallet.clone()).unwrap();

    // Missing required field.
    let out = toolkit.invoke("get_balance", json!({})).await;
    assert_eq!(
        out,
        "Error validating input: missing required field `asset_id`"
    );

    // Unknown field.
    let out = toolkit
        .invoke("get_balance", json!({ "asset_id": "eth", "verbose": true }))
        .await;
    assert!(out.starts_with("Error validating input"), "got: {out}");

    // Wrong type.
    let out = toolkit.invoke("get_balance", json!({ "asset_id": 7 })).await;
    assert!(out.starts_with("Error validating input"), "got: {out}");

    // Failed field validator.
    let out = toolkit
        .invoke(
            "transfer",
            json!({ "amount": "0", "asset_id": "usdc", "destination": "0x4200000000000000000000000000000000000006" }),
        )
        .await;
    assert!(out.starts_with("Error validating input"), "got: {out}");

    // Non-object input.
    let out = toolkit.invoke("get_balance", json!("eth")).await;
    assert_eq!(out, "Error validating input: input must be a JSON object");

    assert!(wallet.calls().is_empty(), "wallet saw: {:?}", wallet.calls());
}

#[tokio::test]
async fn transfer_applies_the_gasless_default() {
    let wallet = RecordingWallet::new();
    let toolkit = wallet_toolkit(wallet.clone()).unwrap();

    let out = toolkit
        .invoke(
            "transfer",
            json!({
                "amount": "1000000",
                "asset_id": "usdc",
                "destination": "0x4200000000000000000000000000000000000006",
            }),
        )
        .await;

    assert!(out.starts_with("Transferred 1000000 of usdc"), "got: {out}");
    assert_eq!(
        wallet.calls(),
        vec!["transfer:1000000:usdc:0x4200000000000000000000000000000000000006:false"]
    );
}

#[tokio::test]
async fn wallet_details_reports_network_and_address() {
    let wallet = RecordingWallet::new();
    let toolkit = wallet_toolkit(wallet).unwrap();

    let out = toolkit.invoke("get_wallet_details", json!({})).await;
    assert_eq!(
        out,
        "Wallet on network base-sepolia with default address 0x036CbD53842c5426634e7929541eC2318f3dCF7e"
    );
}

#[tokio::test]
async fn wrap_eth_attaches_the_deposit_value() {
    let wallet = RecordingWallet::new();
    let toolkit = wallet_toolkit(wallet.clone()).unwrap();

    let out = toolkit
        .invoke("wrap_eth", json!({ "amount_to_wrap": "100000000000000000" }))
        .await;

    assert!(out.starts_with("Wrapped 100000000000000000 wei"), "got: {out}");
    assert_eq!(
        wallet.calls(),
        vec!["invoke:0x4200000000000000000000000000000000000006:deposit:100000000000000000"]
    );
}

#[tokio::test]
async fn morpho_deposit_approves_before_depositing() {
    let wallet = RecordingWallet::new();
    let toolkit = wallet_toolkit(wallet.clone()).unwrap();

    let out = toolkit
        .invoke(
            "morpho_deposit",
            json!({
                "vault_address": "0xA0E430870c4604CcfC7B38Ca7845B1FF653D0ff1",
                "assets": "1000000",
                "receiver": "0x036CbD53842c5426634e7929541eC2318f3dCF7e",
                "token_address": "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913",
            }),
        )
        .await;

    assert!(out.starts_with("Deposited 1000000"), "got: {out}");
    assert_eq!(
        wallet.calls(),
        vec![
            "invoke:0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913:approve:-",
            "invoke:0xA0E430870c4604CcfC7B38Ca7845B1FF653D0ff1:deposit:-",
        ]
    );
}

#[tokio::test]
async fn compound_borrow_withdraws_the_base_asset() {
    let wallet = RecordingWallet::new();
    let toolkit = wallet_toolkit(wallet.clone()).unwrap();

    let out = toolkit
        .invoke("compound_borrow", json!({ "asset_id": "usdc", "amount": "1000000" }))
        .await;

    assert!(out.starts_with("Borrowed 1000000"), "got: {out}");
    assert_eq!(
        wallet.calls(),
        vec!["invoke:0xb125E6687d4313864e53df431d5425969c15Eb2F:withdraw:-"]
    );
}

#[tokio::test]
async fn wallet_toolkit_exposes_every_action_in_order() {
    let toolkit = wallet_toolkit(RecordingWallet::new()).unwrap();
    assert_eq!(
        toolkit.names(),
        vec![
            "get_wallet_details",
            "get_balance",
            "transfer",
            "trade",
            "request_faucet_funds",
            "deploy_token",
            "wrap_eth",
            "morpho_deposit",
            "morpho_withdraw",
            "compound_supply",
            "compound_withdraw",
            "compound_borrow",
            "compound_repay",
            "uniswap_v3_create_pool",
            "pyth_fetch_price_feed_id",
            "pyth_fetch_price",
        ]
    );
}

#[tokio::test]
async fn tool_definitions_expose_parameter_schemas() {
    let toolkit = wallet_toolkit(RecordingWallet::new()).unwrap();
    let defs = toolkit.tool_definitions();

    let transfer = defs.iter().find(|d| d["name"] == "transfer").unwrap();
    assert_eq!(transfer["parameters"]["additionalProperties"], json!(false));
    assert_eq!(
        transfer["parameters"]["required"],
        json!(["amount", "asset_id", "destination"])
    );
    assert!(transfer["description"]
        .as_str()
        .unwrap()
        .contains("Example input"));
}

// =============================================================================
// Twitter toolkit
// =============================================================================

#[tokio::test]
async fn post_tweet_relays_the_api_payload() {
    let twitter = StubTwitter::new();
    let toolkit = twitter_toolkit(twitter.clone()).unwrap();

    let out = toolkit
        .invoke("post_tweet", json!({ "tweet": "hello world" }))
        .await;

    assert!(out.starts_with("Successfully posted to Twitter:"), "got: {out}");
    assert!(out.contains("hello world"), "got: {out}");
    assert_eq!(twitter.calls(), vec!["tweet:hello world:-"]);
}

#[tokio::test]
async fn failed_post_comes_back_as_error_posting() {
    let twitter = StubTwitter::failing();
    let toolkit = twitter_toolkit(twitter).unwrap();

    let out = toolkit
        .invoke("post_tweet", json!({ "tweet": "hello world" }))
        .await;

    assert!(out.starts_with("Error posting"), "got: {out}");
    assert!(out.contains("429"), "got: {out}");
}

#[tokio::test]
async fn over_long_tweet_is_rejected_before_the_client_runs() {
    let twitter = StubTwitter::failing();
    let toolkit = twitter_toolkit(twitter.clone()).unwrap();

    let out = toolkit
        .invoke("post_tweet", json!({ "tweet": "x".repeat(281) }))
        .await;

    assert!(out.starts_with("Error validating input"), "got: {out}");
    assert!(twitter.calls().is_empty());
}

#[tokio::test]
async fn schemaless_account_details_passes_anything_through() {
    let twitter = StubTwitter::new();
    let toolkit = twitter_toolkit(twitter.clone()).unwrap();

    // An empty object, an unexpected object, even a bare string: all fine,
    // the handler ignores its input.
    for input in [json!({}), json!({ "unexpected": true }), json!("hi")] {
        let out = toolkit.invoke("account_details", input).await;
        assert!(
            out.starts_with("Successfully retrieved authenticated user account details:"),
            "got: {out}"
        );
    }
    assert_eq!(twitter.calls().len(), 3);
}

#[tokio::test]
async fn reply_threads_through_the_parent_tweet() {
    let twitter = StubTwitter::new();
    let toolkit = twitter_toolkit(twitter.clone()).unwrap();

    let out = toolkit
        .invoke(
            "post_tweet_reply",
            json!({ "tweet_id": "777", "tweet_reply": "hello back" }),
        )
        .await;

    assert!(out.starts_with("Successfully posted reply to Twitter:"), "got: {out}");
    assert_eq!(twitter.calls(), vec!["tweet:hello back:777"]);
}

// =============================================================================
// Farcaster toolkit
// =============================================================================

#[tokio::test]
async fn farcaster_toolkit_publishes_and_reports() {
    let toolkit = farcaster_toolkit(Arc::new(StubFarcaster)).unwrap();

    let out = toolkit.invoke("publish_cast", json!({ "cast": "gm" })).await;
    assert!(out.starts_with("Successfully published cast to Farcaster:"), "got: {out}");

    let out = toolkit.invoke("account_details", json!({})).await;
    assert!(out.contains("\"fid\":42"), "got: {out}");
}

// =============================================================================
// Aggregation rules
// =============================================================================

#[tokio::test]
async fn duplicate_names_fail_toolkit_construction() {
    let mut registry: ActionRegistry<dyn TwitterOperations> = ActionRegistry::new();
    twitter_actions::register_twitter_actions(&mut registry);
    registry.register(PostTweetAction::new());

    let err = Toolkit::<dyn TwitterOperations>::build(StubTwitter::new(), &registry).unwrap_err();
    assert_eq!(err, ToolkitError::DuplicateAction("post_tweet".to_string()));
}

#[tokio::test]
async fn unknown_action_names_come_back_as_text() {
    let toolkit = twitter_toolkit(StubTwitter::new()).unwrap();
    let out = toolkit.invoke("delete_tweet", json!({})).await;
    assert_eq!(out, "Error: no action named `delete_tweet` in this toolkit");
}

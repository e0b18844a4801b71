//! Hosted wallet client.
//!
//! Thin REST client for an MPC wallet service. Keys never leave the
//! service: signing and broadcasting happen server-side, and this client
//! only translates [`WalletOperations`] calls into HTTP requests against
//! the wallet's endpoints.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;
use url::Url;

use agent_actions_wallet::{DeployedContract, TradeResult, TransactionReceipt, WalletOperations};

use crate::error::ConfigError;

pub struct HostedWallet {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
    wallet_id: String,
    address: String,
    network_id: String,
}

impl HostedWallet {
    /// `base_url` is the service root, e.g. `https://api.wallet.example`.
    pub fn new(
        base_url: &str,
        api_key: &str,
        wallet_id: &str,
        address: &str,
        network_id: &str,
    ) -> Result<Self, ConfigError> {
        let parsed = Url::parse(base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;
        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingCredential("api_key"));
        }
        if wallet_id.trim().is_empty() {
            return Err(ConfigError::MissingCredential("wallet_id"));
        }
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: parsed,
            api_key: api_key.to_string(),
            wallet_id: wallet_id.to_string(),
            address: address.to_string(),
            network_id: network_id.to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/v1/wallets/{}/{path}", self.wallet_id)
    }

    async fn get(&self, path: &str) -> Result<Value> {
        let url = self.endpoint(path);
        debug!(%url, "wallet service GET");
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value> {
        let url = self.endpoint(path);
        debug!(%url, "wallet service POST");
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn parse(response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(anyhow!("wallet service returned {status}: {detail}"));
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl WalletOperations for HostedWallet {
    fn address(&self) -> String {
        self.address.clone()
    }

    fn network_id(&self) -> String {
        self.network_id.clone()
    }

    async fn balance(&self, asset_id: &str) -> Result<String> {
        let data = self.get(&format!("balances/{asset_id}")).await?;
        data.get("amount")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| anyhow!("wallet service response missing `amount`"))
    }

    async fn transfer(
        &self,
        amount: &str,
        asset_id: &str,
        destination: &str,
        gasless: bool,
    ) -> Result<TransactionReceipt> {
        let data = self
            .post(
                "transfers",
                json!({
                    "amount": amount,
                    "asset_id": asset_id,
                    "destination": destination,
                    "gasless": gasless,
                }),
            )
            .await?;
        Ok(serde_json::from_value(data)?)
    }

    async fn trade(
        &self,
        amount: &str,
        from_asset_id: &str,
        to_asset_id: &str,
    ) -> Result<TradeResult> {
        let data = self
            .post(
                "trades",
                json!({
                    "amount": amount,
                    "from_asset_id": from_asset_id,
                    "to_asset_id": to_asset_id,
                }),
            )
            .await?;
        Ok(serde_json::from_value(data)?)
    }

    async fn request_faucet(&self, asset_id: Option<&str>) -> Result<String> {
        let data = self
            .post("faucet", json!({ "asset_id": asset_id }))
            .await?;
        data.get("transaction_link")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| anyhow!("wallet service response missing `transaction_link`"))
    }

    async fn deploy_token(
        &self,
        name: &str,
        symbol: &str,
        total_supply: &str,
    ) -> Result<DeployedContract> {
        let data = self
            .post(
                "contracts/token",
                json!({
                    "name": name,
                    "symbol": symbol,
                    "total_supply": total_supply,
                }),
            )
            .await?;
        Ok(serde_json::from_value(data)?)
    }

    async fn invoke_contract(
        &self,
        contract_address: &str,
        method: &str,
        args: Value,
        value: Option<&str>,
    ) -> Result<TransactionReceipt> {
        let data = self
            .post(
                "invocations",
                json!({
                    "contract_address": contract_address,
                    "method": method,
                    "args": args,
                    "amount": value,
                }),
            )
            .await?;
        Ok(serde_json::from_value(data)?)
    }

    async fn read_contract(
        &self,
        contract_address: &str,
        method: &str,
        args: Value,
    ) -> Result<Value> {
        let data = self
            .post(
                "reads",
                json!({
                    "contract_address": contract_address,
                    "method": method,
                    "args": args,
                }),
            )
            .await?;
        data.get("result")
            .cloned()
            .ok_or_else(|| anyhow!("wallet service response missing `result`"))
    }
}

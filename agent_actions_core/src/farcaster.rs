//! Farcaster client backed by the Neynar API.
//!
//! Neynar holds a signer for the agent's account; publishing goes through
//! that signer, reads go through the hub proxy endpoints.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;
use url::Url;

use agent_actions_farcaster::FarcasterOperations;

use crate::error::ConfigError;

const NEYNAR_API_URL: &str = "https://api.neynar.com";

pub struct NeynarFarcaster {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
    signer_uuid: String,
    agent_fid: u64,
}

impl NeynarFarcaster {
    pub fn new(api_key: &str, signer_uuid: &str, agent_fid: u64) -> Result<Self, ConfigError> {
        Self::with_base_url(api_key, signer_uuid, agent_fid, NEYNAR_API_URL)
    }

    /// Point the client at another host. Tests use this to talk to a local
    /// mock server.
    pub fn with_base_url(
        api_key: &str,
        signer_uuid: &str,
        agent_fid: u64,
        base_url: &str,
    ) -> Result<Self, ConfigError> {
        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingCredential("api_key"));
        }
        if signer_uuid.trim().is_empty() {
            return Err(ConfigError::MissingCredential("signer_uuid"));
        }
        let parsed = Url::parse(base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: parsed,
            api_key: api_key.to_string(),
            signer_uuid: signer_uuid.to_string(),
            agent_fid,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/v2/farcaster/{path}")
    }

    async fn parse(response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(anyhow!("Neynar API returned {status}: {detail}"));
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl FarcasterOperations for NeynarFarcaster {
    async fn account_details(&self) -> Result<Value> {
        let url = format!("{}?fids={}", self.endpoint("user/bulk"), self.agent_fid);
        debug!(%url, "neynar GET");
        let response = self
            .http
            .get(&url)
            .header("x-api-key", &self.api_key)
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn publish_cast(&self, text: &str) -> Result<Value> {
        let url = self.endpoint("cast");
        debug!(%url, "neynar POST");
        let response = self
            .http
            .post(&url)
            .header("x-api-key", &self.api_key)
            .json(&json!({
                "signer_uuid": self.signer_uuid,
                "text": text,
            }))
            .send()
            .await?;
        Self::parse(response).await
    }
}

// plugins/farcaster/src/lib.rs
use async_trait::async_trait;
use anyhow::Result;
use serde_json::Value;

/// Everything a social action needs from a Farcaster client acting on
/// behalf of one agent account.
#[async_trait]
pub trait FarcasterOperations: Send + Sync {
    /// Profile of the agent's Farcaster account.
    async fn account_details(&self) -> Result<Value>;

    /// Publish a cast from the agent's account.
    async fn publish_cast(&self, text: &str) -> Result<Value>;
}

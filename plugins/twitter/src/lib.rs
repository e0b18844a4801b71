// plugins/twitter/src/lib.rs
use async_trait::async_trait;
use anyhow::Result;
use serde_json::Value;

/// Everything a social action needs from an authenticated Twitter (X)
/// client. Responses come back as the raw API payloads so actions can
/// relay them verbatim.
#[async_trait]
pub trait TwitterOperations: Send + Sync {
    /// Profile of the authenticated account.
    async fn account_details(&self) -> Result<Value>;

    /// Recent tweets that mention the account with the given user id.
    async fn account_mentions(&self, user_id: &str, max_results: u64) -> Result<Value>;

    /// Post a tweet, optionally as a reply to `in_reply_to`.
    async fn create_tweet(&self, text: &str, in_reply_to: Option<&str>) -> Result<Value>;
}

//! Twitter (X) API v2 client.
//!
//! Covers only what the social actions need from the authenticated user
//! context. Payloads are returned as raw JSON so actions can relay exactly
//! what the API said.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;
use url::Url;

use agent_actions_twitter::TwitterOperations;

use crate::error::ConfigError;

const TWITTER_API_URL: &str = "https://api.twitter.com";

pub struct TwitterApi {
    http: reqwest::Client,
    base_url: Url,
    bearer_token: String,
}

impl TwitterApi {
    pub fn new(bearer_token: &str) -> Result<Self, ConfigError> {
        Self::with_base_url(bearer_token, TWITTER_API_URL)
    }

    /// Point the client at another host. Tests use this to talk to a local
    /// mock server.
    pub fn with_base_url(bearer_token: &str, base_url: &str) -> Result<Self, ConfigError> {
        if bearer_token.trim().is_empty() {
            return Err(ConfigError::MissingCredential("bearer_token"));
        }
        let parsed = Url::parse(base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: parsed,
            bearer_token: bearer_token.to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/2/{path}")
    }

    async fn parse(response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(anyhow!("Twitter API returned {status}: {detail}"));
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl TwitterOperations for TwitterApi {
    async fn account_details(&self) -> Result<Value> {
        let url = self.endpoint("users/me");
        debug!(%url, "twitter GET");
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.bearer_token)
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn account_mentions(&self, user_id: &str, max_results: u64) -> Result<Value> {
        let url = format!(
            "{}?max_results={max_results}",
            self.endpoint(&format!("users/{}/mentions", urlencoding::encode(user_id)))
        );
        debug!(%url, "twitter GET");
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.bearer_token)
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn create_tweet(&self, text: &str, in_reply_to: Option<&str>) -> Result<Value> {
        let mut body = json!({ "text": text });
        if let Some(tweet_id) = in_reply_to {
            body["reply"] = json!({ "in_reply_to_tweet_id": tweet_id });
        }
        let url = self.endpoint("tweets");
        debug!(%url, "twitter POST");
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.bearer_token)
            .json(&body)
            .send()
            .await?;
        Self::parse(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn client_for(server: &Server) -> TwitterApi {
        TwitterApi::with_base_url("test-bearer", &server.url()).unwrap()
    }

    #[test]
    fn empty_bearer_token_is_a_config_error() {
        assert!(matches!(
            TwitterApi::new(""),
            Err(ConfigError::MissingCredential("bearer_token"))
        ));
    }

    #[tokio::test]
    async fn account_details_hits_users_me() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/2/users/me")
            .match_header("authorization", "Bearer test-bearer")
            .with_status(200)
            .with_body(r#"{"data": {"id": "12345", "username": "agent"}}"#)
            .create_async()
            .await;

        let details = client_for(&server).account_details().await.unwrap();
        assert_eq!(details["data"]["username"], "agent");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn mentions_pass_the_result_cap_through() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/2/users/12345/mentions?max_results=25")
            .with_status(200)
            .with_body(r#"{"data": [{"id": "1", "text": "@agent hi"}]}"#)
            .create_async()
            .await;

        let mentions = client_for(&server)
            .account_mentions("12345", 25)
            .await
            .unwrap();
        assert_eq!(mentions["data"][0]["text"], "@agent hi");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn replies_carry_the_parent_tweet_id() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/2/tweets")
            .match_body(mockito::Matcher::Json(json!({
                "text": "hello back",
                "reply": { "in_reply_to_tweet_id": "777" },
            })))
            .with_status(201)
            .with_body(r#"{"data": {"id": "778", "text": "hello back"}}"#)
            .create_async()
            .await;

        let tweet = client_for(&server)
            .create_tweet("hello back", Some("777"))
            .await
            .unwrap();
        assert_eq!(tweet["data"]["id"], "778");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn rate_limit_errors_surface_status_and_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/2/tweets")
            .with_status(429)
            .with_body(r#"{"title": "Too Many Requests"}"#)
            .create_async()
            .await;

        let err = client_for(&server)
            .create_tweet("spam", None)
            .await
            .unwrap_err();
        let message = format!("{err}");
        assert!(message.contains("429"), "got: {message}");
    }
}

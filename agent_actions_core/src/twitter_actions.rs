//! Twitter (X) actions.
//!
//! Includes:
//! - authenticated account details and mentions
//! - posting tweets and replies
//!
//! Read actions relay the raw API payload so the model sees exactly what
//! Twitter said.

use async_trait::async_trait;
use anyhow::Result;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::actions::{Action, ActionExample, ActionMetadata, ActionRegistry};
use crate::schema::{FieldKind, FieldSpec, InputSchema};
use agent_actions_twitter::TwitterOperations;

const TWEET_MAX_CHARS: usize = 280;

// =============================================================================
// account_details - Who is the authenticated account?
// =============================================================================

#[derive(Debug)]
pub struct AccountDetailsAction {
    meta: ActionMetadata,
}

impl AccountDetailsAction {
    pub fn new() -> Self {
        let examples = vec![ActionExample {
            input: json!({}),
            output: json!(
                "Successfully retrieved authenticated user account details:\n{\"data\":{\"id\":\"12345\",\"username\":\"agent\"}}"
            ),
            explanation: "Relay the profile payload for the authenticated account.".to_string(),
        }];

        // No schema: whatever the host sends is passed through untouched.
        let meta = ActionMetadata::new(
            "account_details",
            "retrieving authenticated user account details",
            "Get details for the currently authenticated Twitter (X) account. Takes no inputs; any provided arguments are ignored.",
        )
        .with_examples(examples);

        Self { meta }
    }
}

#[async_trait]
impl Action<dyn TwitterOperations> for AccountDetailsAction {
    fn metadata(&self) -> &ActionMetadata {
        &self.meta
    }

    async fn call(&self, twitter: &dyn TwitterOperations, _input: Value) -> Result<String> {
        let details = twitter.account_details().await?;
        Ok(format!(
            "Successfully retrieved authenticated user account details:\n{details}"
        ))
    }
}

// =============================================================================
// account_mentions - Recent tweets mentioning an account
// =============================================================================

#[derive(Debug)]
pub struct AccountMentionsAction {
    meta: ActionMetadata,
}

impl AccountMentionsAction {
    pub fn new() -> Self {
        let input_schema = InputSchema::new()
            .field(FieldSpec::required(
                "account_id",
                FieldKind::String,
                "The Twitter (X) user ID to return mentions for",
            ))
            .field(
                FieldSpec::optional(
                    "max_results",
                    FieldKind::Integer,
                    "Maximum number of mentions to return",
                )
                .with_default(json!(10)),
            );

        let examples = vec![ActionExample {
            input: json!({ "account_id": "12345" }),
            output: json!(
                "Successfully retrieved account mentions:\n{\"data\":[{\"id\":\"1\",\"text\":\"@agent hi\"}]}"
            ),
            explanation: "Fetch the ten most recent mentions of the account.".to_string(),
        }];

        let meta = ActionMetadata::new(
            "account_mentions",
            "retrieving account mentions",
            "Get recent tweets that mention a Twitter (X) account, newest first.",
        )
        .with_schema(input_schema)
        .with_examples(examples);

        Self { meta }
    }
}

#[async_trait]
impl Action<dyn TwitterOperations> for AccountMentionsAction {
    fn metadata(&self) -> &ActionMetadata {
        &self.meta
    }

    async fn call(&self, twitter: &dyn TwitterOperations, input: Value) -> Result<String> {
        #[derive(Deserialize)]
        struct Input {
            account_id: String,
            max_results: u64,
        }

        let parsed: Input = serde_json::from_value(input)?;
        let mentions = twitter
            .account_mentions(&parsed.account_id, parsed.max_results)
            .await?;

        Ok(format!(
            "Successfully retrieved account mentions:\n{mentions}"
        ))
    }
}

// =============================================================================
// post_tweet - Publish a tweet
// =============================================================================

#[derive(Debug)]
pub struct PostTweetAction {
    meta: ActionMetadata,
}

impl PostTweetAction {
    pub fn new() -> Self {
        let input_schema = InputSchema::new().field(
            FieldSpec::required(
                "tweet",
                FieldKind::String,
                "The text of the tweet to post; 280 characters maximum",
            )
            .with_max_length(TWEET_MAX_CHARS),
        );

        let examples = vec![ActionExample {
            input: json!({ "tweet": "hello world" }),
            output: json!(
                "Successfully posted to Twitter:\n{\"data\":{\"id\":\"1\",\"text\":\"hello world\"}}"
            ),
            explanation: "Post a short tweet from the authenticated account.".to_string(),
        }];

        let meta = ActionMetadata::new(
            "post_tweet",
            "posting tweet",
            "Post a tweet from the currently authenticated Twitter (X) account. Tweets are capped at 280 characters.",
        )
        .with_schema(input_schema)
        .with_examples(examples);

        Self { meta }
    }
}

#[async_trait]
impl Action<dyn TwitterOperations> for PostTweetAction {
    fn metadata(&self) -> &ActionMetadata {
        &self.meta
    }

    async fn call(&self, twitter: &dyn TwitterOperations, input: Value) -> Result<String> {
        #[derive(Deserialize)]
        struct Input {
            tweet: String,
        }

        let parsed: Input = serde_json::from_value(input)?;
        let response = twitter.create_tweet(&parsed.tweet, None).await?;

        Ok(format!("Successfully posted to Twitter:\n{response}"))
    }
}

// =============================================================================
// post_tweet_reply - Reply to an existing tweet
// =============================================================================

#[derive(Debug)]
pub struct PostTweetReplyAction {
    meta: ActionMetadata,
}

impl PostTweetReplyAction {
    pub fn new() -> Self {
        let input_schema = InputSchema::new()
            .field(FieldSpec::required(
                "tweet_id",
                FieldKind::String,
                "The ID of the tweet to reply to",
            ))
            .field(
                FieldSpec::required(
                    "tweet_reply",
                    FieldKind::String,
                    "The text of the reply; 280 characters maximum",
                )
                .with_max_length(TWEET_MAX_CHARS),
            );

        let examples = vec![ActionExample {
            input: json!({ "tweet_id": "777", "tweet_reply": "hello back" }),
            output: json!(
                "Successfully posted reply to Twitter:\n{\"data\":{\"id\":\"778\",\"text\":\"hello back\"}}"
            ),
            explanation: "Reply to tweet 777 from the authenticated account.".to_string(),
        }];

        let meta = ActionMetadata::new(
            "post_tweet_reply",
            "posting tweet reply",
            "Post a reply to an existing tweet from the currently authenticated Twitter (X) account. Replies are capped at 280 characters.",
        )
        .with_schema(input_schema)
        .with_examples(examples);

        Self { meta }
    }
}

#[async_trait]
impl Action<dyn TwitterOperations> for PostTweetReplyAction {
    fn metadata(&self) -> &ActionMetadata {
        &self.meta
    }

    async fn call(&self, twitter: &dyn TwitterOperations, input: Value) -> Result<String> {
        #[derive(Deserialize)]
        struct Input {
            tweet_id: String,
            tweet_reply: String,
        }

        let parsed: Input = serde_json::from_value(input)?;
        let response = twitter
            .create_tweet(&parsed.tweet_reply, Some(&parsed.tweet_id))
            .await?;

        Ok(format!("Successfully posted reply to Twitter:\n{response}"))
    }
}

// =============================================================================
// Register Twitter actions
// =============================================================================

pub fn register_twitter_actions(registry: &mut ActionRegistry<dyn TwitterOperations>) {
    registry.register(AccountDetailsAction::new());
    registry.register(AccountMentionsAction::new());
    registry.register(PostTweetAction::new());
    registry.register(PostTweetReplyAction::new());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_covers_every_twitter_action_once() {
        let mut registry: ActionRegistry<dyn TwitterOperations> = ActionRegistry::new();
        register_twitter_actions(&mut registry);
        assert_eq!(
            registry.names(),
            vec![
                "account_details",
                "account_mentions",
                "post_tweet",
                "post_tweet_reply",
            ]
        );
    }

    #[test]
    fn account_details_declares_no_schema() {
        let action = AccountDetailsAction::new();
        assert!(action.meta.input_schema.is_none());
    }

    #[test]
    fn tweets_over_280_characters_fail_validation() {
        let action = PostTweetAction::new();
        let schema = action.meta.input_schema.as_ref().unwrap();
        let long = "x".repeat(281);
        assert!(schema.validate(&json!({ "tweet": long })).is_err());
        let exact = "x".repeat(280);
        assert!(schema.validate(&json!({ "tweet": exact })).is_ok());
    }

    #[test]
    fn mentions_default_to_ten_results() {
        let action = AccountMentionsAction::new();
        let schema = action.meta.input_schema.as_ref().unwrap();
        let args = schema.validate(&json!({ "account_id": "12345" })).unwrap();
        assert_eq!(args.get("max_results"), Some(&json!(10)));
    }
}

//! Farcaster actions.
//!
//! Includes:
//! - agent account details
//! - publishing casts

use async_trait::async_trait;
use anyhow::Result;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::actions::{Action, ActionExample, ActionMetadata, ActionRegistry};
use crate::schema::{FieldKind, FieldSpec, InputSchema};
use agent_actions_farcaster::FarcasterOperations;

const CAST_MAX_CHARS: usize = 320;

// =============================================================================
// account_details - The agent's Farcaster profile
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
                "Successfully retrieved Farcaster account details:\n{\"users\":[{\"fid\":42,\"username\":\"agent\"}]}"
            ),
            explanation: "Relay the profile payload for the agent's account.".to_string(),
        }];

        // No schema: whatever the host sends is passed through untouched.
        let meta = ActionMetadata::new(
            "account_details",
            "retrieving Farcaster account details",
            "Get details for the agent's Farcaster account. Takes no inputs; any provided arguments are ignored.",
        )
        .with_examples(examples);

        Self { meta }
    }
}

#[async_trait]
impl Action<dyn FarcasterOperations> for AccountDetailsAction {
    fn metadata(&self) -> &ActionMetadata {
        &self.meta
    }

    async fn call(&self, farcaster: &dyn FarcasterOperations, _input: Value) -> Result<String> {
        let details = farcaster.account_details().await?;
        Ok(format!(
            "Successfully retrieved Farcaster account details:\n{details}"
        ))
    }
}

// =============================================================================
// publish_cast - Publish a cast from the agent's account
// =============================================================================

#[derive(Debug)]
pub struct PublishCastAction {
    meta: ActionMetadata,
}

impl PublishCastAction {
    pub fn new() -> Self {
        let input_schema = InputSchema::new().field(
            FieldSpec::required(
                "cast",
                FieldKind::String,
                "The text of the cast to publish; 320 characters maximum",
            )
            .with_max_length(CAST_MAX_CHARS),
        );

        let examples = vec![ActionExample {
            input: json!({ "cast": "gm" }),
            output: json!(
                "Successfully published cast to Farcaster:\n{\"success\":true,\"cast\":{\"hash\":\"0xcast\",\"text\":\"gm\"}}"
            ),
            explanation: "Publish a short cast from the agent's account.".to_string(),
        }];

        let meta = ActionMetadata::new(
            "publish_cast",
            "publishing cast",
            "Publish a cast to Farcaster from the agent's account. Casts are capped at 320 characters.",
        )
        .with_schema(input_schema)
        .with_examples(examples);

        Self { meta }
    }
}

#[async_trait]
impl Action<dyn FarcasterOperations> for PublishCastAction {
    fn metadata(&self) -> &ActionMetadata {
        &self.meta
    }

    async fn call(&self, farcaster: &dyn FarcasterOperations, input: Value) -> Result<String> {
        #[derive(Deserialize)]
        struct Input {
            cast: String,
        }

        let parsed: Input = serde_json::from_value(input)?;
        let response = farcaster.publish_cast(&parsed.cast).await?;

        Ok(format!("Successfully published cast to Farcaster:\n{response}"))
    }
}

// =============================================================================
// Register Farcaster actions
// =============================================================================

pub fn register_farcaster_actions(registry: &mut ActionRegistry<dyn FarcasterOperations>) {
    registry.register(AccountDetailsAction::new());
    registry.register(PublishCastAction::new());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_covers_every_farcaster_action_once() {
        let mut registry: ActionRegistry<dyn FarcasterOperations> = ActionRegistry::new();
        register_farcaster_actions(&mut registry);
        assert_eq!(registry.names(), vec!["account_details", "publish_cast"]);
    }

    #[test]
    fn casts_get_the_longer_320_character_cap() {
        let action = PublishCastAction::new();
        let schema = action.meta.input_schema.as_ref().unwrap();
        assert!(schema
            .validate(&json!({ "cast": "x".repeat(320) }))
            .is_ok());
        assert!(schema
            .validate(&json!({ "cast": "x".repeat(321) }))
            .is_err());
    }
}

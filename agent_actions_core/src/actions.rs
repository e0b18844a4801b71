use std::sync::Arc;

use async_trait::async_trait;
use anyhow::Result;
use serde_json::Value;

use crate::schema::InputSchema;

/// A worked example shown to the model as part of an action's prompt.
#[derive(Debug, Clone)]
pub struct ActionExample {
    pub input: Value,
    pub output: Value,
    pub explanation: String,
}

/// Static description of one action: the name the model calls it by, the
/// prose that teaches the model when to use it, the phrase spliced into
/// failure messages, and the declared input schema.
///
/// `input_schema: None` means the action takes free-form input and the raw
/// arguments reach the handler untouched.
#[derive(Debug, Clone)]
pub struct ActionMetadata {
    pub name: String,
    pub description: String,
    pub error_context: String,
    pub input_schema: Option<InputSchema>,
    pub examples: Vec<ActionExample>,
}

impl ActionMetadata {
    /// `error_context` is a present-participle phrase, e.g. `posting tweet`,
    /// so failures read `Error posting tweet: ...`.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty or whitespace. A nameless action cannot be
    /// called by anything, so this is a programming error, not input.
    pub fn new(name: &str, error_context: &str, description: &str) -> Self {
        assert!(!name.trim().is_empty(), "action name must not be empty");
        Self {
            name: name.to_string(),
            description: description.to_string(),
            error_context: error_context.to_string(),
            input_schema: None,
            examples: Vec::new(),
        }
    }

    pub fn with_schema(mut self, schema: InputSchema) -> Self {
        self.input_schema = Some(schema);
        self
    }

    pub fn with_examples(mut self, examples: Vec<ActionExample>) -> Self {
        self.examples = examples;
        self
    }

    /// Prompt text handed to the model: the description followed by any
    /// worked examples.
    pub fn prompt(&self) -> String {
        let mut prompt = self.description.clone();
        for example in &self.examples {
            prompt.push_str("\n\nExample input: ");
            prompt.push_str(&example.input.to_string());
            prompt.push_str("\nExample output: ");
            prompt.push_str(&example.output.to_string());
            prompt.push('\n');
            prompt.push_str(&example.explanation);
        }
        prompt
    }
}

/// One invocable action against a collaborator of type `C`.
///
/// `C` is usually a capability trait object such as `dyn WalletOperations`,
/// so the same action works against the hosted client in production and a
/// hand-rolled mock in tests.
#[async_trait]
pub trait Action<C>: Send + Sync
where
    C: ?Sized + Send + Sync,
{
    fn metadata(&self) -> &ActionMetadata;

    /// Run the action. `input` has already been validated against the
    /// metadata's schema, if one is declared.
    async fn call(&self, collaborator: &C, input: Value) -> Result<String>;
}

/// Actions for one collaborator type, in registration order.
///
/// The registry itself accepts duplicate names; collisions only become an
/// error when a toolkit is built from it.
pub struct ActionRegistry<C: ?Sized + Send + Sync> {
    actions: Vec<Arc<dyn Action<C>>>,
}

impl<C: ?Sized + Send + Sync> ActionRegistry<C> {
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
        }
    }

    pub fn register<A>(&mut self, action: A)
    where
        A: Action<C> + 'static,
    {
        self.actions.push(Arc::new(action));
    }

    /// Snapshot of everything registered so far, in registration order.
    /// Later registrations do not show up in a snapshot already taken.
    pub fn all(&self) -> Vec<Arc<dyn Action<C>>> {
        self.actions.clone()
    }

    /// First registered action with the given name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Action<C>>> {
        self.actions
            .iter()
            .find(|action| action.metadata().name == name)
            .cloned()
    }

    pub fn names(&self) -> Vec<String> {
        self.actions
            .iter()
            .map(|action| action.metadata().name.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl<C: ?Sized + Send + Sync> Default for ActionRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

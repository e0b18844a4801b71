//! Binding actions to a collaborator for host agent frameworks.
//!
//! A [`Toolkit`] is what gets handed to a LangChain-style host: every action
//! of one family bound to one collaborator, each exposed as a named tool.
//! Tools always answer with a string. Success is the handler's result;
//! failure is a sentence starting with `Error`, so the model can read what
//! went wrong and try again instead of the host blowing up.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::actions::{Action, ActionRegistry};
use crate::schema::ValidationError;

/// Failure while invoking one tool. Kept structured internally so tests can
/// tell a rejected input from a failed handler; flattened to a string at the
/// host boundary by [`ActionTool::invoke`].
#[derive(Debug, Error)]
pub enum InvokeError {
    /// The input was rejected before the handler ran.
    #[error("Error validating input: {0}")]
    Validation(#[from] ValidationError),
    /// The handler, or the collaborator behind it, failed.
    #[error("Error {context}: {cause:#}")]
    Action {
        context: String,
        cause: anyhow::Error,
    },
}

/// Failure while assembling a toolkit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolkitError {
    /// Two actions answer to the same name. The host dispatches by name, so
    /// such a toolkit could silently drop one of them.
    #[error("duplicate action name `{0}` in toolkit")]
    DuplicateAction(String),
}

/// One action bound to one collaborator.
pub struct ActionTool<C: ?Sized + Send + Sync> {
    action: Arc<dyn Action<C>>,
    collaborator: Arc<C>,
}

impl<C: ?Sized + Send + Sync> ActionTool<C> {
    pub fn new(action: Arc<dyn Action<C>>, collaborator: Arc<C>) -> Self {
        Self {
            action,
            collaborator,
        }
    }

    pub fn name(&self) -> &str {
        &self.action.metadata().name
    }

    /// Prompt text the host shows the model for this tool.
    pub fn description(&self) -> String {
        self.action.metadata().prompt()
    }

    /// JSON Schema for the tool's arguments, or `None` when the action
    /// takes free-form input.
    pub fn args_schema(&self) -> Option<Value> {
        self.action
            .metadata()
            .input_schema
            .as_ref()
            .map(|schema| schema.to_json_schema())
    }

    /// The tool in the shape hosts register: name, description, parameters.
    /// Schemaless actions advertise an open object.
    pub fn definition(&self) -> Value {
        let parameters = self.args_schema().unwrap_or_else(|| {
            json!({
                "type": "object",
                "properties": {},
                "additionalProperties": true,
            })
        });
        json!({
            "name": self.name(),
            "description": self.description(),
            "parameters": parameters,
        })
    }

    /// Validate and dispatch, keeping the outcome tagged.
    ///
    /// With a declared schema the handler only ever sees validated
    /// arguments; a rejected input never reaches it. Without one the raw
    /// input passes through untouched, non-objects included.
    pub async fn try_invoke(&self, input: Value) -> Result<String, InvokeError> {
        let metadata = self.action.metadata();
        let prepared = match &metadata.input_schema {
            Some(schema) => schema.validate(&input)?.into_value(),
            None => input,
        };
        debug!(action = %metadata.name, "dispatching action");
        self.action
            .call(self.collaborator.as_ref(), prepared)
            .await
            .map_err(|cause| InvokeError::Action {
                context: metadata.error_context.clone(),
                cause,
            })
    }

    /// Invoke for a host framework. Every outcome is a string; nothing is
    /// raised across this boundary.
    pub async fn invoke(&self, input: Value) -> String {
        match self.try_invoke(input).await {
            Ok(result) => result,
            Err(error) => {
                warn!(action = %self.name(), %error, "action failed");
                error.to_string()
            }
        }
    }
}

/// Every action of one family bound to one collaborator, names guaranteed
/// unique.
pub struct Toolkit<C: ?Sized + Send + Sync> {
    tools: Vec<ActionTool<C>>,
}

impl<C: ?Sized + Send + Sync> Toolkit<C> {
    /// Bind each action in `registry` to `collaborator`, in registration
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`ToolkitError::DuplicateAction`] if two registered actions
    /// share a name.
    pub fn build(collaborator: Arc<C>, registry: &ActionRegistry<C>) -> Result<Self, ToolkitError> {
        let mut seen = HashSet::new();
        let mut tools = Vec::new();
        for action in registry.all() {
            let name = action.metadata().name.clone();
            if !seen.insert(name.clone()) {
                return Err(ToolkitError::DuplicateAction(name));
            }
            tools.push(ActionTool::new(action, Arc::clone(&collaborator)));
        }
        Ok(Self { tools })
    }

    pub fn tools(&self) -> &[ActionTool<C>] {
        &self.tools
    }

    pub fn get(&self, name: &str) -> Option<&ActionTool<C>> {
        self.tools.iter().find(|tool| tool.name() == name)
    }

    pub fn names(&self) -> Vec<String> {
        self.tools.iter().map(|tool| tool.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Definitions for registering every tool with a host framework, in
    /// toolkit order.
    pub fn tool_definitions(&self) -> Vec<Value> {
        self.tools.iter().map(|tool| tool.definition()).collect()
    }

    /// Dispatch by name. An unknown name comes back as an error string like
    /// any other failure; the host only ever sees text.
    pub async fn invoke(&self, name: &str, input: Value) -> String {
        match self.get(name) {
            Some(tool) => tool.invoke(input).await,
            None => format!("Error: no action named `{name}` in this toolkit"),
        }
    }
}

impl<C: ?Sized + Send + Sync> fmt::Debug for Toolkit<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Toolkit").field("tools", &self.names()).finish()
    }
}

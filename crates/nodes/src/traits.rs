//! The `ExecutableNode` trait — the contract every node must fulfil.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{NodeError, NodeItem, ParameterError};

/// Shared context passed to every node during execution.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    /// ID of the current execution run, used to correlate log lines.
    pub execution_id: uuid::Uuid,
    /// Name of the node instance inside the workflow.
    pub node_name: String,
    /// When set, a failing item produces an error item and the batch goes on.
    pub continue_on_fail: bool,
}

impl ExecutionContext {
    pub fn new(node_name: impl Into<String>) -> Self {
        Self {
            execution_id: uuid::Uuid::new_v4(),
            node_name: node_name.into(),
            continue_on_fail: false,
        }
    }

    pub fn with_continue_on_fail(mut self, continue_on_fail: bool) -> Self {
        self.continue_on_fail = continue_on_fail;
        self
    }
}

/// Source of the user-configured parameter values (get-parameter).
///
/// Values are resolved per input item so hosts that evaluate expressions
/// against the item can return different values for each index.
pub trait NodeParameters: Send + Sync {
    /// Raw value of `name` for input item `item_index`, if set.
    fn raw(&self, name: &str, item_index: usize) -> Option<Value>;
}

impl<'a> dyn NodeParameters + 'a {
    /// Typed value of `name`; `None` when absent or null.
    pub fn optional<T: DeserializeOwned>(
        &self,
        name: &str,
        item_index: usize,
    ) -> Result<Option<T>, ParameterError> {
        match self.raw(name, item_index) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| ParameterError::invalid(name, e.to_string())),
        }
    }

    /// Typed value of `name`, failing with [`ParameterError::Missing`] when unset.
    pub fn required<T: DeserializeOwned>(
        &self,
        name: &str,
        item_index: usize,
    ) -> Result<T, ParameterError> {
        self.optional(name, item_index)?
            .ok_or_else(|| ParameterError::Missing(name.to_owned()))
    }
}

/// A static parameter tree: a JSON object whose top-level keys are parameter
/// names. Every item sees the same values.
impl NodeParameters for Value {
    fn raw(&self, name: &str, _item_index: usize) -> Option<Value> {
        self.get(name).cloned()
    }
}

/// The core node trait.
#[async_trait]
pub trait ExecutableNode: Send + Sync {
    /// Process every input item in order and return the output items.
    async fn execute(
        &self,
        items: Vec<NodeItem>,
        params: &dyn NodeParameters,
        ctx: &ExecutionContext,
    ) -> Result<Vec<NodeItem>, NodeError>;
}

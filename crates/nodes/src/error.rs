//! Node-level error types.

use thiserror::Error;

/// Errors returned by a node's `execute` method.
///
/// Both variants abort the whole batch. The host decides how to present them:
/// - `Api`       — the remote service answered with an error response.
/// - `Operation` — the node itself could not complete the call (bad
///   parameters, unreachable host, unexpected payload).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NodeError {
    /// The remote API rejected the request.
    #[error("{message}")]
    Api {
        message: String,
        /// Context such as `Operation: socialPost.create`.
        description: String,
    },

    /// The node failed before or outside of an API response.
    #[error("{message}")]
    Operation {
        message: String,
        description: String,
        /// Index of the input item being processed, when known.
        item_index: Option<usize>,
    },
}

impl NodeError {
    /// The user-facing message.
    pub fn message(&self) -> &str {
        match self {
            NodeError::Api { message, .. } | NodeError::Operation { message, .. } => message,
        }
    }

    /// The resource/operation context attached to the failure.
    pub fn description(&self) -> &str {
        match self {
            NodeError::Api { description, .. } | NodeError::Operation { description, .. } => {
                description
            }
        }
    }
}

/// Errors raised while reading a node parameter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParameterError {
    /// A required parameter is absent (or empty).
    #[error("missing required parameter '{0}'")]
    Missing(String),

    /// The parameter exists but does not have the expected shape.
    #[error("invalid value for parameter '{name}': {reason}")]
    Invalid { name: String, reason: String },
}

impl ParameterError {
    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        ParameterError::Invalid {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

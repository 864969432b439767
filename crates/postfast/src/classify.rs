//! Maps failed calls onto user-facing messages.

use serde_json::Value;
use thiserror::Error;

use nodes::{NodeError, ParameterError, RequestError};

use crate::command::{Operation, Resource};

/// Anything that can go wrong while processing one input item.
#[derive(Debug, Error)]
pub enum ItemFailure {
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error(transparent)]
    Request(#[from] RequestError),
}

/// Classified failure; `Display` is the message shown to the user.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiFailure {
    #[error("Authentication failed. Please check your API key in the PostFast credentials.")]
    AuthFailure,

    #[error("Resource not found. Please check the endpoint or ID.")]
    NotFound,

    #[error("Rate limit exceeded. Please wait before making more requests. Note: X (Twitter) has a limit of 5 posts per account per day.")]
    RateLimited,

    #[error("Invalid request: {0}. Please check your input parameters.")]
    Validation(String),

    #[error("PostFast API Error ({status}): {detail}")]
    RemoteApi { status: u16, detail: String },

    #[error("Cannot connect to PostFast API. Please check your API key and network connection.")]
    Connectivity,

    #[error("Unexpected error during {operation}: {detail}")]
    Unexpected { operation: String, detail: String },
}

impl ApiFailure {
    /// Whether the failure came from an API response rather than from the node.
    pub fn is_api_response(&self) -> bool {
        matches!(
            self,
            ApiFailure::AuthFailure
                | ApiFailure::NotFound
                | ApiFailure::RateLimited
                | ApiFailure::Validation(_)
                | ApiFailure::RemoteApi { .. }
        )
    }

    /// Converts into the batch-aborting node error, tagged with the
    /// resource/operation that failed.
    pub fn into_node_error(
        self,
        resource: Resource,
        operation: Operation,
        item_index: usize,
    ) -> NodeError {
        let description = format!("Operation: {resource}.{operation}");
        if self.is_api_response() {
            NodeError::Api {
                message: self.to_string(),
                description,
            }
        } else {
            NodeError::Operation {
                message: self.to_string(),
                description,
                item_index: Some(item_index),
            }
        }
    }
}

/// Classifies `failure` raised while running `operation`.
///
/// Status precedence is 401, 404, 429, 400, then any other status. Transport
/// failures are either connectivity problems or unexpected.
pub fn classify(failure: &ItemFailure, operation: Operation) -> ApiFailure {
    match failure {
        ItemFailure::Request(RequestError::Status {
            status,
            body,
            message,
        }) => match status {
            401 => ApiFailure::AuthFailure,
            404 => ApiFailure::NotFound,
            429 => ApiFailure::RateLimited,
            400 => ApiFailure::Validation(server_detail(body.as_ref(), message)),
            _ => ApiFailure::RemoteApi {
                status: *status,
                detail: server_detail(body.as_ref(), message),
            },
        },
        ItemFailure::Request(RequestError::Connection(_)) => ApiFailure::Connectivity,
        other => ApiFailure::Unexpected {
            operation: operation.to_string(),
            detail: other.to_string(),
        },
    }
}

/// `body.message`, then `body.error`, then the transport's own message.
fn server_detail(body: Option<&Value>, fallback: &str) -> String {
    body.and_then(|b| {
        ["message", "error"]
            .iter()
            .find_map(|key| detail_text(b.get(*key)?))
    })
    .unwrap_or_else(|| fallback.to_owned())
}

fn detail_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        // Validation errors sometimes come back as a list of messages.
        Value::Array(parts) => {
            let parts: Vec<String> = parts
                .iter()
                .map(|p| p.as_str().map_or_else(|| p.to_string(), str::to_owned))
                .collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        other => Some(other.to_string()),
    }
}

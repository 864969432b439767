//! The authenticated-request helper a host provides to its nodes.
//!
//! A node describes the call it wants as [`HttpRequestOptions`]; the helper
//! attaches credentials, performs the call and decodes the JSON answer.

use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single JSON request, relative to the credential's base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequestOptions {
    pub method: HttpMethod,
    /// Path beginning with `/`, e.g. `/social-posts`.
    pub path: String,
    pub body: Option<Value>,
    pub query: BTreeMap<String, String>,
}

impl HttpRequestOptions {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            query: BTreeMap::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(HttpMethod::Post, path).with_body(body)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.insert(key.into(), value.to_string());
        self
    }
}

/// Failure of an authenticated request.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RequestError {
    /// The server answered with a non-success status.
    #[error("{message}")]
    Status {
        status: u16,
        /// Decoded JSON error body, when the server sent one.
        body: Option<Value>,
        message: String,
    },

    /// The host could not be reached (connection refused, DNS failure).
    #[error("{0}")]
    Connection(String),

    /// Any other transport or decoding failure.
    #[error("{0}")]
    Transport(String),
}

impl RequestError {
    /// HTTP status of the response, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Make-authenticated-request: performs a call with the node's credentials.
#[async_trait]
pub trait AuthenticatedRequest: Send + Sync {
    /// Send `options` and return the decoded JSON body (`Value::Null` when empty).
    async fn request(&self, options: &HttpRequestOptions) -> Result<Value, RequestError>;
}

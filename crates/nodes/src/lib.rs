//! `nodes` crate — the host-side contract every integration node is written against.
//!
//! A node implements [`ExecutableNode`]. The host hands it the input items,
//! a [`NodeParameters`] source (get-parameter) and, through the node's own
//! construction, an [`AuthenticatedRequest`] helper (make-authenticated-request).
//! Nothing in this crate knows about a specific remote API.

pub mod error;
pub mod http;
pub mod item;
pub mod mock;
pub mod traits;

pub use error::{NodeError, ParameterError};
pub use http::{AuthenticatedRequest, HttpMethod, HttpRequestOptions, RequestError};
pub use item::{NodeItem, PairedItem};
pub use traits::{ExecutableNode, ExecutionContext, NodeParameters};

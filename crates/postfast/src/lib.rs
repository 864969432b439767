//! `postfast` crate — the PostFast social-media node.
//!
//! Maps a (resource, operation) pair plus the user's parameter tree onto calls
//! against the PostFast REST API and turns the answers back into node items.

pub mod classify;
pub mod client;
pub mod command;
pub mod credentials;
pub mod description;
pub mod node;
pub mod normalize;
pub mod pagination;
pub mod posts;
pub mod serde_util;

pub use classify::{classify, ApiFailure, ItemFailure};
pub use client::PostFastClient;
pub use command::{Command, Operation, Resource};
pub use credentials::PostFastCredentials;
pub use node::PostFastNode;

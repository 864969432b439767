//! Static description of the node: what a host lists in its node picker.

use serde::Serialize;

use crate::command::{Operation, Resource};
use crate::credentials::CREDENTIAL_NAME;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationDescription {
    pub value: Operation,
    pub name: &'static str,
    pub action: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDescription {
    pub value: Resource,
    pub name: &'static str,
    pub description: &'static str,
    pub default_operation: Operation,
    pub operations: Vec<OperationDescription>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescription {
    pub name: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub version: u32,
    pub credential: &'static str,
    pub default_resource: Resource,
    pub resources: Vec<ResourceDescription>,
}

fn resource_text(resource: Resource) -> (&'static str, &'static str) {
    match resource {
        Resource::File => ("File", "Manage file uploads"),
        Resource::SocialAccount => ("Social Account", "Manage social media accounts"),
        Resource::SocialPost => ("Social Post", "Create and manage social media posts"),
    }
}

fn operation_text(operation: Operation) -> (&'static str, &'static str, &'static str) {
    match operation {
        Operation::GetUploadUrl => (
            "Get Upload URL",
            "Get upload URL",
            "Generate pre-signed URLs for uploading media files",
        ),
        Operation::GetAll => (
            "Get All",
            "Get all social accounts",
            "Get all connected social media accounts",
        ),
        Operation::GetPinterestBoards => (
            "Get Pinterest Boards",
            "Get Pinterest boards",
            "Get Pinterest boards for a connected account",
        ),
        Operation::GetYoutubePlaylists => (
            "Get YouTube Playlists",
            "Get YouTube playlists",
            "Get YouTube playlists for a connected account",
        ),
        Operation::Create => (
            "Create",
            "Create social posts",
            "Create and schedule one or more social media posts",
        ),
        Operation::Delete => (
            "Delete",
            "Delete social post",
            "Delete a scheduled or failed post",
        ),
        Operation::GetMany => (
            "Get Many",
            "Get many social posts",
            "Query and paginate social posts",
        ),
    }
}

/// Full description of the PostFast node.
pub fn describe() -> NodeDescription {
    let resources = Resource::ALL
        .iter()
        .map(|&resource| {
            let (name, description) = resource_text(resource);
            ResourceDescription {
                value: resource,
                name,
                description,
                default_operation: resource.default_operation(),
                operations: resource
                    .operations()
                    .iter()
                    .map(|&op| {
                        let (name, action, description) = operation_text(op);
                        OperationDescription {
                            value: op,
                            name,
                            action,
                            description,
                        }
                    })
                    .collect(),
            }
        })
        .collect();

    NodeDescription {
        name: "postFast",
        display_name: "PostFast - Social Media Management",
        description: "Schedule and manage social media posts across Facebook, Instagram, TikTok, Twitter/X, LinkedIn, YouTube, and Pinterest",
        version: 1,
        credential: CREDENTIAL_NAME,
        default_resource: Resource::default(),
        resources,
    }
}

/// Subtitle shown under the node, e.g. `getMany: socialPost`.
pub fn subtitle(resource: Resource, operation: Operation) -> String {
    format!("{operation}: {resource}")
}

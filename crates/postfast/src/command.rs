//! Resource/operation dispatch.
//!
//! A [`Command`] is one fully-read API call. `Command::from_parameters` pulls
//! the parameters an operation needs for one input item; `Command::request`
//! is a pure mapping from the command to the HTTP call.

use std::fmt;

use serde::{Deserialize, Serialize};

use nodes::{HttpRequestOptions, NodeParameters, ParameterError};

use crate::posts::{build_posts, ApprovalStatus, Controls, CreatePostsBody, PostStatus, PostsInput};
use crate::serde_util::empty_as_none;

/// Largest page the listing endpoint serves.
pub const MAX_PAGE_SIZE: u32 = 50;
/// Page size used when the user does not pick one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;
/// Upper bound on signed upload URLs per call.
pub const MAX_UPLOAD_URLS: u32 = 10;

// ---------------------------------------------------------------------------
// Resource / Operation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Resource {
    File,
    SocialAccount,
    #[default]
    SocialPost,
}

impl Resource {
    pub const ALL: [Resource; 3] = [Resource::File, Resource::SocialAccount, Resource::SocialPost];

    pub fn as_str(self) -> &'static str {
        match self {
            Resource::File => "file",
            Resource::SocialAccount => "socialAccount",
            Resource::SocialPost => "socialPost",
        }
    }

    /// Operations valid for this resource, in display order.
    pub fn operations(self) -> &'static [Operation] {
        match self {
            Resource::File => &[Operation::GetUploadUrl],
            Resource::SocialAccount => &[
                Operation::GetAll,
                Operation::GetPinterestBoards,
                Operation::GetYoutubePlaylists,
            ],
            Resource::SocialPost => &[Operation::Create, Operation::Delete, Operation::GetMany],
        }
    }

    /// Operation picked when none is configured.
    pub fn default_operation(self) -> Operation {
        match self {
            Resource::File => Operation::GetUploadUrl,
            Resource::SocialAccount => Operation::GetAll,
            Resource::SocialPost => Operation::Create,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    GetUploadUrl,
    GetAll,
    GetPinterestBoards,
    GetYoutubePlaylists,
    Create,
    Delete,
    GetMany,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::GetUploadUrl => "getUploadUrl",
            Operation::GetAll => "getAll",
            Operation::GetPinterestBoards => "getPinterestBoards",
            Operation::GetYoutubePlaylists => "getYoutubePlaylists",
            Operation::Create => "create",
            Operation::Delete => "delete",
            Operation::GetMany => "getMany",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reads `resource` and `operation` (item 0) and checks they belong together.
pub fn selected_operation(
    params: &dyn NodeParameters,
) -> Result<(Resource, Operation), ParameterError> {
    let resource: Resource = params.optional("resource", 0)?.unwrap_or_default();
    let operation = params
        .optional("operation", 0)?
        .unwrap_or_else(|| resource.default_operation());

    if !resource.operations().contains(&operation) {
        return Err(ParameterError::invalid(
            "operation",
            format!("'{operation}' is not available for resource '{resource}'"),
        ));
    }
    Ok((resource, operation))
}

// ---------------------------------------------------------------------------
// Listing filters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Platform {
    Facebook,
    Instagram,
    Tiktok,
    X,
    Linkedin,
    Youtube,
    Pinterest,
}

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Facebook => "FACEBOOK",
            Platform::Instagram => "INSTAGRAM",
            Platform::Tiktok => "TIKTOK",
            Platform::X => "X",
            Platform::Linkedin => "LINKEDIN",
            Platform::Youtube => "YOUTUBE",
            Platform::Pinterest => "PINTEREST",
        }
    }
}

/// Lifecycle state a listed post can be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostState {
    Draft,
    Scheduled,
    Published,
    Failed,
}

impl PostState {
    pub fn as_str(self) -> &'static str {
        match self {
            PostState::Draft => "DRAFT",
            PostState::Scheduled => "SCHEDULED",
            PostState::Published => "PUBLISHED",
            PostState::Failed => "FAILED",
        }
    }
}

/// The optional `filters` collection of `socialPost.getMany`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilters {
    #[serde(default)]
    pub platforms: Vec<Platform>,
    #[serde(default)]
    pub statuses: Vec<PostState>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub from: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub to: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub page: Option<u32>,
}

/// A `GET /social-posts` query.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPosts {
    /// Walk every page instead of fetching one.
    pub return_all: bool,
    /// Page size, already capped to [`MAX_PAGE_SIZE`].
    pub limit: u32,
    pub filters: ListFilters,
}

impl ListPosts {
    pub fn request(&self) -> HttpRequestOptions {
        let f = &self.filters;
        let mut req = HttpRequestOptions::get("/social-posts")
            .with_query("limit", self.limit)
            .with_query("page", f.page.unwrap_or(0));

        if !f.platforms.is_empty() {
            let joined: Vec<&str> = f.platforms.iter().map(|p| p.as_str()).collect();
            req = req.with_query("platforms", joined.join(","));
        }
        if !f.statuses.is_empty() {
            let joined: Vec<&str> = f.statuses.iter().map(|s| s.as_str()).collect();
            req = req.with_query("statuses", joined.join(","));
        }
        if let Some(from) = &f.from {
            req = req.with_query("from", from);
        }
        if let Some(to) = &f.to {
            req = req.with_query("to", to);
        }
        req
    }
}

// ---------------------------------------------------------------------------
// Uploads
// ---------------------------------------------------------------------------

/// MIME types the upload endpoint signs URLs for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UploadContentType {
    #[default]
    #[serde(rename = "image/jpeg")]
    Jpeg,
    #[serde(rename = "image/png")]
    Png,
    #[serde(rename = "image/gif")]
    Gif,
    #[serde(rename = "video/mp4")]
    Mp4,
    #[serde(rename = "video/quicktime")]
    QuickTime,
    #[serde(rename = "application/pdf")]
    Pdf,
    #[serde(rename = "application/msword")]
    Doc,
    #[serde(rename = "application/vnd.openxmlformats-officedocument.wordprocessingml.document")]
    Docx,
    #[serde(rename = "application/vnd.ms-powerpoint")]
    Ppt,
    #[serde(rename = "application/vnd.openxmlformats-officedocument.presentationml.presentation")]
    Pptx,
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// One API call, with every parameter already read and validated.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    GetUploadUrl {
        content_type: UploadContentType,
        count: u32,
    },
    GetSocialAccounts,
    GetPinterestBoards {
        social_media_id: String,
    },
    GetYoutubePlaylists {
        social_media_id: String,
    },
    CreatePosts(CreatePostsBody),
    GetManyPosts(ListPosts),
    DeletePost {
        post_id: String,
    },
}

impl Command {
    /// Reads the parameters `operation` needs for input item `item_index`.
    pub fn from_parameters(
        resource: Resource,
        operation: Operation,
        params: &dyn NodeParameters,
        item_index: usize,
    ) -> Result<Self, ParameterError> {
        let i = item_index;
        let command = match (resource, operation) {
            (Resource::File, Operation::GetUploadUrl) => {
                let count: u32 = params.optional("count", i)?.unwrap_or(1);
                if !(1..=MAX_UPLOAD_URLS).contains(&count) {
                    return Err(ParameterError::invalid(
                        "count",
                        format!("must be between 1 and {MAX_UPLOAD_URLS}, got {count}"),
                    ));
                }
                Command::GetUploadUrl {
                    content_type: params.optional("contentType", i)?.unwrap_or_default(),
                    count,
                }
            }

            (Resource::SocialAccount, Operation::GetAll) => Command::GetSocialAccounts,
            (Resource::SocialAccount, Operation::GetPinterestBoards) => {
                Command::GetPinterestBoards {
                    social_media_id: required_id(params, "socialMediaId", i)?,
                }
            }
            (Resource::SocialAccount, Operation::GetYoutubePlaylists) => {
                Command::GetYoutubePlaylists {
                    social_media_id: required_id(params, "socialMediaId", i)?,
                }
            }

            (Resource::SocialPost, Operation::Create) => {
                let posts: PostsInput = params.optional("posts", i)?.unwrap_or_default();
                let controls: Controls = params.optional("controls", i)?.unwrap_or_default();
                let controls = controls
                    .into_body()
                    .map_err(|e| ParameterError::invalid("controls", e.to_string()))?;

                Command::CreatePosts(CreatePostsBody {
                    posts: build_posts(posts),
                    status: params.optional::<PostStatus>("status", i)?.unwrap_or_default(),
                    approval_status: params
                        .optional::<ApprovalStatus>("approvalStatus", i)?
                        .unwrap_or_default(),
                    controls,
                })
            }
            (Resource::SocialPost, Operation::GetMany) => {
                let return_all: bool = params.optional("returnAll", i)?.unwrap_or(false);
                let limit = if return_all {
                    MAX_PAGE_SIZE
                } else {
                    params
                        .optional::<u32>("limit", i)?
                        .unwrap_or(DEFAULT_PAGE_SIZE)
                        .clamp(1, MAX_PAGE_SIZE)
                };
                Command::GetManyPosts(ListPosts {
                    return_all,
                    limit,
                    filters: params.optional("filters", i)?.unwrap_or_default(),
                })
            }
            (Resource::SocialPost, Operation::Delete) => Command::DeletePost {
                post_id: required_id(params, "postId", i)?,
            },

            (resource, operation) => {
                return Err(ParameterError::invalid(
                    "operation",
                    format!("'{operation}' is not available for resource '{resource}'"),
                ))
            }
        };
        Ok(command)
    }

    /// The HTTP call for this command. For a return-all listing this is the
    /// first page; the pagination loop rewrites `page`.
    pub fn request(&self) -> Result<HttpRequestOptions, ParameterError> {
        let req = match self {
            Command::GetUploadUrl {
                content_type,
                count,
            } => HttpRequestOptions::post(
                "/file/get-signed-upload-urls",
                serde_json::json!({ "contentType": content_type, "count": count }),
            ),
            Command::GetSocialAccounts => HttpRequestOptions::get("/social-media/my-social-accounts"),
            Command::GetPinterestBoards { social_media_id } => {
                HttpRequestOptions::get(format!("/social-media/{social_media_id}/pinterest-boards"))
            }
            Command::GetYoutubePlaylists { social_media_id } => {
                HttpRequestOptions::get(format!("/social-media/{social_media_id}/youtube-playlists"))
            }
            Command::CreatePosts(body) => {
                let body = serde_json::to_value(body)
                    .map_err(|e| ParameterError::invalid("posts", e.to_string()))?;
                HttpRequestOptions::post("/social-posts", body)
            }
            Command::GetManyPosts(list) => list.request(),
            Command::DeletePost { post_id } => {
                HttpRequestOptions::delete(format!("/social-posts/{post_id}"))
            }
        };
        Ok(req)
    }
}

fn required_id(
    params: &dyn NodeParameters,
    name: &str,
    item_index: usize,
) -> Result<String, ParameterError> {
    let id: String = params.required(name, item_index)?;
    let id = id.trim();
    if id.is_empty() {
        return Err(ParameterError::Missing(name.to_owned()));
    }
    Ok(id.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodes::HttpMethod;
    use serde_json::{json, Value};

    fn command(params: Value) -> Result<Command, ParameterError> {
        let p: &dyn NodeParameters = &params;
        let (resource, operation) = selected_operation(p)?;
        Command::from_parameters(resource, operation, p, 0)
    }

    fn request(params: Value) -> HttpRequestOptions {
        command(params).unwrap().request().unwrap()
    }

    #[test]
    fn defaults_to_creating_posts() {
        let p = json!({});
        assert_eq!(
            selected_operation(&p).unwrap(),
            (Resource::SocialPost, Operation::Create)
        );
    }

    #[test]
    fn operation_must_match_resource() {
        let err = command(json!({ "resource": "file", "operation": "delete" })).unwrap_err();
        assert!(matches!(err, ParameterError::Invalid { name, .. } if name == "operation"));
    }

    #[test]
    fn upload_url_request() {
        let req = request(json!({
            "resource": "file",
            "operation": "getUploadUrl",
            "contentType": "video/mp4",
            "count": 3
        }));
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "/file/get-signed-upload-urls");
        assert_eq!(req.body, Some(json!({ "contentType": "video/mp4", "count": 3 })));
    }

    #[test]
    fn upload_count_out_of_range_is_rejected() {
        let err = command(json!({ "resource": "file", "count": 11 })).unwrap_err();
        assert!(matches!(err, ParameterError::Invalid { name, .. } if name == "count"));
    }

    #[test]
    fn account_lookups_build_paths() {
        let req = request(json!({ "resource": "socialAccount" }));
        assert_eq!((req.method, req.path.as_str()), (HttpMethod::Get, "/social-media/my-social-accounts"));

        let req = request(json!({
            "resource": "socialAccount",
            "operation": "getYoutubePlaylists",
            "socialMediaId": " yt-1 "
        }));
        assert_eq!(req.path, "/social-media/yt-1/youtube-playlists");

        let req = request(json!({
            "resource": "socialAccount",
            "operation": "getPinterestBoards",
            "socialMediaId": "pin-9"
        }));
        assert_eq!(req.path, "/social-media/pin-9/pinterest-boards");
    }

    #[test]
    fn blank_identifier_is_missing() {
        let err = command(json!({ "operation": "delete", "postId": "   " })).unwrap_err();
        assert_eq!(err, ParameterError::Missing("postId".into()));
    }

    #[test]
    fn delete_request() {
        let req = request(json!({ "operation": "delete", "postId": "p-42" }));
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "/social-posts/p-42");
        assert!(req.body.is_none());
    }

    #[test]
    fn single_post_without_extras() {
        let req = request(json!({
            "posts": { "post": [ { "socialMediaId": "abc", "content": "hello" } ] }
        }));
        let body = req.body.unwrap();
        assert_eq!(body["posts"], json!([{ "socialMediaId": "abc", "content": "hello" }]));
        assert_eq!(body["status"], "SCHEDULED");
        assert_eq!(body["approvalStatus"], "APPROVED");
        assert!(body.get("controls").is_none());
    }

    #[test]
    fn create_attaches_pruned_controls() {
        let req = request(json!({
            "status": "DRAFT",
            "posts": { "post": [ { "socialMediaId": "abc", "content": "hi" } ] },
            "controls": { "youtubeTags": "a, b", "youtubeTitle": "", "instagramPostToGrid": false }
        }));
        let body = req.body.unwrap();
        assert_eq!(body["status"], "DRAFT");
        assert_eq!(
            body["controls"],
            json!({ "youtubeTags": ["a", "b"], "instagramPostToGrid": false })
        );
    }

    #[test]
    fn listing_query_joins_filters() {
        let req = request(json!({
            "operation": "getMany",
            "limit": 10,
            "filters": {
                "platforms": ["X", "LINKEDIN"],
                "statuses": ["FAILED"],
                "from": "2026-01-01T00:00:00Z",
                "to": "",
                "page": 2
            }
        }));
        assert_eq!(req.path, "/social-posts");
        let q: Vec<(&str, &str)> = req.query.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(
            q,
            vec![
                ("from", "2026-01-01T00:00:00Z"),
                ("limit", "10"),
                ("page", "2"),
                ("platforms", "X,LINKEDIN"),
                ("statuses", "FAILED"),
            ]
        );
    }

    #[test]
    fn listing_defaults_and_caps() {
        let req = request(json!({ "operation": "getMany" }));
        assert_eq!(req.query["limit"], "20");
        assert_eq!(req.query["page"], "0");
        assert!(!req.query.contains_key("platforms"));

        let req = request(json!({ "operation": "getMany", "limit": 500 }));
        assert_eq!(req.query["limit"], "50");

        let req = request(json!({ "operation": "getMany", "returnAll": true, "limit": 5 }));
        assert_eq!(req.query["limit"], "50");
    }
}

//! Post batches and platform controls for `socialPost.create`.
//!
//! Input types mirror the form layout (`posts.post[].mediaItems.media[]`);
//! output types serialize to the request body and leave out every field the
//! user did not set.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::serde_util::{comma_list, empty_as_none};

// ---------------------------------------------------------------------------
// Batch-level enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostStatus {
    #[default]
    Scheduled,
    Draft,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalStatus {
    #[default]
    Approved,
    PendingApproval,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaType {
    Image,
    Video,
}

// ---------------------------------------------------------------------------
// Posts
// ---------------------------------------------------------------------------

/// One attachment of a post, referencing an already uploaded file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    /// Storage key returned by the upload step.
    pub key: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    /// Position inside a carousel.
    #[serde(default)]
    pub sort_order: u32,
    /// Seconds into a video to use as its thumbnail.
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub cover_timestamp: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaCollection {
    #[serde(default)]
    pub media: Vec<MediaItem>,
}

/// A post as entered in the form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostInput {
    #[serde(default)]
    pub social_media_id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub scheduled_at: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub media_items: Option<MediaCollection>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub first_comment: Option<String>,
}

/// The `posts` fixed collection: `{ "post": [ ... ] }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostsInput {
    #[serde(default)]
    pub post: Vec<PostInput>,
}

/// A post as sent to the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub social_media_id: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub media_items: Vec<MediaItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_comment: Option<String>,
}

impl From<PostInput> for Post {
    fn from(input: PostInput) -> Self {
        Self {
            social_media_id: input.social_media_id,
            content: input.content,
            scheduled_at: input.scheduled_at,
            media_items: input.media_items.map(|m| m.media).unwrap_or_default(),
            first_comment: input.first_comment,
        }
    }
}

/// Converts the form collection into API posts, keeping their order.
pub fn build_posts(input: PostsInput) -> Vec<Post> {
    input.post.into_iter().map(Post::from).collect()
}

// ---------------------------------------------------------------------------
// Controls
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FacebookContentType {
    Post,
    Reel,
    Story,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstagramPublishType {
    Timeline,
    Story,
    Reel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TiktokPrivacy {
    Public,
    MutualFriends,
    OnlyMe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum YoutubePrivacy {
    Public,
    Private,
    Unlisted,
}

/// Platform settings applied to every post of a batch.
///
/// Each field is optional; unset or empty fields never serialize. Keys the
/// node does not know about are kept in `extra` under the same rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Controls {
    // X
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub x_community_id: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub x_quote_tweet_url: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub x_retweet_url: Option<String>,

    // Facebook
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub facebook_content_type: Option<FacebookContentType>,
    #[serde(default, deserialize_with = "comma_list", skip_serializing_if = "no_entries")]
    pub facebook_reels_collaborators: Option<Vec<String>>,

    // Instagram
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub instagram_publish_type: Option<InstagramPublishType>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub instagram_post_to_grid: Option<bool>,
    #[serde(default, deserialize_with = "comma_list", skip_serializing_if = "no_entries")]
    pub instagram_collaborators: Option<Vec<String>>,

    // TikTok
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub tiktok_privacy: Option<TiktokPrivacy>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub tiktok_is_draft: Option<bool>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub tiktok_allow_comments: Option<bool>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub tiktok_allow_duet: Option<bool>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub tiktok_allow_stitch: Option<bool>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub tiktok_brand_organic: Option<bool>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub tiktok_brand_content: Option<bool>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub tiktok_auto_add_music: Option<bool>,

    // YouTube
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub youtube_title: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub youtube_privacy: Option<YoutubePrivacy>,
    #[serde(default, deserialize_with = "comma_list", skip_serializing_if = "no_entries")]
    pub youtube_tags: Option<Vec<String>>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub youtube_category_id: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub youtube_is_short: Option<bool>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub youtube_made_for_kids: Option<bool>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub youtube_playlist_id: Option<String>,

    // Pinterest
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub pinterest_board_id: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub pinterest_link: Option<String>,

    // LinkedIn
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub linkedin_attachment_key: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub linkedin_attachment_title: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn no_entries(list: &Option<Vec<String>>) -> bool {
    list.as_ref().map_or(true, Vec::is_empty)
}

impl Controls {
    /// Drops unknown keys whose value is null or `""`.
    pub fn pruned(mut self) -> Self {
        self.extra
            .retain(|_, v| !(v.is_null() || v.as_str().is_some_and(str::is_empty)));
        self
    }

    /// The serialized controls, or `None` when nothing is set.
    pub fn into_body(self) -> Result<Option<Map<String, Value>>, serde_json::Error> {
        match serde_json::to_value(self.pruned())? {
            Value::Object(map) if !map.is_empty() => Ok(Some(map)),
            _ => Ok(None),
        }
    }
}

// ---------------------------------------------------------------------------
// Request body
// ---------------------------------------------------------------------------

/// Body of `POST /social-posts`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostsBody {
    pub posts: Vec<Post>,
    pub status: PostStatus,
    pub approval_status: ApprovalStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controls: Option<Map<String, Value>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn controls(raw: Value) -> Option<Map<String, Value>> {
        serde_json::from_value::<Controls>(raw)
            .unwrap()
            .into_body()
            .unwrap()
    }

    #[test]
    fn empty_controls_produce_nothing() {
        assert_eq!(controls(json!({})), None);
        assert_eq!(
            controls(json!({
                "xCommunityId": "",
                "youtubeTags": " , ,",
                "instagramCollaborators": "",
                "somethingNew": null,
            })),
            None
        );
    }

    #[test]
    fn comma_fields_become_arrays() {
        let out = controls(json!({
            "facebookReelsCollaborators": "alice, bob",
            "instagramCollaborators": "carol",
            "youtubeTags": "rust,, async ",
        }))
        .unwrap();
        assert_eq!(out["facebookReelsCollaborators"], json!(["alice", "bob"]));
        assert_eq!(out["instagramCollaborators"], json!(["carol"]));
        assert_eq!(out["youtubeTags"], json!(["rust", "async"]));
    }

    #[test]
    fn false_booleans_and_enums_are_kept() {
        let out = controls(json!({
            "tiktokAllowDuet": false,
            "tiktokPrivacy": "MUTUAL_FRIENDS",
            "facebookContentType": "REEL",
            "pinterestBoardId": "",
        }))
        .unwrap();
        assert_eq!(
            Value::Object(out),
            json!({
                "tiktokAllowDuet": false,
                "tiktokPrivacy": "MUTUAL_FRIENDS",
                "facebookContentType": "REEL",
            })
        );
    }

    #[test]
    fn unknown_controls_pass_through() {
        let out = controls(json!({ "threadsTopic": "launch", "blank": "" })).unwrap();
        assert_eq!(Value::Object(out), json!({ "threadsTopic": "launch" }));
    }

    #[test]
    fn posts_keep_order_and_omit_unset_fields() {
        let input: PostsInput = serde_json::from_value(json!({
            "post": [
                {
                    "socialMediaId": "a",
                    "content": "first",
                    "scheduledAt": "2026-01-01T10:00:00Z",
                    "mediaItems": { "media": [
                        { "key": "video/clip.mp4", "type": "VIDEO", "sortOrder": 0, "coverTimestamp": "3" },
                        { "key": "image/pic.jpg", "type": "IMAGE", "sortOrder": 1, "coverTimestamp": "" }
                    ] },
                    "firstComment": "link in bio"
                },
                { "socialMediaId": "b", "content": "second", "scheduledAt": "", "mediaItems": {}, "firstComment": "" }
            ]
        }))
        .unwrap();

        let posts = serde_json::to_value(build_posts(input)).unwrap();
        assert_eq!(
            posts,
            json!([
                {
                    "socialMediaId": "a",
                    "content": "first",
                    "scheduledAt": "2026-01-01T10:00:00Z",
                    "mediaItems": [
                        { "key": "video/clip.mp4", "type": "VIDEO", "sortOrder": 0, "coverTimestamp": "3" },
                        { "key": "image/pic.jpg", "type": "IMAGE", "sortOrder": 1 }
                    ],
                    "firstComment": "link in bio"
                },
                { "socialMediaId": "b", "content": "second" }
            ])
        );
    }

    #[test]
    fn body_without_controls_has_no_controls_key() {
        let body = CreatePostsBody {
            posts: vec![],
            status: PostStatus::Draft,
            approval_status: ApprovalStatus::PendingApproval,
            controls: None,
        };
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({ "posts": [], "status": "DRAFT", "approvalStatus": "PENDING_APPROVAL" })
        );
    }
}

//! Request and response types for the Inklet API.
//!
//! Field names on the wire are camelCase. Response types are the contract
//! the client parses against: core identity fields are required, display
//! fields the server may omit default to empty.

use serde::{Deserialize, Serialize};

// ---------- Users & auth ----------

/// An account, as stored in the session and returned by auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

/// Request body for POST /auth/register.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Response from POST /auth/register.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

/// Request body for POST /auth/login.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response from POST /auth/login: the bearer token and the account it
/// belongs to. Handed to `SessionStore::set_auth_data` by the caller; the
/// client itself never persists it.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

// ---------- Posts ----------

/// Post author reference embedded in posts and comments.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    #[serde(default)]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

/// A published post. `tags` keeps the author's input order and any
/// duplicates; this layer does not normalize them.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub author: Author,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub likes_count: u64,
    #[serde(default)]
    pub comments_count: u64,
    /// Omitted by the server on lists that don't count views.
    #[serde(default)]
    pub views_count: Option<u64>,
    /// Viewer-relative; only present on authenticated reads.
    #[serde(default)]
    pub is_liked: Option<bool>,
}

/// Request body for POST /posts and PUT /posts/:id.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Pagination descriptor returned by listing endpoints. The client never
/// computes pagination itself; `has_more` is the server's word.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub has_more: bool,
}

/// Response from GET /posts and GET /posts/user.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostsPage {
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

impl PostsPage {
    /// Whether the server reported another page.
    pub fn has_more(&self) -> bool {
        self.pagination.as_ref().is_some_and(|p| p.has_more)
    }
}

/// Envelope for single-post responses ({ "post": ... }).
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PostEnvelope {
    pub post: Post,
}

// ---------- Comments ----------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    #[serde(default)]
    pub content: String,
    pub author: Author,
    #[serde(default)]
    pub created_at: String,
}

/// Request body for POST /posts/:id/comments.
#[derive(Debug, Clone, Serialize)]
pub struct CreateCommentRequest {
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CommentsEnvelope {
    #[serde(default)]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CommentEnvelope {
    pub comment: Comment,
}

// ---------- Likes ----------

/// Server truth for a post's like state, returned by both the toggle and
/// the read endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeStatus {
    pub count: u64,
    pub is_liked: bool,
}

// ---------- Profile ----------

/// Request body for PUT /profile. Only set fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UserEnvelope {
    pub user: User,
}

/// Per-user dashboard totals from GET /profile/stats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    #[serde(default)]
    pub total_posts: u64,
    #[serde(default)]
    pub total_likes: u64,
    #[serde(default)]
    pub total_comments: u64,
    #[serde(default)]
    pub total_views: u64,
}

// ---------- Error bodies ----------

/// Error payload shape ({ "message": ... }); anything else falls back to
/// the status text.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn post_parses_camel_case_fields() {
        let json = r#"{
            "id": "p1",
            "title": "Hello",
            "content": "Body",
            "author": { "id": "u1", "username": "alice" },
            "createdAt": "2026-01-01T00:00:00Z",
            "updatedAt": "2026-01-02T00:00:00Z",
            "tags": ["rust", "rust", "blog"],
            "likesCount": 3,
            "commentsCount": 1,
            "isLiked": true
        }"#;
        let post: Post = serde_json::from_str(json).expect("post parses");
        assert_eq!(post.likes_count, 3);
        assert_eq!(post.is_liked, Some(true));
        assert_eq!(post.views_count, None);
        // duplicates and order survive
        assert_eq!(post.tags, vec!["rust", "rust", "blog"]);
    }

    #[test]
    fn posts_page_defaults_to_no_more() {
        let page: PostsPage = serde_json::from_str(r#"{ "posts": [] }"#).unwrap();
        assert!(!page.has_more());

        let page: PostsPage =
            serde_json::from_str(r#"{ "posts": [], "pagination": { "hasMore": true } }"#).unwrap();
        assert!(page.has_more());
    }

    #[test]
    fn profile_update_skips_unset_fields() {
        let body = ProfileUpdate {
            bio: Some("hi".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "bio": "hi" }));
    }

    #[test]
    fn post_draft_omits_missing_image() {
        let draft = PostDraft {
            title: "t".to_string(),
            content: "c".to_string(),
            tags: vec![],
            image: None,
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert!(json.get("image").is_none());
    }

    #[test]
    fn stats_tolerate_missing_totals() {
        let stats: UserStats = serde_json::from_str(r#"{ "totalPosts": 4 }"#).unwrap();
        assert_eq!(stats.total_posts, 4);
        assert_eq!(stats.total_views, 0);
    }
}

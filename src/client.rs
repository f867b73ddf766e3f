//! HTTP client for the Inklet API.

use crate::error::{InkletError, Result};
use crate::flags;
use crate::session::SessionStore;
use crate::types::*;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

const CONNECT_TIMEOUT_SECS: u64 = 8;
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// How much of an undecodable body to carry in the error.
const SNIPPET_CHARS: usize = 400;

/// Inklet API client.
///
/// Every backend call goes through one request path: the JSON body is
/// serialized, `Authorization: Bearer <token>` is attached when the
/// session store holds a token (and omitted otherwise), non-success
/// statuses become [`InkletError::Api`], transport failures become
/// [`InkletError::Http`], and success bodies are parsed against the
/// endpoint's contract type.
///
/// The client never writes the session; `login` returns the
/// [`AuthResponse`] for the caller to hand to
/// [`SessionStore::set_auth_data`].
#[derive(Clone)]
pub struct InkletClient {
    base_url: String,
    http: Client,
    session: SessionStore,
}

impl InkletClient {
    /// Client against the configured base URL (`INKLET_API_BASE_URL`,
    /// defaulting to a local development backend).
    pub fn new(session: SessionStore) -> Result<Self> {
        Self::with_base_url(*flags::INKLET_API_BASE_URL, session)
    }

    /// Client against a custom base URL.
    pub fn with_base_url(base_url: impl Into<String>, session: SessionStore) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(InkletError::Http)?;
        Ok(Self {
            base_url: base_url.into(),
            http,
            session,
        })
    }

    /// The session store this client reads its token from.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    async fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.token().await {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn execute<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self
            .authorize(builder)
            .await
            .send()
            .await
            .map_err(InkletError::Http)?;
        decode_body(check_response(response).await?).await
    }

    async fn execute_empty(&self, builder: RequestBuilder) -> Result<()> {
        let response = self
            .authorize(builder)
            .await
            .send()
            .await
            .map_err(InkletError::Http)?;
        check_response(response).await?;
        Ok(())
    }

    // ---------- Auth ----------

    /// Create an account.
    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse> {
        self.execute(self.http.post(self.url("auth/register")).json(request))
            .await
    }

    /// Exchange credentials for a token and user record. No persistence
    /// side effect; pass the result to [`SessionStore::set_auth_data`].
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.execute(self.http.post(self.url("auth/login")).json(&request))
            .await
    }

    /// The account behind the current token.
    pub async fn current_user(&self) -> Result<User> {
        self.execute(self.http.get(self.url("auth/me"))).await
    }

    // ---------- Posts ----------

    /// One page of published posts. `page` is 1-based. `search` filters by
    /// free text; pass `#tag` to filter by tag.
    pub async fn list_posts(
        &self,
        page: u32,
        limit: u32,
        search: Option<&str>,
    ) -> Result<PostsPage> {
        let mut query: Vec<(&str, String)> = vec![
            ("page", page.to_string()),
            ("limit", limit.to_string()),
        ];
        if let Some(s) = search.filter(|s| !s.is_empty()) {
            query.push(("search", s.to_string()));
        }
        self.execute(self.http.get(self.url("posts")).query(&query))
            .await
    }

    /// A single post by id.
    pub async fn get_post(&self, id: &str) -> Result<Post> {
        let envelope: PostEnvelope = self
            .execute(self.http.get(self.url(&format!("posts/{id}"))))
            .await?;
        Ok(envelope.post)
    }

    /// One page of the current user's own posts.
    pub async fn user_posts(&self, page: u32, limit: u32) -> Result<PostsPage> {
        let query: Vec<(&str, String)> = vec![
            ("page", page.to_string()),
            ("limit", limit.to_string()),
        ];
        self.execute(self.http.get(self.url("posts/user")).query(&query))
            .await
    }

    /// Publish a post.
    pub async fn create_post(&self, draft: &PostDraft) -> Result<Post> {
        let envelope: PostEnvelope = self
            .execute(self.http.post(self.url("posts")).json(draft))
            .await?;
        Ok(envelope.post)
    }

    /// Replace a post's title, content, tags, and image.
    pub async fn update_post(&self, id: &str, draft: &PostDraft) -> Result<Post> {
        let envelope: PostEnvelope = self
            .execute(self.http.put(self.url(&format!("posts/{id}"))).json(draft))
            .await?;
        Ok(envelope.post)
    }

    /// Delete the current user's own post.
    pub async fn delete_post(&self, id: &str) -> Result<()> {
        self.execute_empty(self.http.delete(self.url(&format!("posts/{id}"))))
            .await
    }

    // ---------- Comments ----------

    /// Comments on a post, newest first as the server returns them.
    pub async fn comments(&self, post_id: &str) -> Result<Vec<Comment>> {
        let envelope: CommentsEnvelope = self
            .execute(self.http.get(self.url(&format!("posts/{post_id}/comments"))))
            .await?;
        Ok(envelope.comments)
    }

    /// Add a comment to a post.
    pub async fn create_comment(&self, post_id: &str, content: &str) -> Result<Comment> {
        let request = CreateCommentRequest {
            content: content.to_string(),
        };
        let envelope: CommentEnvelope = self
            .execute(
                self.http
                    .post(self.url(&format!("posts/{post_id}/comments")))
                    .json(&request),
            )
            .await?;
        Ok(envelope.comment)
    }

    // ---------- Likes ----------

    /// Flip the current user's like on a post; returns the updated server
    /// truth.
    pub async fn toggle_like(&self, post_id: &str) -> Result<LikeStatus> {
        self.execute(self.http.post(self.url(&format!("posts/{post_id}/like"))))
            .await
    }

    /// Like count and viewer-relative liked flag for a post.
    pub async fn likes(&self, post_id: &str) -> Result<LikeStatus> {
        self.execute(self.http.get(self.url(&format!("posts/{post_id}/likes"))))
            .await
    }

    // ---------- Profile ----------

    /// Update the current user's profile; only set fields change.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User> {
        let envelope: UserEnvelope = self
            .execute(self.http.put(self.url("profile")).json(update))
            .await?;
        Ok(envelope.user)
    }

    /// Dashboard totals for the current user.
    pub async fn stats(&self) -> Result<UserStats> {
        self.execute(self.http.get(self.url("profile/stats"))).await
    }
}

async fn check_response(response: Response) -> Result<Response> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let parsed: ApiErrorBody =
            serde_json::from_str(&body).unwrap_or(ApiErrorBody { message: None });
        let message = parsed.message.unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });
        return Err(InkletError::Api {
            status: status.as_u16(),
            message,
        });
    }
    Ok(response)
}

async fn decode_body<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.text().await.map_err(InkletError::Http)?;
    serde_json::from_str(&body).map_err(|err| InkletError::Decode {
        message: err.to_string(),
        snippet: body.chars().take(SNIPPET_CHARS).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_builds() {
        let store = SessionStore::new("/tmp/inklet-test");
        let _ = InkletClient::with_base_url("http://localhost:3001/api", store)
            .expect("client builds");
    }

    #[test]
    fn url_joins_without_double_slashes() {
        let store = SessionStore::new("/tmp/inklet-test");
        let client =
            InkletClient::with_base_url("http://localhost:3001/api/", store).unwrap();
        assert_eq!(
            client.url("/posts/p1/comments"),
            "http://localhost:3001/api/posts/p1/comments"
        );
        assert_eq!(client.url("auth/login"), "http://localhost:3001/api/auth/login");
    }
}

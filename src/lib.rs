//! Rust client for the Inklet blogging platform API.
//!
//! The platform's business logic (persistence, authorization, uniqueness,
//! counting) lives in the backend; this crate is the client side of it:
//! a [`SessionStore`] that owns the persisted login, an [`InkletClient`]
//! with one method per backend operation and one error shape, and the
//! view-state machinery around them ([`PostFeed`] pagination,
//! [`LikeControl`] optimistic likes, form validation).
//!
//! ```no_run
//! use inklet::{InkletClient, SessionStore};
//!
//! # async fn run() -> inklet::Result<()> {
//! let store = SessionStore::from_default_dir()?;
//! store.initialize().await;
//!
//! let client = InkletClient::new(store.clone())?;
//! let auth = client.login("a@x.com", "hunter2").await?;
//! store.set_auth_data(auth).await?;
//!
//! let page = client.list_posts(1, 12, None).await?;
//! println!("{} posts", page.posts.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod feed;
pub mod flags;
pub mod like;
pub mod session;
pub mod types;
pub mod validate;

pub use client::InkletClient;
pub use error::{InkletError, Result};
pub use feed::{FeedScope, FeedUpdate, PostFeed};
pub use like::{LikeControl, LikeState, PendingToggle, ToggleOutcome};
pub use session::{Session, SessionStore};
pub use types::{
    AuthResponse, Author, Comment, CreateCommentRequest, LikeStatus, LoginRequest, Pagination,
    Post, PostDraft, PostsPage, ProfileUpdate, RegisterRequest, RegisterResponse, User, UserStats,
};
pub use validate::{FieldErrors, parse_tags};

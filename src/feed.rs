//! Paged post feed with search and tag filtering.
//!
//! Owns the accumulated page state a listing view renders: posts fetched
//! so far, the current 1-based page, and the server-reported "has more"
//! flag. `refresh` replaces, `load_more` appends; the server is the only
//! party that decides whether another page exists.

use crate::client::InkletClient;
use crate::error::Result;
use crate::types::{Post, PostsPage};
use tokio_util::sync::CancellationToken;

/// Which listing endpoint a feed reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedScope {
    /// Everything published (GET /posts).
    All,
    /// The current user's own posts (GET /posts/user).
    Mine,
}

/// What a fetch did to the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedUpdate {
    /// The response was applied to the feed state.
    Applied,
    /// The owning view went away mid-flight; the response was discarded
    /// and the state is untouched.
    Stale,
}

/// Accumulated feed state for one listing view.
pub struct PostFeed {
    client: InkletClient,
    scope: FeedScope,
    page_size: u32,
    search: Option<String>,
    tag: Option<String>,
    posts: Vec<Post>,
    page: u32,
    has_more: bool,
}

impl PostFeed {
    pub fn new(client: InkletClient, scope: FeedScope, page_size: u32) -> Self {
        Self {
            client,
            scope,
            page_size,
            search: None,
            tag: None,
            posts: Vec::new(),
            page: 0,
            has_more: false,
        }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// 1-based page of the most recent applied fetch; 0 before any fetch.
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Set the free-text filter. Takes effect on the next `refresh`.
    pub fn set_search(&mut self, search: Option<String>) {
        self.search = search.filter(|s| !s.is_empty());
    }

    /// Set the tag filter. Takes effect on the next `refresh`; ignored
    /// while a free-text search is set.
    pub fn set_tag(&mut self, tag: Option<String>) {
        self.tag = tag.filter(|t| !t.is_empty());
    }

    pub fn clear_filters(&mut self) {
        self.search = None;
        self.tag = None;
    }

    /// The search string actually sent: free text wins over the tag
    /// filter, a tag goes over the wire as `#tag`.
    fn effective_search(&self) -> Option<String> {
        self.search
            .clone()
            .or_else(|| self.tag.as_ref().map(|t| format!("#{t}")))
    }

    /// Fetch page 1 and replace the feed contents.
    pub async fn refresh(&mut self, cancel: &CancellationToken) -> Result<FeedUpdate> {
        let page = self.fetch(1).await?;
        if cancel.is_cancelled() {
            return Ok(FeedUpdate::Stale);
        }
        self.has_more = page.has_more();
        self.posts = page.posts;
        self.page = 1;
        Ok(FeedUpdate::Applied)
    }

    /// Fetch the next page with the same limit and append it. No-op when
    /// the server has not reported another page.
    pub async fn load_more(&mut self, cancel: &CancellationToken) -> Result<FeedUpdate> {
        if !self.has_more {
            return Ok(FeedUpdate::Applied);
        }
        let next = self.page + 1;
        let page = self.fetch(next).await?;
        if cancel.is_cancelled() {
            return Ok(FeedUpdate::Stale);
        }
        self.has_more = page.has_more();
        self.posts.extend(page.posts);
        self.page = next;
        Ok(FeedUpdate::Applied)
    }

    async fn fetch(&self, page: u32) -> Result<PostsPage> {
        match self.scope {
            FeedScope::All => {
                let search = self.effective_search();
                self.client
                    .list_posts(page, self.page_size, search.as_deref())
                    .await
            }
            FeedScope::Mine => self.client.user_posts(page, self.page_size).await,
        }
    }
}

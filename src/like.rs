//! Optimistic like toggling.
//!
//! The displayed count and liked flag flip immediately on user action and
//! converge to the last confirmed server state. A toggle runs as three
//! explicit phases: [`LikeState::begin`] applies the tentative flip and
//! snapshots what it replaced, then the server response either
//! [`commit`]s (server truth overwrites) or [`rollback`]s (snapshot
//! restored). A [`PendingToggle`] must be spent on exactly one of the two.
//!
//! [`commit`]: LikeState::commit
//! [`rollback`]: LikeState::rollback

use crate::client::InkletClient;
use crate::error::Result;
use crate::types::LikeStatus;
use tokio_util::sync::CancellationToken;

/// Displayed like state for one post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeState {
    count: u64,
    liked: bool,
    pending: bool,
}

/// Snapshot of the pre-toggle state, held while a toggle is in flight.
#[derive(Debug)]
#[must_use = "a pending toggle must be committed or rolled back"]
pub struct PendingToggle {
    prior_count: u64,
    prior_liked: bool,
}

impl LikeState {
    pub fn new(count: u64, liked: bool) -> Self {
        Self {
            count,
            liked,
            pending: false,
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn liked(&self) -> bool {
        self.liked
    }

    /// Whether a toggle is between `begin` and its commit/rollback.
    pub fn in_flight(&self) -> bool {
        self.pending
    }

    /// Apply the optimistic flip. Returns `None` while a previous toggle
    /// is still unresolved, serializing toggles per control.
    pub fn begin(&mut self) -> Option<PendingToggle> {
        if self.pending {
            return None;
        }
        let snapshot = PendingToggle {
            prior_count: self.count,
            prior_liked: self.liked,
        };
        self.liked = !self.liked;
        self.count = if self.liked {
            self.count + 1
        } else {
            self.count.saturating_sub(1)
        };
        self.pending = true;
        Some(snapshot)
    }

    /// Reconcile to the server's answer.
    pub fn commit(&mut self, _pending: PendingToggle, server: LikeStatus) {
        self.count = server.count;
        self.liked = server.is_liked;
        self.pending = false;
    }

    /// Restore the pre-toggle state.
    pub fn rollback(&mut self, pending: PendingToggle) {
        self.count = pending.prior_count;
        self.liked = pending.prior_liked;
        self.pending = false;
    }
}

/// What a toggle attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Server confirmed; state shows server truth.
    Applied,
    /// No session; nothing was sent. The view should route to login.
    LoginRequired,
    /// A previous toggle is still in flight; this one was refused.
    InFlight,
    /// The owning view went away mid-flight; the flip was undone and the
    /// response discarded.
    Stale,
}

/// Drives the like state of one post against the backend.
pub struct LikeControl {
    client: InkletClient,
    post_id: String,
    state: LikeState,
}

impl LikeControl {
    /// Control seeded with the counts the post came with.
    pub fn new(client: InkletClient, post_id: impl Into<String>, count: u64, liked: bool) -> Self {
        Self {
            client,
            post_id: post_id.into(),
            state: LikeState::new(count, liked),
        }
    }

    pub fn state(&self) -> &LikeState {
        &self.state
    }

    /// Re-read the server's like status. Skipped when logged out (the
    /// seeded counts stand) or when the view is gone by the time the
    /// response arrives.
    pub async fn refresh(&mut self, cancel: &CancellationToken) -> Result<()> {
        if !self.client.session().is_authenticated().await {
            return Ok(());
        }
        let status = self.client.likes(&self.post_id).await?;
        if cancel.is_cancelled() || self.state.in_flight() {
            return Ok(());
        }
        self.state = LikeState::new(status.count, status.is_liked);
        Ok(())
    }

    /// Toggle the like: optimistic flip, then commit to the server's
    /// answer or roll back on failure. Errors propagate after the
    /// rollback so the view can surface the message.
    pub async fn toggle(&mut self, cancel: &CancellationToken) -> Result<ToggleOutcome> {
        if !self.client.session().is_authenticated().await {
            return Ok(ToggleOutcome::LoginRequired);
        }
        let Some(pending) = self.state.begin() else {
            return Ok(ToggleOutcome::InFlight);
        };

        let result = self.client.toggle_like(&self.post_id).await;

        if cancel.is_cancelled() {
            // The view is gone: nothing may be applied, including the
            // optimistic flip. Errors are not surfaced to anyone.
            self.state.rollback(pending);
            return Ok(ToggleOutcome::Stale);
        }

        match result {
            Ok(server) => {
                self.state.commit(pending, server);
                Ok(ToggleOutcome::Applied)
            }
            Err(err) => {
                self.state.rollback(pending);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn begin_flips_optimistically() {
        let mut state = LikeState::new(3, false);
        let pending = state.begin().expect("no toggle in flight");
        assert_eq!(state.count(), 4);
        assert!(state.liked());
        assert!(state.in_flight());
        state.rollback(pending);
    }

    #[test]
    fn commit_takes_server_truth_over_local_arithmetic() {
        let mut state = LikeState::new(3, false);
        let pending = state.begin().unwrap();
        // Someone else liked in the meantime; server says 6.
        state.commit(
            pending,
            LikeStatus {
                count: 6,
                is_liked: true,
            },
        );
        assert_eq!(state.count(), 6);
        assert!(state.liked());
        assert!(!state.in_flight());
    }

    #[test]
    fn rollback_restores_the_snapshot() {
        let mut state = LikeState::new(3, true);
        let pending = state.begin().unwrap();
        assert_eq!(state.count(), 2);
        assert!(!state.liked());

        state.rollback(pending);
        assert_eq!(state.count(), 3);
        assert!(state.liked());
        assert!(!state.in_flight());
    }

    #[test]
    fn second_begin_is_refused_while_pending() {
        let mut state = LikeState::new(0, false);
        let pending = state.begin().unwrap();
        assert!(state.begin().is_none());
        state.rollback(pending);
        assert!(state.begin().is_some());
    }

    #[test]
    fn unlike_at_zero_saturates() {
        let mut state = LikeState::new(0, true);
        let pending = state.begin().unwrap();
        assert_eq!(state.count(), 0);
        state.rollback(pending);
    }
}

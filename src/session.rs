//! Session store: the single source of truth for "who is logged in".
//!
//! The session is persisted as two entries in a session directory, the
//! bearer token as a plain string and the user record as JSON, written
//! together and removed together. Anything less than both entries present
//! and parseable counts as no session: `initialize` discards the leftovers
//! and the store comes up logged out.
//!
//! The store is an explicit value, cloneable and cheap to share; the API
//! client reads the token through it and nothing else writes the session
//! entries.

use crate::error::Result;
use crate::types::{AuthResponse, User};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// Bearer token, plain string.
const TOKEN_FILE: &str = "auth_token";
/// Serialized user record.
const USER_FILE: &str = "auth_user.json";

/// An authenticated identity. Token and user travel together; there is no
/// state with one but not the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Persistent session store.
#[derive(Clone)]
pub struct SessionStore {
    dir: PathBuf,
    session: Arc<RwLock<Option<Session>>>,
    determined: Arc<AtomicBool>,
}

impl SessionStore {
    /// Store over the given session directory. Call [`initialize`] before
    /// reading authentication state.
    ///
    /// [`initialize`]: SessionStore::initialize
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            session: Arc::new(RwLock::new(None)),
            determined: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Store over the platform-default session directory.
    pub fn from_default_dir() -> Result<Self> {
        let data_dir = dirs::data_local_dir().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no local data directory for this platform",
            )
        })?;
        Ok(Self::new(data_dir.join("inklet")))
    }

    /// The session directory this store reads and writes.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Restore the persisted session, if any.
    ///
    /// Both entries present and parseable populate the in-memory session.
    /// A missing, unreadable, or malformed entry means the persisted state
    /// is partial or corrupt: both entries are removed and the store ends
    /// up logged out. Never fails; consumers gate their first
    /// authentication-dependent read on [`is_determined`].
    ///
    /// [`is_determined`]: SessionStore::is_determined
    pub async fn initialize(&self) {
        let token_path = self.dir.join(TOKEN_FILE);
        let user_path = self.dir.join(USER_FILE);

        let token = tokio::fs::read_to_string(&token_path)
            .await
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        let user_json = tokio::fs::read_to_string(&user_path).await.ok();

        let restored = match (token, user_json) {
            (Some(token), Some(json)) => match serde_json::from_str::<User>(&json) {
                Ok(user) => Some(Session { token, user }),
                Err(err) => {
                    tracing::warn!("discarding corrupt session user record: {err}");
                    None
                }
            },
            (None, None) => {
                self.determined.store(true, Ordering::Release);
                return;
            }
            _ => {
                tracing::warn!("discarding partial session state");
                None
            }
        };

        match restored {
            Some(session) => {
                tracing::debug!(user = %session.user.username, "session restored");
                *self.session.write().await = Some(session);
            }
            None => self.clear_persisted().await,
        }
        self.determined.store(true, Ordering::Release);
    }

    /// Persist a login/registration result and make it the current
    /// session. The token entry is written first, then the user record;
    /// a write failure propagates and leaves the in-memory session as it
    /// was.
    pub async fn set_auth_data(&self, auth: AuthResponse) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let token_path = self.dir.join(TOKEN_FILE);
        tokio::fs::write(&token_path, &auth.token).await?;
        restrict_to_owner(&token_path)?;

        let user_json = serde_json::to_string(&auth.user)?;
        tokio::fs::write(self.dir.join(USER_FILE), user_json).await?;

        *self.session.write().await = Some(Session {
            token: auth.token,
            user: auth.user,
        });
        Ok(())
    }

    /// Drop the session, in memory and on disk. Purely local; the backend
    /// is not told.
    pub async fn logout(&self) {
        self.clear_persisted().await;
        *self.session.write().await = None;
    }

    /// Currently logged-in user, if any.
    pub async fn current_user(&self) -> Option<User> {
        self.session.read().await.as_ref().map(|s| s.user.clone())
    }

    /// Current bearer token, if any.
    pub async fn token(&self) -> Option<String> {
        self.session.read().await.as_ref().map(|s| s.token.clone())
    }

    /// Derived from the presence of a session; never stored separately.
    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_some()
    }

    /// Whether [`initialize`] has run to completion. Render nothing
    /// login-dependent before this is true.
    ///
    /// [`initialize`]: SessionStore::initialize
    pub fn is_determined(&self) -> bool {
        self.determined.load(Ordering::Acquire)
    }

    async fn clear_persisted(&self) {
        for name in [TOKEN_FILE, USER_FILE] {
            if let Err(err) = tokio::fs::remove_file(self.dir.join(name)).await
                && err.kind() != std::io::ErrorKind::NotFound
            {
                tracing::warn!("failed to remove session entry {name}: {err}");
            }
        }
    }
}

/// Owner read/write only; the token is a credential.
fn restrict_to_owner(path: &Path) -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use nix::sys::stat::{FchmodatFlags, Mode, fchmodat};
        use std::os::unix::ffi::OsStrExt;

        fchmodat(
            None,
            path.as_os_str().as_bytes(),
            Mode::S_IRUSR | Mode::S_IWUSR,
            FchmodatFlags::FollowSymlink,
        )
        .map_err(|errno| std::io::Error::from_raw_os_error(errno as i32))?;
    }

    #[cfg(windows)]
    {
        let _ = path;
        tracing::warn!(
            "token file permissions not set on Windows; file may be readable by other users"
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> User {
        User {
            id: id.to_string(),
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            bio: None,
            profile_picture: None,
        }
    }

    #[test]
    fn starts_undetermined() {
        let store = SessionStore::new("/tmp/does-not-matter");
        assert!(!store.is_determined());
    }

    #[tokio::test]
    async fn token_whitespace_is_trimmed_on_restore() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join(TOKEN_FILE), "t1\n")
            .await
            .unwrap();
        tokio::fs::write(
            dir.path().join(USER_FILE),
            serde_json::to_string(&user("u1")).unwrap(),
        )
        .await
        .unwrap();

        let store = SessionStore::new(dir.path());
        store.initialize().await;
        assert_eq!(store.token().await.as_deref(), Some("t1"));
    }

    #[tokio::test]
    async fn set_auth_data_then_logout_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        store.initialize().await;

        store
            .set_auth_data(AuthResponse {
                token: "t1".to_string(),
                user: user("u1"),
            })
            .await
            .unwrap();
        assert!(store.is_authenticated().await);

        store.logout().await;
        assert!(!store.is_authenticated().await);
        assert!(!dir.path().join(TOKEN_FILE).exists());
        assert!(!dir.path().join(USER_FILE).exists());
    }
}

//! Session context and its persistent store.
//!
//! The session carries the bearer credential and the viewer's email. It is
//! passed explicitly to the API client and to post controllers; nothing reads
//! it from ambient state.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("User is not logged in")]
    NotLoggedIn,
    #[error("failed to access session file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse session file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize session: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Credentials and identity of the current user.
///
/// Serialized under the fixed keys `jwt_token` and `user_email`.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "jwt_token", default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    #[serde(rename = "user_email", default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
}

impl Session {
    /// Create a session from a token and an optional email.
    #[must_use]
    pub fn new(token: impl Into<String>, email: Option<String>) -> Self {
        Self {
            token: Some(token.into()),
            email: email.filter(|e| !e.is_empty()),
        }
    }

    /// A session with no credentials.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// The bearer credential, if logged in.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    /// The viewer's email, if known.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// The viewer identity used for ownership checks.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotLoggedIn`] when no email is stored.
    pub fn viewer_id(&self) -> Result<&str, SessionError> {
        self.email
            .as_deref()
            .filter(|e| !e.is_empty())
            .ok_or(SessionError::NotLoggedIn)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("email", &self.email)
            .finish()
    }
}

/// Persistent storage for the session.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the stored session, or an anonymous one if nothing is stored.
    async fn load(&self) -> Result<Session, SessionError>;

    /// Replace the stored session.
    async fn save(&self, session: &Session) -> Result<(), SessionError>;

    /// Forget the stored session.
    async fn clear(&self) -> Result<(), SessionError>;
}

/// Session store backed by a TOML file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> SessionError {
        SessionError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Session, SessionError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(toml::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No session file, starting anonymous");
                Ok(Session::anonymous())
            }
            Err(e) => Err(self.io_error(e)),
        }
    }

    async fn save(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }
        let contents = toml::to_string(session)?;
        tokio::fs::write(&self.path, contents)
            .await
            .map_err(|e| self.io_error(e))?;
        debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

/// In-memory session store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: Mutex<Session>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self {
            inner: Mutex::new(session),
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Session, SessionError> {
        Ok(self.inner.lock().await.clone())
    }

    async fn save(&self, session: &Session) -> Result<(), SessionError> {
        *self.inner.lock().await = session.clone();
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        *self.inner.lock().await = Session::anonymous();
        Ok(())
    }
}

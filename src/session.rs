//! Session credentials.
//!
//! The bearer token lives behind a [`SessionContext`] that is shared by the
//! HTTP client and the commands. Persistence is delegated to a
//! [`SessionStore`]. A 401 from the server calls
//! [`SessionContext::invalidate`], which clears the stored token and notifies
//! every subscriber through a `watch` channel.

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use secrecy::{ExposeSecret, SecretBox};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::error::{HotelDeskError, Result};

/// Environment variable that overrides the stored token.
pub const TOKEN_ENV: &str = "HOTELDESK_TOKEN";

/// Persistence for the session token.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Option<String>>;
    fn save(&self, token: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

#[derive(Serialize, Deserialize)]
struct SessionFile {
    token: String,
}

/// Stores the token in `session.yaml`, readable by the owner only.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join("session.yaml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path).map_err(|e| {
            HotelDeskError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read session at {}: {}", self.path.display(), e),
            ))
        })?;
        let file: SessionFile = serde_yaml_ng::from_str(&content)?;
        let token = file.token.trim();
        Ok((!token.is_empty()).then(|| token.to_string()))
    }

    fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_yaml_ng::to_string(&SessionFile {
            token: token.to_string(),
        })?;
        fs::write(&self.path, content).map_err(|e| {
            HotelDeskError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write session at {}: {}", self.path.display(), e),
            ))
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store, for tests and one-off tokens.
#[derive(Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.token.lock().clone())
    }

    fn save(&self, token: &str) -> Result<()> {
        *self.token.lock() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.token.lock() = None;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated,
    /// The server rejected the token; the user must sign in again.
    Expired,
}

/// Shared session: current token, its store and the state channel.
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
    token: RwLock<Option<SecretBox<String>>>,
    state: watch::Sender<SessionState>,
}

impl SessionContext {
    pub fn new(store: Arc<dyn SessionStore>, token: Option<String>) -> Self {
        let state = if token.is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        };
        let (tx, _) = watch::channel(state);
        Self {
            store,
            token: RwLock::new(token.map(|t| SecretBox::new(Box::new(t)))),
            state: tx,
        }
    }

    /// Build from the store, letting `HOTELDESK_TOKEN` take precedence.
    pub fn load(store: Arc<dyn SessionStore>) -> Result<Self> {
        let token = match env::var(TOKEN_ENV) {
            Ok(token) if !token.trim().is_empty() => Some(token.trim().to_string()),
            _ => store.load()?,
        };
        Ok(Self::new(store, token))
    }

    /// `Authorization` header value, if signed in.
    pub fn authorization(&self) -> Option<String> {
        self.token
            .read()
            .as_ref()
            .map(|t| format!("Bearer {}", t.expose_secret()))
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.read().is_some()
    }

    pub fn login(&self, token: &str) -> Result<()> {
        let token = token.trim();
        if token.is_empty() {
            return Err(HotelDeskError::InvalidInput("token cannot be empty".to_string()));
        }
        self.store.save(token)?;
        *self.token.write() = Some(SecretBox::new(Box::new(token.to_string())));
        self.state.send_replace(SessionState::Authenticated);
        tracing::info!("session stored");
        Ok(())
    }

    pub fn logout(&self) -> Result<()> {
        self.store.clear()?;
        *self.token.write() = None;
        self.state.send_replace(SessionState::Anonymous);
        Ok(())
    }

    /// Drop the credentials after the server rejected them.
    pub fn invalidate(&self) {
        tracing::warn!("server rejected the session token, clearing credentials");
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "failed to clear stored session");
        }
        *self.token.write() = None;
        self.state.send_replace(SessionState::Expired);
    }

    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("token", &self.is_authenticated().then_some("[REDACTED]"))
            .field("state", &self.state())
            .finish()
    }
}

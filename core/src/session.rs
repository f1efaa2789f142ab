//! Session store - bearer credential lifecycle and persistence

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::client::ApiClient;
use crate::models::{AuthResponse, LoginRequest};

const SESSION_FILE: &str = "session.json";

/// On-disk shape of the persisted credential.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedSession {
    access_token: String,
    #[serde(default)]
    saved_at: i64,
}

/// Holds the current bearer credential. The credential survives process
/// restarts via a single JSON file; a restored credential is trusted
/// optimistically and only invalidated by the backend rejecting a later
/// call or by an explicit logout.
pub struct SessionStore {
    api: Arc<ApiClient>,
    token: RwLock<Option<String>>,
    session_path: PathBuf,
}

impl SessionStore {
    pub fn new(api: Arc<ApiClient>, data_dir: &Path) -> Self {
        let session_path = data_dir.join(SESSION_FILE);
        let token = load_persisted(&session_path);
        if token.is_some() {
            tracing::debug!("Restored session credential from {:?}", session_path);
        }

        Self {
            api,
            token: RwLock::new(token),
            session_path,
        }
    }

    /// Authenticate against the backend. On success the credential is stored
    /// and persisted and the call returns true; on any failure (rejected
    /// credentials, transport error, undecodable body) prior state is left
    /// untouched and the call returns false.
    pub async fn login(&self, username: &str, password: &str) -> bool {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let response = match self.api.post_json("/api/auth/login", &body, None).await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("Login request failed: {}", e);
                return false;
            }
        };

        if !response.status().is_success() {
            tracing::debug!("Login rejected with status {}", response.status());
            return false;
        }

        let auth = match response.json::<AuthResponse>().await {
            Ok(auth) => auth,
            Err(e) => {
                tracing::debug!("Login response not decodable: {}", e);
                return false;
            }
        };

        *self.token.write().await = Some(auth.access_token.clone());
        self.persist(&auth.access_token);
        true
    }

    /// Drop the credential, in memory and on disk. Idempotent. Dependent
    /// caches are reset by the workbench, which owns the teardown order.
    pub async fn logout(&self) {
        *self.token.write().await = None;

        match std::fs::remove_file(&self.session_path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(
                    "Failed to remove session file {:?}: {}",
                    self.session_path,
                    e
                );
            }
        }
    }

    /// Current bearer credential, if any.
    pub async fn current_credential(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.token.read().await.is_some()
    }

    fn persist(&self, token: &str) {
        let session = PersistedSession {
            access_token: token.to_string(),
            saved_at: chrono::Utc::now().timestamp(),
        };

        if let Some(parent) = self.session_path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!("Failed to create session directory {:?}: {}", parent, e);
                return;
            }
        }

        match serde_json::to_string_pretty(&session) {
            Ok(content) => {
                if let Err(e) = std::fs::write(&self.session_path, content) {
                    tracing::warn!(
                        "Failed to persist session to {:?}: {}",
                        self.session_path,
                        e
                    );
                }
            }
            Err(e) => {
                tracing::warn!("Failed to serialize session: {}", e);
            }
        }
    }
}

fn load_persisted(path: &Path) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    let session: PersistedSession = match serde_json::from_str(&content) {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!("Ignoring unreadable session file {:?}: {}", path, e);
            return None;
        }
    };

    if session.access_token.is_empty() {
        None
    } else {
        Some(session.access_token)
    }
}

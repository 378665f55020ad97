//! Client configuration model.

use serde::{Deserialize, Serialize};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Settings injected into the backend gateway at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base address of the backend, e.g. `https://mail-api.example.com`.
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    /// Value of the backend's `session_id` cookie, obtained after signing in.
    #[serde(default)]
    pub session_cookie: Option<String>,
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            session_cookie: None,
        }
    }
}

impl ClientConfig {
    /// The backend address without trailing slashes.
    pub fn base_url(&self) -> &str {
        self.backend_url.trim_end_matches('/')
    }
}

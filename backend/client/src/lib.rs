//! Login client for the Nexus API
//!
//! A Rust rendition of the single login form: two local string fields, a
//! POST to /login on submit, a persisted "authenticated" flag on success,
//! and a navigation target. Failures go to the diagnostic channel only;
//! nothing user-visible is produced, which is the inherited contract of the
//! form (a known UX gap, see DESIGN.md).

use anyhow::Context;
use std::path::{Path, PathBuf};

/// Route the form navigates to after a successful login.
pub const FEED_ROUTE: &str = "/dashboard/feed";

/// The two controlled fields of the login form.
#[derive(Debug, Default, Clone)]
pub struct LoginForm {
    email: String,
    password: String,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Thin HTTP client for the Nexus API.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    /// POST /login with the form credentials. Any non-2xx status is an error.
    pub async fn login(&self, form: &LoginForm) -> anyhow::Result<serde_json::Value> {
        let response = self
            .http
            .post(format!("{}/login", self.base_url))
            .json(&serde_json::json!({
                "email": form.email,
                "password": form.password,
            }))
            .send()
            .await
            .context("login request failed")?
            .error_for_status()
            .context("login rejected")?;

        response.json().await.context("invalid login response")
    }
}

/// Persistent client storage for the opaque authenticated flag, the
/// localStorage analog of the original form.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Store path from NEXUS_SESSION_FILE, defaulting next to the home
    /// directory (or the working directory when HOME is unset).
    pub fn from_env() -> Self {
        let path = std::env::var("NEXUS_SESSION_FILE").unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            format!("{}/.nexus_session", home)
        });
        Self::new(path)
    }

    pub fn set_authenticated(&self) -> anyhow::Result<()> {
        std::fs::write(&self.path, "authenticated=true")
            .with_context(|| format!("failed to write session file {}", self.path.display()))
    }

    pub fn is_authenticated(&self) -> bool {
        std::fs::read_to_string(&self.path)
            .map(|contents| contents.trim() == "authenticated=true")
            .unwrap_or(false)
    }
}

/// Submit the form.
///
/// On success the authenticated flag is persisted and the feed route is
/// returned for navigation. On failure the error is logged and `None` comes
/// back; the store is left untouched.
pub async fn submit(form: &LoginForm, api: &ApiClient, store: &SessionStore) -> Option<&'static str> {
    match api.login(form).await {
        Ok(user) => {
            if let Err(e) = store.set_authenticated() {
                tracing::error!("failed to persist session: {:#}", e);
                return None;
            }
            tracing::info!(email = %form.email(), "login succeeded: {}", user["id"]);
            Some(FEED_ROUTE)
        }
        Err(e) => {
            tracing::error!("login failed: {:#}", e);
            None
        }
    }
}

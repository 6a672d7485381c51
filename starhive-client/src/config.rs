//! Client configuration.

use crate::error::{ClientError, ClientResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Public API root used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.starhive.com/public/v1";

pub const API_TOKEN_ENV: &str = "STARHIVE_API_TOKEN";
pub const WORKSPACE_ID_ENV: &str = "STARHIVE_WORKSPACE_ID";
pub const BASE_URL_ENV: &str = "STARHIVE_BASE_URL";

/// Credentials and endpoint for a Starhive workspace.
#[derive(Clone, Serialize, Deserialize)]
pub struct StarhiveConfig {
    /// API token sent as a bearer token.
    pub api_token: String,
    /// Workspace every request is scoped to.
    pub workspace_id: String,
    /// API root, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for StarhiveConfig {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            workspace_id: String::new(),
            base_url: default_base_url(),
        }
    }
}

impl fmt::Debug for StarhiveConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StarhiveConfig")
            .field("api_token", &"<redacted>")
            .field("workspace_id", &self.workspace_id)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl StarhiveConfig {
    pub fn new(api_token: impl Into<String>, workspace_id: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            workspace_id: workspace_id.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Reads the configuration from `STARHIVE_API_TOKEN`, `STARHIVE_WORKSPACE_ID`
    /// and the optional `STARHIVE_BASE_URL`.
    pub fn from_env() -> ClientResult<Self> {
        let workspace_id = non_empty_env(WORKSPACE_ID_ENV)
            .ok_or_else(|| ClientError::Config("Workspace id is not set".to_string()))?;
        let api_token = non_empty_env(API_TOKEN_ENV)
            .ok_or_else(|| ClientError::Config("API token is not set".to_string()))?;
        let base_url = non_empty_env(BASE_URL_ENV).unwrap_or_else(default_base_url);
        Ok(Self {
            api_token,
            workspace_id,
            base_url,
        })
    }

    /// Checks that both credentials are present.
    pub fn validate(&self) -> ClientResult<()> {
        if self.workspace_id.trim().is_empty() {
            return Err(ClientError::Config("Workspace id is not set".to_string()));
        }
        if self.api_token.trim().is_empty() {
            return Err(ClientError::Config("API token is not set".to_string()));
        }
        if self.base_url.trim().is_empty() {
            return Err(ClientError::Config("base URL is empty".to_string()));
        }
        Ok(())
    }

    /// Builds an absolute URL for an API path starting with `/`.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

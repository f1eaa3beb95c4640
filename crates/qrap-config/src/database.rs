//! libSQL database configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Default local database file.
fn default_path() -> String {
    String::from(".qrap/qrap.db")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Local database file, or `:memory:`.
    #[serde(default = "default_path")]
    pub path: String,

    /// Remote database URL (e.g., `libsql://qrap-acme.turso.io`). Takes
    /// precedence over `path` when set together with `auth_token`.
    #[serde(default)]
    pub url: String,

    /// Auth token for the remote database.
    #[serde(default)]
    pub auth_token: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            url: String::new(),
            auth_token: String::new(),
        }
    }
}

impl DatabaseConfig {
    /// Check if a remote database is configured.
    pub fn is_remote(&self) -> bool {
        !self.url.is_empty() && !self.auth_token.is_empty()
    }

    /// Check the section for values that cannot work.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingAuthToken` for a URL without a token, and
    /// `ConfigError::InvalidValue` for an empty local path or a URL without a
    /// supported scheme.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.url.is_empty() && self.auth_token.is_empty() {
            return Err(ConfigError::MissingAuthToken {
                url: self.url.clone(),
            });
        }
        if !self.is_remote() && self.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.path".into(),
                reason: "must not be empty when no remote database is configured".into(),
            });
        }
        if !self.url.is_empty()
            && !["libsql://", "https://", "http://"]
                .iter()
                .any(|scheme| self.url.starts_with(scheme))
        {
            return Err(ConfigError::InvalidValue {
                field: "database.url".into(),
                reason: format!("unsupported scheme in '{}'", self.url),
            });
        }
        Ok(())
    }
}

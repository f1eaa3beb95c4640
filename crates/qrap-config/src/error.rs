//! Errors raised while loading QRAP configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A TOML file or `QRAP_*` variable could not be read into `QrapConfig`.
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    /// `database.url` is set but `database.auth_token` is not, so the remote
    /// database cannot be opened.
    #[error("database.url is set to '{url}' but database.auth_token is empty")]
    MissingAuthToken { url: String },

    /// A `database` or `general` field holds a value the engine cannot use.
    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

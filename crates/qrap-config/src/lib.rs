//! # qrap-config
//!
//! Layered configuration loading for QRAP using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`QRAP_*` prefix, `__` as separator)
//! 2. Project-level `.qrap/config.toml`
//! 3. User-level `~/.config/qrap/config.toml`
//! 4. Built-in defaults
//!
//! Figment maps `QRAP_DATABASE__PATH` -> `database.path`,
//! `QRAP_GENERAL__DEFAULT_LIMIT` -> `general.default_limit`, etc.
//!
//! ```no_run
//! use qrap_config::QrapConfig;
//!
//! let config = QrapConfig::load_with_dotenv().expect("config");
//! if config.database.is_remote() {
//!     println!("Remote database: {}", config.database.url);
//! }
//! ```

mod database;
mod error;
mod general;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct QrapConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl QrapConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.database.validate()?;
        Ok(config)
    }

    /// Load `.env` from the current directory, then [`Self::load`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is invalid.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".qrap/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("QRAP_").split("__"))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("qrap").join("config.toml"))
    }
}

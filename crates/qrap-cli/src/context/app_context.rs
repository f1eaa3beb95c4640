use std::path::Path;

use anyhow::Context;
use qrap_config::QrapConfig;
use qrap_db::service::QrapService;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: QrapService,
    pub config: QrapConfig,
}

impl AppContext {
    /// Open the configured database and build the assessment service.
    pub async fn init(config: QrapConfig) -> anyhow::Result<Self> {
        if !config.database.is_remote() {
            ensure_parent_dir(&config.database.path)?;
        }

        let service = QrapService::from_config(&config.database)
            .await
            .context("failed to initialize qrap-db service")?;

        tracing::debug!(remote = service.db().is_remote(), "qrap service ready");
        Ok(Self { service, config })
    }
}

fn ensure_parent_dir(db_path: &str) -> anyhow::Result<()> {
    match Path::new(db_path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create database directory {}", parent.display())),
        _ => Ok(()),
    }
}

use qrap_config::QrapConfig;

use crate::cli::GlobalFlags;

/// Load layered configuration (with `.env`) and apply command-line overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<QrapConfig> {
    let mut config = QrapConfig::load_with_dotenv()?;
    apply_overrides(&mut config, flags);
    Ok(config)
}

/// `--database` always selects a local file, even when a remote URL is configured.
fn apply_overrides(config: &mut QrapConfig, flags: &GlobalFlags) {
    if let Some(path) = &flags.database {
        tracing::debug!(%path, "database path overridden on the command line");
        config.database.path.clone_from(path);
        config.database.url.clear();
        config.database.auth_token.clear();
    }
}

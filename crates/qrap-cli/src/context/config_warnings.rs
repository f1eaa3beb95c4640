use qrap_config::QrapConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &QrapConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &QrapConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    // Single-underscore keys (QRAP_DATABASE_URL) never reach the database section.
    if !config.database.is_remote() && has_single_underscore_key(&env_keys, "QRAP_DATABASE") {
        warnings.push(
            "Database config appears local while QRAP_DATABASE* env vars exist. Use double underscores (example: QRAP_DATABASE__URL)."
                .to_string(),
        );
    }

    if has_single_underscore_key(&env_keys, "QRAP_GENERAL") {
        warnings.push(
            "QRAP_GENERAL* env vars are ignored without double underscores (example: QRAP_GENERAL__DEFAULT_LIMIT)."
                .to_string(),
        );
    }

    warnings
}

fn has_single_underscore_key(keys: &[String], prefix: &str) -> bool {
    keys.iter()
        .filter_map(|key| key.strip_prefix(prefix))
        .any(|rest| !rest.starts_with("__"))
}

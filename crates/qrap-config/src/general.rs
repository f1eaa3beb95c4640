//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default page size for list commands.
const fn default_limit() -> u32 {
    50
}

/// Default secrecy shelf life used by `qrap hndl`.
const fn default_shelf_life_years() -> i32 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Default result limit for list commands. Out-of-range values are
    /// clamped by the engine, not rejected here.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Default data shelf life, in years, for HNDL estimates.
    #[serde(default = "default_shelf_life_years")]
    pub default_shelf_life_years: i32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            default_shelf_life_years: default_shelf_life_years(),
        }
    }
}

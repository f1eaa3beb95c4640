use chrono::Datelike;
use qrap_config::QrapConfig;
use qrap_core::hndl::HndlCalculator;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::HndlArgs;
use crate::output::output;

/// Handle `qrap hndl`.
pub fn handle(args: &HndlArgs, config: &QrapConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let shelf_life = args
        .shelf_life
        .unwrap_or(config.general.default_shelf_life_years);
    if shelf_life < 0 {
        anyhow::bail!("shelf life must not be negative (got {shelf_life})");
    }
    let year = args.year.unwrap_or_else(|| chrono::Utc::now().year());

    let result = HndlCalculator.calculate(&args.algorithm, shelf_life, year);
    output(&result, flags.format)
}

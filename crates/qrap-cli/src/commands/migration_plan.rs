use qrap_core::enums::RiskLevel;
use qrap_core::migration::{MigrationPlanner, PlannedAsset};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::MigrationPlanArgs;
use crate::commands::shared::parse::parse_enum;
use crate::output::output;

/// Handle `qrap migration-plan`.
pub fn handle(args: &MigrationPlanArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let assets = args
        .assets
        .iter()
        .map(|raw| parse_asset(raw))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let plan = MigrationPlanner.plan(&assets);
    output(&plan, flags.format)
}

/// Parse `NAME=ALGORITHM` or `NAME=ALGORITHM:URGENCY`.
fn parse_asset(raw: &str) -> anyhow::Result<PlannedAsset> {
    let Some((name, rest)) = raw.split_once('=') else {
        anyhow::bail!("invalid asset '{raw}': expected NAME=ALGORITHM[:URGENCY]");
    };
    let (algorithm, urgency) = match rest.split_once(':') {
        Some((algorithm, urgency)) => (algorithm, Some(urgency)),
        None => (rest, None),
    };
    if name.trim().is_empty() || algorithm.trim().is_empty() {
        anyhow::bail!("invalid asset '{raw}': name and algorithm must not be empty");
    }

    let asset = PlannedAsset::new(name.trim(), algorithm.trim());
    match urgency {
        Some(urgency) => Ok(asset.with_urgency(parse_enum::<RiskLevel>(urgency, "urgency")?)),
        None => Ok(asset),
    }
}

use std::io::Read;

use anyhow::Context;
use qrap_core::scoring::{RiskScorer, ScoredFinding};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ScoreArgs;
use crate::output::output;

/// Handle `qrap score`.
pub fn handle(args: &ScoreArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let raw = match args.input.as_deref() {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read findings from stdin")?;
            buf
        }
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read findings from {path}"))?,
    };

    let findings = parse_findings(&raw)?;
    tracing::debug!(findings = findings.len(), total_assets = args.total_assets, "scoring findings");
    let result = RiskScorer.score(&findings, args.total_assets);
    output(&result, flags.format)
}

fn parse_findings(raw: &str) -> anyhow::Result<Vec<ScoredFinding>> {
    serde_json::from_str(raw).context("findings must be a JSON array of {category, risk_level, affected_asset}")
}

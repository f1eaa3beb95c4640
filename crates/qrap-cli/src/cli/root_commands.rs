use clap::{Args, Subcommand};

use crate::cli::subcommands::{AssessmentCommands, FindingCommands, OrgCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Organizations.
    Org {
        #[command(subcommand)]
        action: OrgCommands,
    },
    /// Assessments and their runs.
    Assessment {
        #[command(subcommand)]
        action: AssessmentCommands,
    },
    /// Findings produced by assessment runs.
    Finding {
        #[command(subcommand)]
        action: FindingCommands,
    },
    /// Estimate harvest-now-decrypt-later exposure for an algorithm.
    Hndl(HndlArgs),
    /// Plan the move of classical-crypto assets to PQC algorithms.
    MigrationPlan(MigrationPlanArgs),
    /// Score a set of findings on a 0-100 scale.
    Score(ScoreArgs),
}

#[derive(Clone, Debug, Args)]
pub struct HndlArgs {
    /// Algorithm name (e.g. RSA-2048, ECDSA-P256, ML-KEM-768).
    pub algorithm: String,
    /// Years the protected data must stay secret.
    #[arg(long)]
    pub shelf_life: Option<i32>,
    /// Reference year (defaults to the current year).
    #[arg(long)]
    pub year: Option<i32>,
}

#[derive(Clone, Debug, Args)]
pub struct MigrationPlanArgs {
    /// Asset to plan, as NAME=ALGORITHM or NAME=ALGORITHM:URGENCY (repeatable).
    #[arg(long = "asset", value_name = "NAME=ALGORITHM[:URGENCY]", required = true)]
    pub assets: Vec<String>,
}

#[derive(Clone, Debug, Args)]
pub struct ScoreArgs {
    /// Number of assets the findings were gathered from.
    #[arg(long)]
    pub total_assets: u32,
    /// JSON file holding an array of findings (`-` or omitted reads stdin).
    #[arg(long)]
    pub input: Option<String>,
}

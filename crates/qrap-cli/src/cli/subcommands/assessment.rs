use clap::Subcommand;

/// Assessment commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AssessmentCommands {
    /// Create a DRAFT assessment.
    Create {
        #[arg(long)]
        name: String,
        /// Owning organization ID.
        #[arg(long)]
        org: String,
        /// Target asset (repeatable).
        #[arg(long)]
        asset: Vec<String>,
        #[arg(long, default_value = "qrap-cli")]
        created_by: String,
    },
    /// Get an assessment with its finding summary.
    Get {
        id: String,
        /// Skip the finding summary.
        #[arg(long)]
        brief: bool,
    },
    /// List assessments, newest first.
    List {
        /// Only this organization's assessments.
        #[arg(long)]
        org: Option<String>,
        /// Only assessments in this status (draft, in-progress, completed, failed).
        #[arg(long)]
        status: Option<String>,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i64,
    },
    /// Run an assessment: synthesize findings and score risk.
    Run { id: String },
}

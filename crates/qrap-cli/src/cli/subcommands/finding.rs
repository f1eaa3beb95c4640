use clap::Subcommand;

/// Finding commands.
#[derive(Clone, Debug, Subcommand)]
pub enum FindingCommands {
    /// Get a finding by ID.
    Get { id: String },
    /// List an assessment's findings, most severe first.
    List {
        #[arg(long)]
        assessment: String,
        /// critical, high, medium, low
        #[arg(long)]
        risk_level: Option<String>,
        /// missing-pqc, harvest-now-decrypt-later, weak-algorithm, ...
        #[arg(long)]
        category: Option<String>,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i64,
    },
}

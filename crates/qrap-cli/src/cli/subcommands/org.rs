use clap::Subcommand;

/// Organization commands.
#[derive(Clone, Debug, Subcommand)]
pub enum OrgCommands {
    /// Create an organization.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, default_value = "qrap-cli")]
        created_by: String,
    },
    /// Get an organization by ID.
    Get { id: String },
    /// List organizations, newest first.
    List {
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i64,
    },
    /// Replace an organization's name and description.
    Update {
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, default_value = "qrap-cli")]
        updated_by: String,
    },
}

mod get;
mod list;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::FindingCommands;
use crate::context::AppContext;

/// Handle `qrap finding`.
pub async fn handle(
    action: &FindingCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        FindingCommands::Get { id } => get::run(id, ctx, flags).await,
        FindingCommands::List {
            assessment,
            risk_level,
            category,
            offset,
        } => {
            list::run(
                assessment,
                risk_level.as_deref(),
                category.as_deref(),
                *offset,
                ctx,
                flags,
            )
            .await
        }
    }
}

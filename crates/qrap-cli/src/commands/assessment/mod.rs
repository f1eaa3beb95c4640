mod create;
mod get;
mod list;
mod run;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AssessmentCommands;
use crate::context::AppContext;

/// Handle `qrap assessment`.
pub async fn handle(
    action: &AssessmentCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        AssessmentCommands::Create {
            name,
            org,
            asset,
            created_by,
        } => create::run(name, org, asset, created_by, ctx, flags).await,
        AssessmentCommands::Get { id, brief } => get::run(id, *brief, ctx, flags).await,
        AssessmentCommands::List {
            org,
            status,
            offset,
        } => list::run(org.as_deref(), status.as_deref(), *offset, ctx, flags).await,
        AssessmentCommands::Run { id } => run::run(id, ctx, flags).await,
    }
}

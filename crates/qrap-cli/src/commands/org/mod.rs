mod create;
mod get;
mod list;
mod update;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::OrgCommands;
use crate::context::AppContext;

/// Handle `qrap org`.
pub async fn handle(action: &OrgCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        OrgCommands::Create {
            name,
            description,
            created_by,
        } => create::run(name, description.as_deref(), created_by, ctx, flags).await,
        OrgCommands::Get { id } => get::run(id, ctx, flags).await,
        OrgCommands::List { offset } => list::run(*offset, ctx, flags).await,
        OrgCommands::Update {
            id,
            name,
            description,
            updated_by,
        } => update::run(id, name, description.as_deref(), updated_by, ctx, flags).await,
    }
}

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Org { action } => commands::org::handle(&action, ctx, flags).await,
        Commands::Assessment { action } => commands::assessment::handle(&action, ctx, flags).await,
        Commands::Finding { action } => commands::finding::handle(&action, ctx, flags).await,
        Commands::Hndl(_) | Commands::MigrationPlan(_) | Commands::Score(_) => {
            unreachable!("database-free commands are pre-dispatched in main")
        }
    }
}

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    name: &str,
    description: Option<&str>,
    created_by: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let org = ctx
        .service
        .create_organization(name, description, created_by)
        .await?;
    output(&org, flags.format)
}

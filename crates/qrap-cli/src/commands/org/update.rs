use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_id;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    id: &str,
    name: &str,
    description: Option<&str>,
    updated_by: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let id = parse_id(id, "organization id")?;
    let org = ctx
        .service
        .update_organization(id, name, description, updated_by)
        .await?;
    output(&org, flags.format)
}

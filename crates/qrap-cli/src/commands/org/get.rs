use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_id;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let id = parse_id(id, "organization id")?;
    let org = ctx.service.get_organization(id).await?;
    output(&org, flags.format)
}

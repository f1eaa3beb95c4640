use crate::cli::GlobalFlags;
use crate::commands::shared::limit::pagination;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(offset: i64, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let page = ctx
        .service
        .list_organizations(pagination(offset, ctx, flags))
        .await?;
    output(&page, flags.format)
}

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    name: &str,
    org: &str,
    assets: &[String],
    created_by: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    // The engine validates the organization reference itself.
    let target_assets = (!assets.is_empty()).then(|| assets.to_vec());
    let assessment = ctx
        .service
        .create_assessment(name, org, target_assets, created_by)
        .await?;
    output(&assessment, flags.format)
}

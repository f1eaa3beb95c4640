use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_id;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: &str, brief: bool, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let id = parse_id(id, "assessment id")?;
    if brief {
        let assessment = ctx.service.get_assessment(id).await?;
        return output(&assessment, flags.format);
    }
    let detail = ctx.service.get_assessment_with_summary(id).await?;
    output(&detail, flags.format)
}

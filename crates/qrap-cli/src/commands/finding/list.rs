use qrap_core::enums::{FindingCategory, RiskLevel};
use qrap_db::query::FindingFilter;

use crate::cli::GlobalFlags;
use crate::commands::shared::limit::pagination;
use crate::commands::shared::parse::{parse_id, parse_opt_enum};
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    assessment: &str,
    risk_level: Option<&str>,
    category: Option<&str>,
    offset: i64,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let filter = build_filter(assessment, risk_level, category)?;
    let page = ctx
        .service
        .list_findings(&filter, pagination(offset, ctx, flags))
        .await?;
    output(&page, flags.format)
}

fn build_filter(
    assessment: &str,
    risk_level: Option<&str>,
    category: Option<&str>,
) -> anyhow::Result<FindingFilter> {
    Ok(FindingFilter {
        assessment_id: parse_id(assessment, "assessment id")?,
        risk_level: parse_opt_enum::<RiskLevel>(risk_level, "risk_level")?,
        category: parse_opt_enum::<FindingCategory>(category, "category")?,
    })
}

use qrap_core::enums::AssessmentStatus;
use qrap_db::query::AssessmentFilter;

use crate::cli::GlobalFlags;
use crate::commands::shared::limit::pagination;
use crate::commands::shared::parse::{parse_id, parse_opt_enum};
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    org: Option<&str>,
    status: Option<&str>,
    offset: i64,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let filter = build_filter(org, status)?;
    let page = ctx
        .service
        .list_assessments(&filter, pagination(offset, ctx, flags))
        .await?;
    output(&page, flags.format)
}

fn build_filter(org: Option<&str>, status: Option<&str>) -> anyhow::Result<AssessmentFilter> {
    Ok(AssessmentFilter {
        organization_id: org.map(|raw| parse_id(raw, "organization id")).transpose()?,
        status: parse_opt_enum::<AssessmentStatus>(status, "status")?,
    })
}

#[cfg(test)]
mod tests {
    use qrap_core::enums::AssessmentStatus;
    use uuid::Uuid;

    use super::build_filter;

    #[test]
    fn builds_typed_filter() {
        let filter = build_filter(
            Some("00000000-0000-0000-0000-000000000001"),
            Some("completed"),
        )
        .expect("filter should build");
        assert_eq!(filter.organization_id, Some(Uuid::from_u128(1)));
        assert_eq!(filter.status, Some(AssessmentStatus::Completed));
    }

    #[test]
    fn rejects_unknown_status() {
        let err = build_filter(None, Some("archived")).expect_err("should fail");
        assert!(err.to_string().contains("invalid status 'archived'"));
    }
}

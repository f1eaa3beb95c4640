//! End-to-end assessment workflow tests against the public API.
//!
//! - Organization and assessment creation
//! - Runs, re-runs and the finding summary
//! - Listings with filters and pagination
//! - On-disk persistence across service instances

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::TempDir;
use uuid::Uuid;

use qrap_core::clock::SteppingClock;
use qrap_core::enums::{AssessmentStatus, FindingCategory, RiskLevel};
use qrap_core::pagination::Pagination;
use qrap_db::error::ServiceError;
use qrap_db::query::{AssessmentFilter, FindingFilter};
use qrap_db::service::QrapService;

async fn test_service() -> QrapService {
    let start = Utc.with_ymd_and_hms(2026, 5, 1, 9, 0, 0).unwrap();
    QrapService::new_local(":memory:")
        .await
        .unwrap()
        .with_clock(Arc::new(SteppingClock::new(start, Duration::milliseconds(10))))
}

fn assets(names: &[&str]) -> Option<Vec<String>> {
    Some(names.iter().map(ToString::to_string).collect())
}

// ---------------------------------------------------------------------------
// Workflow
// ---------------------------------------------------------------------------

#[tokio::test]
async fn full_workflow() {
    let svc = test_service().await;
    let org = svc
        .create_organization("Acme Bank", Some("Retail banking"), "ciso@acme")
        .await
        .unwrap();

    let draft = svc
        .create_assessment(
            "Core systems",
            &org.id.to_string(),
            assets(&["core-db", "payments-api", "hsm"]),
            "ciso@acme",
        )
        .await
        .unwrap();
    assert_eq!(draft.status, AssessmentStatus::Draft);

    let done = svc.run_assessment(draft.id).await.unwrap();
    assert_eq!(done.status, AssessmentStatus::Completed);
    assert_eq!(done.overall_risk, Some(RiskLevel::Critical));
    assert_eq!(done.assets_scanned, 3);
    assert_eq!(done.risk_score, 75.0);
    assert_eq!(done.pqc_readiness, 0.0);

    let detail = svc.get_assessment_with_summary(draft.id).await.unwrap();
    let summary = detail.summary.unwrap();
    assert_eq!(summary.total_findings, 6);
    assert_eq!(summary.critical_findings, 3);
    assert_eq!(summary.high_findings, 3);

    let json = serde_json::to_value(&svc.get_assessment_with_summary(draft.id).await.unwrap())
        .unwrap();
    assert_eq!(json["status"], "COMPLETED");
    assert_eq!(json["summary"]["pqc_readiness_percentage"], 0.0);
}

#[rstest]
#[case::draft(AssessmentStatus::Draft, true)]
#[case::completed(AssessmentStatus::Completed, true)]
#[case::failed(AssessmentStatus::Failed, true)]
#[case::in_progress(AssessmentStatus::InProgress, false)]
#[tokio::test]
async fn run_guard(#[case] from: AssessmentStatus, #[case] allowed: bool) {
    let svc = test_service().await;
    let org = svc.create_organization("Acme", None, "u").await.unwrap();
    let a = svc
        .create_assessment("a", &org.id.to_string(), assets(&["db1"]), "u")
        .await
        .unwrap();
    svc.update_assessment_status(a.id, from, "u", Utc::now())
        .await
        .unwrap();

    let result = svc.run_assessment(a.id).await;
    if allowed {
        assert_eq!(result.unwrap().status, AssessmentStatus::Completed);
    } else {
        assert!(matches!(result, Err(ServiceError::InvalidState(_))));
    }
}

#[tokio::test]
async fn rerun_clears_nothing_but_appends() {
    let svc = test_service().await;
    let org = svc.create_organization("Acme", None, "u").await.unwrap();
    let a = svc
        .create_assessment("a", &org.id.to_string(), assets(&["db1"]), "u")
        .await
        .unwrap();

    svc.run_assessment(a.id).await.unwrap();
    svc.run_assessment(a.id).await.unwrap();

    let page = svc
        .list_findings(&FindingFilter::for_assessment(a.id), Pagination::default())
        .await
        .unwrap();
    assert_eq!(page.total_count, 4);
    let levels: Vec<_> = page.items.iter().map(|f| f.risk_level).collect();
    assert_eq!(
        levels,
        vec![
            RiskLevel::Critical,
            RiskLevel::Critical,
            RiskLevel::High,
            RiskLevel::High
        ]
    );
    assert!(page.items[0].discovered_at > page.items[1].discovered_at);
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

#[tokio::test]
async fn finding_pagination_walks_all_rows() {
    let svc = test_service().await;
    let org = svc.create_organization("Acme", None, "u").await.unwrap();
    let a = svc
        .create_assessment(
            "a",
            &org.id.to_string(),
            assets(&["a1", "a2", "a3", "a4", "a5"]),
            "u",
        )
        .await
        .unwrap();
    svc.run_assessment(a.id).await.unwrap();

    let filter = FindingFilter::for_assessment(a.id);
    let mut seen = Vec::new();
    let mut offset = 0;
    loop {
        let page = svc
            .list_findings(&filter, Pagination::new(offset, 3))
            .await
            .unwrap();
        assert_eq!(page.total_count, 10);
        if page.items.is_empty() {
            break;
        }
        offset += i64::try_from(page.items.len()).unwrap();
        seen.extend(page.items.into_iter().map(|f| f.id));
    }
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 10);
}

#[tokio::test]
async fn filters_compose() {
    let svc = test_service().await;
    let org = svc.create_organization("Acme", None, "u").await.unwrap();
    let a = svc
        .create_assessment("a", &org.id.to_string(), assets(&["db1", "db2"]), "u")
        .await
        .unwrap();
    svc.run_assessment(a.id).await.unwrap();

    let filter = FindingFilter {
        assessment_id: a.id,
        risk_level: Some(RiskLevel::High),
        category: Some(FindingCategory::HarvestNowDecryptLater),
    };
    let page = svc.list_findings(&filter, Pagination::default()).await.unwrap();
    assert_eq!(page.total_count, 0);
    assert!(page.items.is_empty());

    let drafts = AssessmentFilter {
        organization_id: Some(org.id),
        status: Some(AssessmentStatus::Draft),
    };
    let page = svc.list_assessments(&drafts, Pagination::default()).await.unwrap();
    assert_eq!(page.total_count, 0);
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let svc = test_service().await;
    let id = Uuid::new_v4();
    assert!(matches!(
        svc.get_assessment(id).await,
        Err(ServiceError::NotFound { .. })
    ));
    assert!(matches!(
        svc.get_assessment_with_summary(id).await,
        Err(ServiceError::NotFound { .. })
    ));
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

#[tokio::test]
async fn on_disk_state_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("qrap.db");
    let path = path.to_str().unwrap();

    let id = {
        let svc = QrapService::new_local(path).await.unwrap();
        let org = svc.create_organization("Acme", None, "u").await.unwrap();
        let a = svc
            .create_assessment("a", &org.id.to_string(), assets(&["db1"]), "u")
            .await
            .unwrap();
        svc.run_assessment(a.id).await.unwrap();
        a.id
    };

    let svc = QrapService::new_local(path).await.unwrap();
    let a = svc.get_assessment(id).await.unwrap();
    assert_eq!(a.status, AssessmentStatus::Completed);
    assert_eq!(a.target_assets, vec!["db1".to_string()]);
    let detail = svc.get_assessment_with_summary(id).await.unwrap();
    assert_eq!(detail.summary.unwrap().total_findings, 2);
}

//! Assessment lifecycle: creation, runs, and summarized reads.
//!
//! A run moves an assessment through
//!
//! ```text
//! DRAFT | COMPLETED | FAILED --lease--> IN_PROGRESS --results--> COMPLETED
//!                                                   \--error---> FAILED
//! ```
//!
//! The lease is a compare-and-set on the status observed at load time and is
//! committed on its own, so a concurrent run of the same assessment sees it
//! and backs off. The finding batch and the results write then share one
//! transaction: either both are visible or neither is.

use qrap_core::analysis::{FINDINGS_PER_ASSET, RiskSummary, aggregate, synthesize};
use qrap_core::entities::{Assessment, Finding};
use qrap_core::enums::{AssessmentStatus, EntityType};
use qrap_core::responses::{AssessmentDetail, AssessmentSummary};
use qrap_core::validation::{parse_reference, validate_name};
use uuid::Uuid;

use crate::WriteTx;
use crate::error::{DatabaseError, RunStage, ServiceError};
use crate::service::{QrapService, SYSTEM_ACTOR};

impl QrapService {
    /// Create a DRAFT assessment for an organization.
    ///
    /// Input is validated before anything is written. A well-formed but
    /// unknown `organization_id` is rejected by the store.
    pub async fn create_assessment(
        &self,
        name: &str,
        organization_id: &str,
        target_assets: Option<Vec<String>>,
        created_by: &str,
    ) -> Result<Assessment, ServiceError> {
        validate_name("name", name)?;
        let organization_id = parse_reference("organization_id", organization_id)?;

        let now = self.now();
        let assessment = Assessment {
            id: self.next_id(),
            name: name.to_string(),
            organization_id,
            status: AssessmentStatus::Draft,
            overall_risk: None,
            risk_score: 0.0,
            target_assets: target_assets.unwrap_or_default(),
            assets_scanned: 0,
            pqc_readiness: 0.0,
            started_at: None,
            completed_at: None,
            created_by: created_by.to_string(),
            created_at: now,
            updated_by: None,
            updated_at: now,
        };
        self.insert_assessment(&assessment).await?;

        tracing::info!(
            assessment_id = %assessment.id,
            %organization_id,
            assets = assessment.target_assets.len(),
            "assessment created"
        );
        Ok(assessment)
    }

    /// Run an assessment: synthesize findings for its target assets and
    /// record the aggregate risk.
    ///
    /// Permitted from DRAFT, COMPLETED and FAILED. Each run appends a new
    /// finding batch; earlier batches are kept.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the assessment does not exist.
    /// - `InvalidState` if it is IN_PROGRESS, another run took the lease
    ///   first, or its stored status is unrecognised.
    /// - `PartialFailure` if persisting the run failed after the lease was
    ///   taken. Nothing from the run is visible and the assessment is FAILED.
    pub async fn run_assessment(&self, id: Uuid) -> Result<Assessment, ServiceError> {
        let assessment = self
            .fetch_assessment(id)
            .await
            .map_err(|e| ServiceError::from_lookup(e, EntityType::Assessment, id))?;

        let observed = assessment.status;
        observed.transition(&id.to_string(), AssessmentStatus::InProgress)?;

        let started_at = self.now();
        if !self.lease_assessment(id, observed, started_at).await? {
            return Err(ServiceError::InvalidState(format!(
                "assessment {id} is no longer {observed}; another run holds it"
            )));
        }
        tracing::debug!(assessment_id = %id, from = %observed, "run lease taken");

        let findings = synthesize(id, &assessment.target_assets, started_at, self.ids());
        let summary = aggregate(&findings, FINDINGS_PER_ASSET);
        let assets_scanned = u32::try_from(assessment.target_assets.len()).unwrap_or(u32::MAX);

        if let Err((stage, source)) = self
            .persist_run(id, &findings, &summary, assets_scanned)
            .await
        {
            tracing::error!(assessment_id = %id, %stage, error = %source, "assessment run failed");
            self.mark_failed(id).await;
            return Err(ServiceError::PartialFailure {
                assessment_id: id,
                stage,
                source,
            });
        }

        tracing::info!(
            assessment_id = %id,
            findings = findings.len(),
            overall_risk = %summary.overall_risk,
            risk_score = summary.risk_score,
            pqc_readiness = summary.pqc_readiness,
            "assessment run completed"
        );

        self.fetch_assessment(id)
            .await
            .map_err(|e| ServiceError::from_lookup(e, EntityType::Assessment, id))
    }

    /// Insert the finding batch and the results in one transaction.
    async fn persist_run(
        &self,
        id: Uuid,
        findings: &[Finding],
        summary: &RiskSummary,
        assets_scanned: u32,
    ) -> Result<(), (RunStage, DatabaseError)> {
        let tx = self
            .db()
            .begin_write()
            .await
            .map_err(|e| (RunStage::PersistFindings, e))?;

        if let Err(e) = self.insert_findings_batch(&tx, findings).await {
            rollback_quietly(tx, id).await;
            return Err((RunStage::PersistFindings, e));
        }

        let completed_at = self.now();
        match self
            .update_assessment_results(&tx, id, summary, assets_scanned, completed_at)
            .await
        {
            Ok(1) => {}
            Ok(_) => {
                rollback_quietly(tx, id).await;
                return Err((
                    RunStage::PersistResults,
                    DatabaseError::InvalidState(format!(
                        "assessment {id} left IN_PROGRESS during its run"
                    )),
                ));
            }
            Err(e) => {
                rollback_quietly(tx, id).await;
                return Err((RunStage::PersistResults, e));
            }
        }

        tx.commit().await.map_err(|e| (RunStage::Commit, e))
    }

    /// Best-effort move to FAILED after a run error.
    async fn mark_failed(&self, id: Uuid) {
        match self
            .update_assessment_status(id, AssessmentStatus::Failed, SYSTEM_ACTOR, self.now())
            .await
        {
            Ok(0) => tracing::warn!(assessment_id = %id, "assessment vanished before it could be marked FAILED"),
            Ok(_) => {}
            Err(error) => {
                tracing::error!(assessment_id = %id, %error, "failed to mark assessment FAILED");
            }
        }
    }

    /// Point lookup of an assessment.
    pub async fn get_assessment(&self, id: Uuid) -> Result<Assessment, ServiceError> {
        self.fetch_assessment(id)
            .await
            .map_err(|e| ServiceError::from_lookup(e, EntityType::Assessment, id))
    }

    /// Load an assessment together with its finding summary.
    ///
    /// A failing summary query does not fail the call: the assessment is
    /// returned with `summary: None`.
    pub async fn get_assessment_with_summary(
        &self,
        id: Uuid,
    ) -> Result<AssessmentDetail, ServiceError> {
        let assessment = self.get_assessment(id).await?;

        let summary = match self.summarize_findings(id).await {
            Ok(counts) => Some(AssessmentSummary {
                total_findings: counts.total,
                critical_findings: counts.critical,
                high_findings: counts.high,
                medium_findings: counts.medium,
                low_findings: counts.low,
                pqc_readiness: assessment.pqc_readiness,
                assets_scanned: assessment.assets_scanned,
            }),
            Err(error) => {
                tracing::warn!(assessment_id = %id, %error, "finding summary unavailable");
                None
            }
        };

        Ok(AssessmentDetail {
            assessment,
            summary,
        })
    }
}

async fn rollback_quietly(tx: WriteTx<'_>, id: Uuid) {
    if let Err(error) = tx.rollback().await {
        tracing::warn!(assessment_id = %id, %error, "rollback of run transaction failed");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use qrap_core::enums::{FindingCategory, RiskLevel};
    use qrap_core::ids::SequentialIds;

    use super::*;
    use crate::query::FindingFilter;
    use crate::test_support::helpers::{finding, seed_organization, t0, test_service};

    async fn draft(svc: &QrapService, assets: &[&str]) -> Assessment {
        let org = seed_organization(svc, 1).await;
        svc.create_assessment(
            "Q1 review",
            &org.to_string(),
            Some(assets.iter().map(ToString::to_string).collect()),
            "alice",
        )
        .await
        .unwrap()
    }

    async fn finding_count(svc: &QrapService, id: Uuid) -> u64 {
        svc.count_findings(&FindingFilter::for_assessment(id)).await.unwrap()
    }

    #[tokio::test]
    async fn create_defaults() {
        let svc = test_service().await;
        let org = seed_organization(&svc, 1).await;
        let a = svc
            .create_assessment("Q1 review", &org.to_string(), None, "alice")
            .await
            .unwrap();
        assert_eq!(a.status, AssessmentStatus::Draft);
        assert!(a.target_assets.is_empty());
        assert_eq!(a.risk_score, 0.0);
        assert_eq!(a.pqc_readiness, 0.0);
        assert_eq!(a.created_at, t0());
        assert_eq!(svc.get_assessment(a.id).await.unwrap(), a);
    }

    #[tokio::test]
    async fn create_validates_before_writing() {
        let svc = test_service().await;
        let org = seed_organization(&svc, 1).await.to_string();

        for (name, org_id) in [
            ("", org.as_str()),
            ("   ", org.as_str()),
            ("ok", "not-a-uuid"),
        ] {
            let err = svc.create_assessment(name, org_id, None, "alice").await.unwrap_err();
            assert!(matches!(err, ServiceError::Validation(_)), "{name:?}/{org_id}");
        }
        let long = "x".repeat(256);
        assert!(matches!(
            svc.create_assessment(&long, &org, None, "alice").await,
            Err(ServiceError::Validation(_))
        ));

        let mut rows = svc
            .db()
            .query_with("SELECT COUNT(*) FROM assessments", || ())
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<i64>(0).unwrap(), 0);
    }

    #[tokio::test]
    async fn create_with_unknown_org_is_store_error() {
        let svc = test_service().await;
        let err = svc
            .create_assessment("x", &Uuid::from_u128(77).to_string(), None, "alice")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Store(_)));
    }

    #[tokio::test]
    async fn run_single_asset_worked_example() {
        let svc = test_service().await;
        let a = draft(&svc, &["db1"]).await;

        let done = svc.run_assessment(a.id).await.unwrap();
        assert_eq!(done.status, AssessmentStatus::Completed);
        assert_eq!(done.overall_risk, Some(RiskLevel::Critical));
        assert_eq!(done.risk_score, 75.0);
        assert_eq!(done.pqc_readiness, 0.0);
        assert_eq!(done.assets_scanned, 1);
        assert_eq!(done.updated_by.as_deref(), Some(SYSTEM_ACTOR));
        let (started, completed) = (done.started_at.unwrap(), done.completed_at.unwrap());
        assert!(started < completed);
        assert_eq!(finding_count(&svc, a.id).await, 2);

        let findings = svc
            .query_findings(&FindingFilter::for_assessment(a.id), Default::default())
            .await
            .unwrap();
        assert!(findings.iter().all(|f| f.discovered_at == started));
    }

    #[tokio::test]
    async fn run_with_no_assets_completes_low() {
        let svc = test_service().await;
        let a = draft(&svc, &[]).await;
        let done = svc.run_assessment(a.id).await.unwrap();
        assert_eq!(done.status, AssessmentStatus::Completed);
        assert_eq!(done.overall_risk, Some(RiskLevel::Low));
        assert_eq!(done.risk_score, 0.0);
        assert_eq!(done.pqc_readiness, 100.0);
        assert_eq!(done.assets_scanned, 0);
        assert_eq!(finding_count(&svc, a.id).await, 0);
    }

    #[tokio::test]
    async fn run_missing_is_not_found() {
        let svc = test_service().await;
        let err = svc.run_assessment(Uuid::from_u128(5)).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::NotFound {
                entity_type: EntityType::Assessment,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn run_refuses_in_progress() {
        let svc = test_service().await;
        let a = draft(&svc, &["db1"]).await;
        svc.update_assessment_status(a.id, AssessmentStatus::InProgress, "bob", t0())
            .await
            .unwrap();

        let err = svc.run_assessment(a.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidState(_)));
        assert_eq!(finding_count(&svc, a.id).await, 0);
    }

    #[tokio::test]
    async fn run_refuses_unrecognised_status() {
        let svc = test_service().await;
        let a = draft(&svc, &["db1"]).await;
        svc.db()
            .execute_with("UPDATE assessments SET status = 'ARCHIVED'", || ())
            .await
            .unwrap();
        assert!(matches!(
            svc.run_assessment(a.id).await,
            Err(ServiceError::InvalidState(_))
        ));
    }

    #[tokio::test]
    async fn rerun_appends_a_new_batch() {
        let svc = test_service().await;
        let a = draft(&svc, &["db1", "api-gw"]).await;

        let first = svc.run_assessment(a.id).await.unwrap();
        let second = svc.run_assessment(a.id).await.unwrap();
        assert_eq!(second.status, AssessmentStatus::Completed);
        assert!(second.started_at > first.started_at);
        assert_eq!(finding_count(&svc, a.id).await, 8);
    }

    #[tokio::test]
    async fn injected_write_failure_marks_failed_and_rerun_recovers() {
        let svc = test_service().await;
        let a = draft(&svc, &["db1", "api-gw"]).await;
        svc.db()
            .execute_with(
                "CREATE TRIGGER fail_findings BEFORE INSERT ON findings
                 BEGIN SELECT RAISE(ABORT, 'disk on fire'); END",
                || (),
            )
            .await
            .unwrap();

        let err = svc.run_assessment(a.id).await.unwrap_err();
        match err {
            ServiceError::PartialFailure {
                assessment_id,
                stage,
                ..
            } => {
                assert_eq!(assessment_id, a.id);
                assert_eq!(stage, RunStage::PersistFindings);
            }
            other => panic!("expected PartialFailure, got {other:?}"),
        }

        let failed = svc.get_assessment(a.id).await.unwrap();
        assert_eq!(failed.status, AssessmentStatus::Failed);
        assert_eq!(failed.overall_risk, None);
        assert_eq!(failed.completed_at, None);
        assert_eq!(finding_count(&svc, a.id).await, 0);

        svc.db()
            .execute_with("DROP TRIGGER fail_findings", || ())
            .await
            .unwrap();
        let done = svc.run_assessment(a.id).await.unwrap();
        assert_eq!(done.status, AssessmentStatus::Completed);
        assert_eq!(finding_count(&svc, a.id).await, 4);
    }

    #[tokio::test]
    async fn results_failure_rolls_back_findings() {
        let svc = test_service().await;
        let a = draft(&svc, &["db1"]).await;
        svc.db()
            .execute_with(
                "CREATE TRIGGER fail_results BEFORE UPDATE OF risk_score ON assessments
                 BEGIN SELECT RAISE(ABORT, 'no results today'); END",
                || (),
            )
            .await
            .unwrap();

        let err = svc.run_assessment(a.id).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::PartialFailure {
                stage: RunStage::PersistResults,
                ..
            }
        ));
        assert_eq!(finding_count(&svc, a.id).await, 0);
        assert_eq!(
            svc.get_assessment(a.id).await.unwrap().status,
            AssessmentStatus::Failed
        );
    }

    #[tokio::test]
    async fn run_loses_to_an_already_taken_lease() {
        let svc = test_service().await;
        let a = draft(&svc, &["db1", "api-gw", "vpn"]).await;

        // Another runner leased the assessment after this one would have loaded it.
        assert!(svc
            .lease_assessment(a.id, AssessmentStatus::Draft, t0())
            .await
            .unwrap());

        let err = svc.run_assessment(a.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidState(_)), "{err:?}");
        assert_eq!(finding_count(&svc, a.id).await, 0);
        assert_eq!(
            svc.get_assessment(a.id).await.unwrap().status,
            AssessmentStatus::InProgress
        );
    }

    #[tokio::test]
    async fn readers_never_see_an_open_run_transaction() {
        let svc = test_service().await;
        let a = draft(&svc, &["db1"]).await;
        let filter = FindingFilter::for_assessment(a.id);
        let pending = finding(
            900,
            a.id,
            RiskLevel::Critical,
            FindingCategory::HarvestNowDecryptLater,
            t0(),
        );

        let tx = svc.db().begin_write().await.unwrap();
        svc.insert_findings_batch(&tx, std::slice::from_ref(&pending))
            .await
            .unwrap();

        let wait = std::time::Duration::from_millis(50);
        assert!(tokio::time::timeout(wait, svc.count_findings(&filter)).await.is_err());
        assert!(tokio::time::timeout(wait, svc.get_assessment_with_summary(a.id))
            .await
            .is_err());
        assert!(tokio::time::timeout(wait, svc.get_finding(pending.id)).await.is_err());

        rollback_quietly(tx, a.id).await;

        assert_eq!(finding_count(&svc, a.id).await, 0);
        let detail = svc.get_assessment_with_summary(a.id).await.unwrap();
        assert_eq!(detail.summary.unwrap().total_findings, 0);
    }

    #[tokio::test]
    async fn reader_waiting_on_a_run_sees_the_committed_batch() {
        let svc = test_service().await;
        let a = draft(&svc, &["db1", "api-gw"]).await;
        let filter = FindingFilter::for_assessment(a.id);

        let tx = svc.db().begin_write().await.unwrap();
        let batch = [
            finding(
                901,
                a.id,
                RiskLevel::High,
                FindingCategory::MissingPqc,
                t0(),
            ),
            finding(
                902,
                a.id,
                RiskLevel::Critical,
                FindingCategory::HarvestNowDecryptLater,
                t0(),
            ),
        ];

        let writer = async {
            svc.insert_findings_batch(&tx, &batch[..1]).await.unwrap();
            tokio::task::yield_now().await;
            svc.insert_findings_batch(&tx, &batch[1..]).await.unwrap();
            tx.commit().await.unwrap();
        };
        let (_, seen) = tokio::join!(writer, svc.count_findings(&filter));
        assert_eq!(seen.unwrap(), 2, "reader sees all of the batch or none of it");
    }

    #[tokio::test]
    async fn sequential_ids_flow_into_findings() {
        let db = crate::QrapDb::open_local(":memory:").await.unwrap();
        let svc = QrapService::from_db(db).with_ids(Arc::new(SequentialIds::new()));
        let org = svc.create_organization("Acme", None, "alice").await.unwrap();
        let a = svc
            .create_assessment("x", &org.id.to_string(), Some(vec!["db1".into()]), "alice")
            .await
            .unwrap();
        assert_eq!(org.id, Uuid::from_u128(1));
        assert_eq!(a.id, Uuid::from_u128(2));

        svc.run_assessment(a.id).await.unwrap();
        let ids: Vec<_> = svc
            .query_findings(&FindingFilter::for_assessment(a.id), Default::default())
            .await
            .unwrap()
            .iter()
            .map(|f| f.id.as_u128())
            .collect();
        // CRITICAL (HNDL, second synthesized) sorts before HIGH (missing PQC).
        assert_eq!(ids, vec![4, 3]);
    }

    #[tokio::test]
    async fn summary_counts_and_is_stable() {
        let svc = test_service().await;
        let a = draft(&svc, &["db1", "api-gw"]).await;
        svc.run_assessment(a.id).await.unwrap();

        let first = svc.get_assessment_with_summary(a.id).await.unwrap();
        let second = svc.get_assessment_with_summary(a.id).await.unwrap();
        assert_eq!(first.summary, second.summary);

        let summary = first.summary.unwrap();
        assert_eq!(summary.total_findings, 4);
        assert_eq!(summary.critical_findings, 2);
        assert_eq!(summary.high_findings, 2);
        assert_eq!(summary.medium_findings, 0);
        assert_eq!(summary.low_findings, 0);
        assert_eq!(summary.assets_scanned, 2);
        assert_eq!(summary.pqc_readiness, 0.0);
    }

    #[tokio::test]
    async fn summary_failure_still_returns_assessment() {
        let svc = test_service().await;
        let a = draft(&svc, &["db1"]).await;
        svc.db()
            .execute_with("DROP TABLE findings", || ())
            .await
            .unwrap();

        let detail = svc.get_assessment_with_summary(a.id).await.unwrap();
        assert_eq!(detail.assessment.id, a.id);
        assert!(detail.summary.is_none());
    }
}

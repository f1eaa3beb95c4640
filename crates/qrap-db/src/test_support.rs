//! Shared test utilities for qrap-db unit tests.

#[cfg(test)]
pub(crate) mod helpers {
    use std::sync::Arc;

    use chrono::{DateTime, Duration, TimeZone, Utc};
    use qrap_core::clock::SteppingClock;
    use qrap_core::entities::{Assessment, Finding, Organization};
    use qrap_core::enums::{AssessmentStatus, FindingCategory, RiskLevel};
    use uuid::Uuid;

    use crate::QrapDb;
    use crate::service::QrapService;

    /// Fixed start of time for deterministic fixtures.
    pub fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
    }

    /// In-memory service whose clock starts at `t0()` and ticks one second per read.
    pub async fn test_service() -> QrapService {
        let db = QrapDb::open_local(":memory:").await.unwrap();
        QrapService::from_db(db).with_clock(Arc::new(SteppingClock::new(t0(), Duration::seconds(1))))
    }

    /// Insert an organization with id `n` and return that id.
    pub async fn seed_organization(svc: &QrapService, n: u128) -> Uuid {
        let org = Organization {
            id: Uuid::from_u128(n),
            name: format!("org-{n}"),
            description: String::new(),
            created_by: "alice".into(),
            created_at: t0(),
            updated_by: None,
            updated_at: t0(),
        };
        svc.insert_organization(&org).await.unwrap();
        org.id
    }

    pub fn draft_assessment(
        n: u128,
        organization_id: Uuid,
        assets: &[&str],
        created_at: DateTime<Utc>,
    ) -> Assessment {
        Assessment {
            id: Uuid::from_u128(n),
            name: format!("assessment-{n}"),
            organization_id,
            status: AssessmentStatus::Draft,
            overall_risk: None,
            risk_score: 0.0,
            target_assets: assets.iter().map(ToString::to_string).collect(),
            assets_scanned: 0,
            pqc_readiness: 0.0,
            started_at: None,
            completed_at: None,
            created_by: "alice".into(),
            created_at,
            updated_by: None,
            updated_at: created_at,
        }
    }

    pub fn finding(
        n: u128,
        assessment_id: Uuid,
        risk_level: RiskLevel,
        category: FindingCategory,
        discovered_at: DateTime<Utc>,
    ) -> Finding {
        Finding {
            id: Uuid::from_u128(n),
            assessment_id,
            category,
            risk_level,
            title: format!("finding {n}"),
            description: format!("{category} at {risk_level}"),
            affected_asset: "db1".into(),
            current_algorithm: Some("RSA-2048".into()),
            recommended_algorithm: None,
            remediation: None,
            discovered_at,
            created_at: discovered_at,
        }
    }
}

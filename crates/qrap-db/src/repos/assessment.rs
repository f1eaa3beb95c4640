//! Assessment repository: rows, listings, status writes, the run lease and
//! the results write.

use chrono::{DateTime, Utc};
use qrap_core::analysis::RiskSummary;
use qrap_core::entities::Assessment;
use qrap_core::enums::AssessmentStatus;
use qrap_core::pagination::Pagination;
use uuid::Uuid;

use crate::WriteTx;
use crate::error::DatabaseError;
use crate::helpers::{
    decode_assets, encode_assets, format_datetime, get_count, get_opt_string, parse_datetime,
    parse_enum, parse_optional_datetime, parse_uuid,
};
use crate::query::{AssessmentFilter, WhereClause};
use crate::service::{QrapService, SYSTEM_ACTOR};

const SELECT_COLS: &str = "id, name, organization_id, status, overall_risk, risk_score, \
     target_assets, assets_scanned, pqc_readiness, started_at, completed_at, \
     created_by, created_at, updated_by, updated_at";

fn row_to_assessment(row: &libsql::Row) -> Result<Assessment, DatabaseError> {
    Ok(Assessment {
        id: parse_uuid(&row.get::<String>(0)?)?,
        name: row.get::<String>(1)?,
        organization_id: parse_uuid(&row.get::<String>(2)?)?,
        status: parse_enum(&row.get::<String>(3)?)?,
        overall_risk: get_opt_string(row, 4)?
            .map(|s| parse_enum(&s))
            .transpose()?,
        risk_score: row.get::<f64>(5)?,
        target_assets: decode_assets(&row.get::<String>(6)?)?,
        assets_scanned: get_count(row, 7)?,
        pqc_readiness: row.get::<f64>(8)?,
        started_at: parse_optional_datetime(get_opt_string(row, 9)?.as_deref())?,
        completed_at: parse_optional_datetime(get_opt_string(row, 10)?.as_deref())?,
        created_by: row.get::<String>(11)?,
        created_at: parse_datetime(&row.get::<String>(12)?)?,
        updated_by: get_opt_string(row, 13)?,
        updated_at: parse_datetime(&row.get::<String>(14)?)?,
    })
}

impl QrapService {
    pub async fn insert_assessment(&self, a: &Assessment) -> Result<(), DatabaseError> {
        let id = a.id.to_string();
        let org_id = a.organization_id.to_string();
        let assets = encode_assets(&a.target_assets)?;
        let started_at = a.started_at.as_ref().map(format_datetime);
        let completed_at = a.completed_at.as_ref().map(format_datetime);
        let created_at = format_datetime(&a.created_at);
        let updated_at = format_datetime(&a.updated_at);

        self.db()
            .execute_with(
                "INSERT INTO assessments (id, name, organization_id, status, overall_risk, risk_score,
                    target_assets, assets_scanned, pqc_readiness, started_at, completed_at,
                    created_by, created_at, updated_by, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
                || {
                    libsql::params![
                        id.as_str(),
                        a.name.as_str(),
                        org_id.as_str(),
                        a.status.as_str(),
                        a.overall_risk.map(|r| r.as_str()),
                        a.risk_score,
                        assets.as_str(),
                        i64::from(a.assets_scanned),
                        a.pqc_readiness,
                        started_at.as_deref(),
                        completed_at.as_deref(),
                        a.created_by.as_str(),
                        created_at.as_str(),
                        a.updated_by.as_deref(),
                        updated_at.as_str()
                    ]
                },
            )
            .await?;
        Ok(())
    }

    pub async fn fetch_assessment(&self, id: Uuid) -> Result<Assessment, DatabaseError> {
        let id = id.to_string();
        let sql = format!("SELECT {SELECT_COLS} FROM assessments WHERE id = ?1");
        let mut rows = self.db().query_with(&sql, || [id.as_str()]).await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_assessment(&row)
    }

    pub async fn query_assessments(
        &self,
        filter: &AssessmentFilter,
        pagination: Pagination,
    ) -> Result<Vec<Assessment>, DatabaseError> {
        let clause = WhereClause::from_predicates(&filter.predicates());
        let (tail, params) = clause.paged(pagination);
        let sql = format!(
            "SELECT {SELECT_COLS} FROM assessments {} ORDER BY created_at DESC {tail}",
            clause.sql()
        );
        let mut rows = self
            .db()
            .query_with(&sql, || libsql::params_from_iter(params.clone()))
            .await?;

        let mut assessments = Vec::new();
        while let Some(row) = rows.next().await? {
            assessments.push(row_to_assessment(&row)?);
        }
        Ok(assessments)
    }

    pub async fn count_assessments(&self, filter: &AssessmentFilter) -> Result<u64, DatabaseError> {
        let clause = WhereClause::from_predicates(&filter.predicates());
        let sql = format!("SELECT COUNT(*) FROM assessments {}", clause.sql());
        let mut rows = self
            .db()
            .query_with(&sql, || libsql::params_from_iter(clause.params().to_vec()))
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        get_count(&row, 0)
    }

    /// Unconditionally set the status. Returns the number of rows changed.
    pub async fn update_assessment_status(
        &self,
        id: Uuid,
        status: AssessmentStatus,
        actor: &str,
        now: DateTime<Utc>,
    ) -> Result<u64, DatabaseError> {
        let id = id.to_string();
        let updated_at = format_datetime(&now);
        self.db()
            .execute_with(
                "UPDATE assessments SET status = ?1, updated_by = ?2, updated_at = ?3 WHERE id = ?4",
                || libsql::params![status.as_str(), actor, updated_at.as_str(), id.as_str()],
            )
            .await
    }

    /// Move the assessment to `IN_PROGRESS` only if it is still in `observed`.
    ///
    /// Clears the previous run's `overall_risk` and `completed_at`. Returns
    /// `false` when another caller changed the status first.
    pub async fn lease_assessment(
        &self,
        id: Uuid,
        observed: AssessmentStatus,
        now: DateTime<Utc>,
    ) -> Result<bool, DatabaseError> {
        let id = id.to_string();
        let ts = format_datetime(&now);
        let changed = self
            .db()
            .execute_with(
                "UPDATE assessments
                 SET status = ?1, started_at = ?2, overall_risk = NULL, completed_at = NULL,
                     updated_by = ?3, updated_at = ?2
                 WHERE id = ?4 AND status = ?5",
                || {
                    libsql::params![
                        AssessmentStatus::InProgress.as_str(),
                        ts.as_str(),
                        SYSTEM_ACTOR,
                        id.as_str(),
                        observed.as_str()
                    ]
                },
            )
            .await?;
        Ok(changed == 1)
    }

    /// Write a completed run's aggregate results inside `tx`.
    ///
    /// Only applies to an assessment that is `IN_PROGRESS`; returns the number
    /// of rows changed.
    pub async fn update_assessment_results(
        &self,
        tx: &WriteTx<'_>,
        id: Uuid,
        summary: &RiskSummary,
        assets_scanned: u32,
        now: DateTime<Utc>,
    ) -> Result<u64, DatabaseError> {
        let ts = format_datetime(&now);
        tx.execute(
            "UPDATE assessments
             SET overall_risk = ?1, risk_score = ?2, pqc_readiness = ?3, assets_scanned = ?4,
                 status = ?5, completed_at = ?6, updated_by = ?7, updated_at = ?6
             WHERE id = ?8 AND status = ?9",
            libsql::params![
                summary.overall_risk.as_str(),
                summary.risk_score,
                summary.pqc_readiness,
                i64::from(assets_scanned),
                AssessmentStatus::Completed.as_str(),
                ts.as_str(),
                SYSTEM_ACTOR,
                id.to_string(),
                AssessmentStatus::InProgress.as_str()
            ],
        )
        .await
    }
}

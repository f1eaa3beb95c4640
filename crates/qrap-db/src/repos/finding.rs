//! Finding repository: batch insert, lookups, listings and the per-assessment
//! severity summary.

use qrap_core::entities::Finding;
use qrap_core::pagination::Pagination;
use uuid::Uuid;

use crate::WriteTx;
use crate::error::DatabaseError;
use crate::helpers::{
    format_datetime, get_count, get_opt_string, parse_datetime, parse_enum, parse_uuid,
};
use crate::query::{FindingFilter, WhereClause};
use crate::service::QrapService;

const SELECT_COLS: &str = "id, assessment_id, category, risk_level, title, description, \
     affected_asset, current_algorithm, recommended_algorithm, remediation, \
     discovered_at, created_at";

/// Finding counts by severity for one assessment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FindingCounts {
    pub total: u64,
    pub critical: u64,
    pub high: u64,
    pub medium: u64,
    pub low: u64,
}

fn row_to_finding(row: &libsql::Row) -> Result<Finding, DatabaseError> {
    Ok(Finding {
        id: parse_uuid(&row.get::<String>(0)?)?,
        assessment_id: parse_uuid(&row.get::<String>(1)?)?,
        category: parse_enum(&row.get::<String>(2)?)?,
        risk_level: parse_enum(&row.get::<String>(3)?)?,
        title: row.get::<String>(4)?,
        description: row.get::<String>(5)?,
        affected_asset: row.get::<String>(6)?,
        current_algorithm: get_opt_string(row, 7)?,
        recommended_algorithm: get_opt_string(row, 8)?,
        remediation: get_opt_string(row, 9)?,
        discovered_at: parse_datetime(&row.get::<String>(10)?)?,
        created_at: parse_datetime(&row.get::<String>(11)?)?,
    })
}

impl QrapService {
    /// Insert a run's findings inside `tx`. Stops at the first failing row;
    /// the caller rolls back.
    pub async fn insert_findings_batch(
        &self,
        tx: &WriteTx<'_>,
        findings: &[Finding],
    ) -> Result<(), DatabaseError> {
        for f in findings {
            tx.execute(
                "INSERT INTO findings (id, assessment_id, category, risk_level, title, description,
                    affected_asset, current_algorithm, recommended_algorithm, remediation,
                    discovered_at, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                libsql::params![
                    f.id.to_string(),
                    f.assessment_id.to_string(),
                    f.category.as_str(),
                    f.risk_level.as_str(),
                    f.title.as_str(),
                    f.description.as_str(),
                    f.affected_asset.as_str(),
                    f.current_algorithm.as_deref(),
                    f.recommended_algorithm.as_deref(),
                    f.remediation.as_deref(),
                    format_datetime(&f.discovered_at),
                    format_datetime(&f.created_at)
                ],
            )
            .await?;
        }
        Ok(())
    }

    pub async fn fetch_finding(&self, id: Uuid) -> Result<Finding, DatabaseError> {
        let id = id.to_string();
        let sql = format!("SELECT {SELECT_COLS} FROM findings WHERE id = ?1");
        let mut rows = self.db().query_with(&sql, || [id.as_str()]).await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_finding(&row)
    }

    /// List findings most severe first.
    ///
    /// `risk_level` sorts as text, so the order is CRITICAL, HIGH, LOW, MEDIUM.
    pub async fn query_findings(
        &self,
        filter: &FindingFilter,
        pagination: Pagination,
    ) -> Result<Vec<Finding>, DatabaseError> {
        let clause = WhereClause::from_predicates(&filter.predicates());
        let (tail, params) = clause.paged(pagination);
        let sql = format!(
            "SELECT {SELECT_COLS} FROM findings {} ORDER BY risk_level ASC, discovered_at DESC {tail}",
            clause.sql()
        );
        let mut rows = self
            .db()
            .query_with(&sql, || libsql::params_from_iter(params.clone()))
            .await?;

        let mut findings = Vec::new();
        while let Some(row) = rows.next().await? {
            findings.push(row_to_finding(&row)?);
        }
        Ok(findings)
    }

    pub async fn count_findings(&self, filter: &FindingFilter) -> Result<u64, DatabaseError> {
        let clause = WhereClause::from_predicates(&filter.predicates());
        let sql = format!("SELECT COUNT(*) FROM findings {}", clause.sql());
        let mut rows = self
            .db()
            .query_with(&sql, || libsql::params_from_iter(clause.params().to_vec()))
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        get_count(&row, 0)
    }

    /// Count an assessment's findings by severity in one aggregate query.
    pub async fn summarize_findings(&self, assessment_id: Uuid) -> Result<FindingCounts, DatabaseError> {
        let id = assessment_id.to_string();
        let mut rows = self
            .db()
            .query_with(
                "SELECT COUNT(*),
                        COALESCE(SUM(CASE WHEN risk_level = 'CRITICAL' THEN 1 ELSE 0 END), 0),
                        COALESCE(SUM(CASE WHEN risk_level = 'HIGH' THEN 1 ELSE 0 END), 0),
                        COALESCE(SUM(CASE WHEN risk_level = 'MEDIUM' THEN 1 ELSE 0 END), 0),
                        COALESCE(SUM(CASE WHEN risk_level = 'LOW' THEN 1 ELSE 0 END), 0)
                 FROM findings WHERE assessment_id = ?1",
                || [id.as_str()],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(FindingCounts {
            total: get_count(&row, 0)?,
            critical: get_count(&row, 1)?,
            high: get_count(&row, 2)?,
            medium: get_count(&row, 3)?,
            low: get_count(&row, 4)?,
        })
    }
}

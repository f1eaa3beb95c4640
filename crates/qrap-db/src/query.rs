//! Typed predicate composition for list queries.
//!
//! Each [`Predicate`] variant owns a fixed column name; the value is always
//! bound as a positional parameter. A [`WhereClause`] joins predicates with
//! `AND` and renders the pagination tail with the next free placeholders.

use libsql::Value;
use qrap_core::enums::{AssessmentStatus, FindingCategory, RiskLevel};
use qrap_core::pagination::Pagination;
use uuid::Uuid;

/// One equality condition on a list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    OrganizationId(Uuid),
    Status(AssessmentStatus),
    AssessmentId(Uuid),
    RiskLevel(RiskLevel),
    Category(FindingCategory),
}

impl Predicate {
    #[must_use]
    pub const fn column(&self) -> &'static str {
        match self {
            Self::OrganizationId(_) => "organization_id",
            Self::Status(_) => "status",
            Self::AssessmentId(_) => "assessment_id",
            Self::RiskLevel(_) => "risk_level",
            Self::Category(_) => "category",
        }
    }

    #[must_use]
    pub fn value(&self) -> Value {
        match self {
            Self::OrganizationId(id) | Self::AssessmentId(id) => Value::Text(id.to_string()),
            Self::Status(s) => Value::Text(s.as_str().to_string()),
            Self::RiskLevel(r) => Value::Text(r.as_str().to_string()),
            Self::Category(c) => Value::Text(c.as_str().to_string()),
        }
    }
}

/// Filter for assessment listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssessmentFilter {
    pub organization_id: Option<Uuid>,
    pub status: Option<AssessmentStatus>,
}

impl AssessmentFilter {
    #[must_use]
    pub fn predicates(&self) -> Vec<Predicate> {
        let mut predicates = Vec::new();
        if let Some(org) = self.organization_id {
            predicates.push(Predicate::OrganizationId(org));
        }
        if let Some(status) = self.status {
            predicates.push(Predicate::Status(status));
        }
        predicates
    }
}

/// Filter for finding listings. Findings are always listed per assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FindingFilter {
    pub assessment_id: Uuid,
    pub risk_level: Option<RiskLevel>,
    pub category: Option<FindingCategory>,
}

impl FindingFilter {
    #[must_use]
    pub const fn for_assessment(assessment_id: Uuid) -> Self {
        Self {
            assessment_id,
            risk_level: None,
            category: None,
        }
    }

    #[must_use]
    pub fn predicates(&self) -> Vec<Predicate> {
        let mut predicates = vec![Predicate::AssessmentId(self.assessment_id)];
        if let Some(level) = self.risk_level {
            predicates.push(Predicate::RiskLevel(level));
        }
        if let Some(category) = self.category {
            predicates.push(Predicate::Category(category));
        }
        predicates
    }
}

/// A rendered `WHERE` clause plus its bound parameters.
#[derive(Debug, Clone, Default)]
pub struct WhereClause {
    sql: String,
    params: Vec<Value>,
}

impl WhereClause {
    #[must_use]
    pub fn from_predicates(predicates: &[Predicate]) -> Self {
        let mut conditions = Vec::with_capacity(predicates.len());
        let mut params = Vec::with_capacity(predicates.len());
        for predicate in predicates {
            params.push(predicate.value());
            conditions.push(format!("{} = ?{}", predicate.column(), params.len()));
        }
        let sql = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        Self { sql, params }
    }

    /// The clause text, empty when there are no predicates.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    #[must_use]
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// `LIMIT ?n OFFSET ?m` with its parameters appended after the predicates'.
    #[must_use]
    pub fn paged(&self, pagination: Pagination) -> (String, Vec<Value>) {
        let mut params = self.params.clone();
        params.push(Value::Integer(i64::from(pagination.limit)));
        let limit_idx = params.len();
        params.push(Value::Integer(pagination.offset));
        let offset_idx = params.len();
        (format!("LIMIT ?{limit_idx} OFFSET ?{offset_idx}"), params)
    }
}

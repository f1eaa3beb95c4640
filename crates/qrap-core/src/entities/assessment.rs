use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::{AssessmentStatus, RiskLevel};

/// A quantum-risk assessment of an organization's target assets.
///
/// `overall_risk` and `completed_at` are set only while `status` is
/// `COMPLETED`; a new run clears them when it takes the lease.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Assessment {
    pub id: Uuid,
    pub name: String,
    pub organization_id: Uuid,
    pub status: AssessmentStatus,
    pub overall_risk: Option<RiskLevel>,
    pub risk_score: f64,
    pub target_assets: Vec<String>,
    pub assets_scanned: u32,
    /// Percentage (0-100) of scanned assets without a missing-PQC finding.
    pub pqc_readiness: f64,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_by: Option<String>,
    pub updated_at: DateTime<Utc>,
}

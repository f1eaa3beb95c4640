use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::{FindingCategory, RiskLevel};

/// A single issue discovered on one asset during an assessment run.
///
/// Immutable once created. Deleted only by cascade with its assessment.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Finding {
    pub id: Uuid,
    pub assessment_id: Uuid,
    pub category: FindingCategory,
    pub risk_level: RiskLevel,
    pub title: String,
    pub description: String,
    pub affected_asset: String,
    pub current_algorithm: Option<String>,
    pub recommended_algorithm: Option<String>,
    pub remediation: Option<String>,
    pub discovered_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

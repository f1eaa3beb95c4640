//! Response types returned by engine read operations.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Assessment;

/// Finding counts for one assessment, with its stored readiness figures.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct AssessmentSummary {
    pub total_findings: u64,
    pub critical_findings: u64,
    pub high_findings: u64,
    pub medium_findings: u64,
    pub low_findings: u64,
    #[serde(rename = "pqc_readiness_percentage")]
    pub pqc_readiness: f64,
    pub assets_scanned: u32,
}

/// An assessment plus its finding summary.
///
/// `summary` is `None` when the summary query failed; the assessment itself is
/// still returned.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct AssessmentDetail {
    #[serde(flatten)]
    pub assessment: Assessment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<AssessmentSummary>,
}

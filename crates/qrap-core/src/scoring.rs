//! Standalone risk scoring of an arbitrary finding set.
//!
//! Unlike the run aggregator in [`crate::analysis`], the score here is
//! normalised to 0-100 against the worst case (every finding CRITICAL and
//! HNDL), weights findings by category, and derives the overall label from
//! the score rather than from the most severe finding. PQC readiness counts
//! distinct assets with a missing-PQC finding.

use std::collections::{BTreeMap, HashSet};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{FindingCategory, RiskLevel};

/// Largest per-finding contribution: CRITICAL severity times the HNDL multiplier.
const MAX_FINDING_WEIGHT: f64 = 10.0 * 1.5;

/// A finding submitted for scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ScoredFinding {
    pub category: FindingCategory,
    pub risk_level: RiskLevel,
    pub affected_asset: String,
    #[serde(default)]
    pub current_algorithm: Option<String>,
    #[serde(default)]
    pub recommended_algorithm: Option<String>,
}

impl ScoredFinding {
    #[must_use]
    pub fn new(category: FindingCategory, risk_level: RiskLevel, affected_asset: &str) -> Self {
        Self {
            category,
            risk_level,
            affected_asset: affected_asset.to_string(),
            current_algorithm: None,
            recommended_algorithm: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScoreResult {
    /// 0-100, rounded to two decimals.
    pub risk_score: f64,
    pub overall_risk: RiskLevel,
    /// Percentage of assets without a missing-PQC finding, rounded to two decimals.
    pub pqc_readiness: f64,
    /// Finding count per risk level; levels with no findings are omitted.
    pub finding_breakdown: BTreeMap<String, u32>,
}

/// Stateless risk scorer.
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskScorer;

impl RiskScorer {
    #[must_use]
    pub const fn severity_weight(level: RiskLevel) -> f64 {
        match level {
            RiskLevel::Critical => 10.0,
            RiskLevel::High => 5.0,
            RiskLevel::Medium => 2.0,
            RiskLevel::Low => 1.0,
        }
    }

    #[must_use]
    pub const fn category_multiplier(category: FindingCategory) -> f64 {
        match category {
            FindingCategory::HarvestNowDecryptLater => 1.5,
            FindingCategory::MissingPqc => 1.3,
            FindingCategory::WeakAlgorithm => 1.2,
            FindingCategory::DeprecatedProtocol | FindingCategory::KeyManagement => 1.0,
        }
    }

    /// Score `findings` found across `total_assets` assets.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn score(&self, findings: &[ScoredFinding], total_assets: u32) -> ScoreResult {
        if findings.is_empty() {
            return ScoreResult {
                risk_score: 0.0,
                overall_risk: RiskLevel::Low,
                pqc_readiness: 100.0,
                finding_breakdown: BTreeMap::new(),
            };
        }

        let mut weighted = 0.0;
        let mut breakdown = BTreeMap::<String, u32>::new();
        let mut missing_pqc_assets = HashSet::new();
        for f in findings {
            weighted += Self::severity_weight(f.risk_level) * Self::category_multiplier(f.category);
            *breakdown.entry(f.risk_level.as_str().to_string()).or_default() += 1;
            if f.category == FindingCategory::MissingPqc {
                missing_pqc_assets.insert(f.affected_asset.as_str());
            }
        }

        let max_possible = findings.len() as f64 * MAX_FINDING_WEIGHT;
        let risk_score = (weighted / max_possible * 100.0).min(100.0);

        let overall_risk = if risk_score >= 80.0 {
            RiskLevel::Critical
        } else if risk_score >= 60.0 {
            RiskLevel::High
        } else if risk_score >= 30.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        };

        let pqc_readiness = if total_assets > 0 {
            let missing = u32::try_from(missing_pqc_assets.len()).unwrap_or(u32::MAX);
            f64::from(total_assets.saturating_sub(missing)) / f64::from(total_assets) * 100.0
        } else {
            100.0
        };

        ScoreResult {
            risk_score: round2(risk_score),
            overall_risk,
            pqc_readiness: round2(pqc_readiness),
            finding_breakdown: breakdown,
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Finding;
use crate::enums::{FindingCategory, RiskLevel};

/// Result of reducing a run's findings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RiskSummary {
    pub overall_risk: RiskLevel,
    /// Severity density: weighted finding count per finding, times ten.
    pub risk_score: f64,
    pub pqc_readiness: f64,
}

/// Reduce `findings` to an overall risk label, risk score, and PQC readiness.
///
/// `findings_per_asset` is the fan-out of the producer; the number of assets is
/// recovered as `findings.len() / findings_per_asset`. The readiness figure is
/// only meaningful for finding sets honouring that fan-out.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn aggregate(findings: &[Finding], findings_per_asset: usize) -> RiskSummary {
    if findings.is_empty() {
        return RiskSummary {
            overall_risk: RiskLevel::Low,
            risk_score: 0.0,
            pqc_readiness: 100.0,
        };
    }

    let (mut crit, mut high, mut med) = (0_u64, 0_u64, 0_u64);
    let mut missing_pqc = 0_u64;
    let mut weighted = 0_u64;
    for f in findings {
        match f.risk_level {
            RiskLevel::Critical => crit += 1,
            RiskLevel::High => high += 1,
            RiskLevel::Medium => med += 1,
            RiskLevel::Low => {}
        }
        if f.category == FindingCategory::MissingPqc {
            missing_pqc += 1;
        }
        weighted += u64::from(f.risk_level.weight());
    }

    let total = findings.len() as f64;
    let risk_score = weighted as f64 / total * 10.0;

    let overall_risk = if crit > 0 {
        RiskLevel::Critical
    } else if high > 0 {
        RiskLevel::High
    } else if med > 0 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    let total_assets = findings.len().checked_div(findings_per_asset).unwrap_or(0) as u64;
    let pqc_readiness = if total_assets > 0 {
        (total_assets as f64 - missing_pqc as f64) / total_assets as f64 * 100.0
    } else {
        0.0
    };

    RiskSummary {
        overall_risk,
        risk_score,
        pqc_readiness,
    }
}

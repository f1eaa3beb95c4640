use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::entities::Finding;
use crate::enums::{FindingCategory, RiskLevel};
use crate::ids::IdGenerator;

/// Number of findings emitted for every target asset.
pub const FINDINGS_PER_ASSET: usize = 2;

/// Algorithm assumed to protect an unscanned asset.
pub const CURRENT_ALGORITHM: &str = "RSA-2048";

/// Post-quantum replacement recommended for every asset.
pub const RECOMMENDED_ALGORITHM: &str = "ML-KEM-768";

pub const MISSING_PQC_REMEDIATION: &str =
    "Migrate to post-quantum key encapsulation mechanism ML-KEM-768 (FIPS 203)";

pub const HNDL_REMEDIATION: &str = "Prioritise migration of long-lived secrets; data encrypted today can be captured and decrypted later by quantum computers";

/// Produce the findings for one run over `assets`.
///
/// Each asset yields a `MISSING_PQC` (HIGH) finding followed by a
/// `HARVEST_NOW_DECRYPT_LATER` (CRITICAL) finding, in input order. All findings
/// share `discovered_at`.
#[must_use]
pub fn synthesize(
    assessment_id: Uuid,
    assets: &[String],
    discovered_at: DateTime<Utc>,
    ids: &dyn IdGenerator,
) -> Vec<Finding> {
    let mut findings = Vec::with_capacity(assets.len() * FINDINGS_PER_ASSET);

    for asset in assets {
        findings.push(Finding {
            id: ids.next_id(),
            assessment_id,
            category: FindingCategory::MissingPqc,
            risk_level: RiskLevel::High,
            title: format!("No PQC protection on {asset}"),
            description: format!(
                "Asset {asset} uses classical cryptography without post-quantum protection"
            ),
            affected_asset: asset.clone(),
            current_algorithm: Some(CURRENT_ALGORITHM.to_string()),
            recommended_algorithm: Some(RECOMMENDED_ALGORITHM.to_string()),
            remediation: Some(MISSING_PQC_REMEDIATION.to_string()),
            discovered_at,
            created_at: discovered_at,
        });

        findings.push(Finding {
            id: ids.next_id(),
            assessment_id,
            category: FindingCategory::HarvestNowDecryptLater,
            risk_level: RiskLevel::Critical,
            title: format!("HNDL risk on {asset}"),
            description: format!("Asset {asset} is vulnerable to harvest-now-decrypt-later attacks"),
            affected_asset: asset.clone(),
            current_algorithm: Some(CURRENT_ALGORITHM.to_string()),
            recommended_algorithm: Some(RECOMMENDED_ALGORITHM.to_string()),
            remediation: Some(HNDL_REMEDIATION.to_string()),
            discovered_at,
            created_at: discovered_at,
        });
    }

    findings
}

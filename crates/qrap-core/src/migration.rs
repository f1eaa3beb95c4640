//! PQC migration roadmaps.
//!
//! Maps each classical algorithm in use to its post-quantum replacement and
//! orders the resulting steps most urgent first. Assets already on a PQC
//! algorithm (or on one the table does not know) need no step.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::RiskLevel;

/// Assets handled per migration phase.
pub const ASSETS_PER_PHASE: usize = 5;

/// Recommended replacement for each classical algorithm.
const MIGRATION_TARGETS: &[(&str, &str)] = &[
    ("RSA-2048", "ML-KEM-768"),
    ("RSA-3072", "ML-KEM-768"),
    ("RSA-4096", "ML-KEM-1024"),
    ("ECDSA-P256", "ML-DSA-65"),
    ("ECDSA-P384", "ML-DSA-87"),
    ("Ed25519", "ML-DSA-65"),
    ("X25519", "X25519-ML-KEM-768"),
    ("DH-2048", "ML-KEM-768"),
];

/// Relative cost of a migration step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Effort {
    Low,
    Medium,
    High,
}

/// An asset and the algorithm currently protecting it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PlannedAsset {
    pub asset: String,
    pub algorithm: String,
    #[serde(default = "default_urgency")]
    pub urgency: RiskLevel,
}

const fn default_urgency() -> RiskLevel {
    RiskLevel::Medium
}

impl PlannedAsset {
    /// An asset with the default MEDIUM urgency.
    #[must_use]
    pub fn new(asset: impl Into<String>, algorithm: impl Into<String>) -> Self {
        Self {
            asset: asset.into(),
            algorithm: algorithm.into(),
            urgency: default_urgency(),
        }
    }

    #[must_use]
    pub const fn with_urgency(mut self, urgency: RiskLevel) -> Self {
        self.urgency = urgency;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MigrationStep {
    pub asset: String,
    pub current_algorithm: String,
    pub target_algorithm: String,
    pub priority: RiskLevel,
    pub estimated_effort: Effort,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MigrationPlan {
    pub steps: Vec<MigrationStep>,
    /// Every asset submitted, including those that need no step.
    pub total_assets: usize,
    pub critical_count: usize,
    pub estimated_phases: usize,
}

/// Stateless migration planner.
#[derive(Debug, Clone, Copy, Default)]
pub struct MigrationPlanner;

impl MigrationPlanner {
    /// PQC replacement for `algorithm`, if it needs one.
    #[must_use]
    pub fn target_for(algorithm: &str) -> Option<&'static str> {
        MIGRATION_TARGETS
            .iter()
            .find(|(name, _)| *name == algorithm)
            .map(|(_, target)| *target)
    }

    /// Hybrid key exchange is the expensive swap; plain KEM and signature
    /// replacements are moderate.
    #[must_use]
    pub fn estimate_effort(target: &str) -> Effort {
        if target.contains("X25519") || target.contains("Ed25519") {
            Effort::High
        } else {
            Effort::Medium
        }
    }

    /// Build a roadmap for `assets`.
    ///
    /// Steps are sorted most urgent first; assets of equal urgency keep their
    /// input order.
    #[must_use]
    pub fn plan(&self, assets: &[PlannedAsset]) -> MigrationPlan {
        let mut steps: Vec<MigrationStep> = assets
            .iter()
            .filter_map(|item| {
                let target = Self::target_for(&item.algorithm)?;
                Some(MigrationStep {
                    asset: item.asset.clone(),
                    current_algorithm: item.algorithm.clone(),
                    target_algorithm: target.to_string(),
                    priority: item.urgency,
                    estimated_effort: Self::estimate_effort(target),
                    notes: format!("Migrate from {} to {target}", item.algorithm),
                })
            })
            .collect();
        steps.sort_by_key(|step| step.priority.priority());

        let critical_count = steps
            .iter()
            .filter(|step| step.priority == RiskLevel::Critical)
            .count();
        let estimated_phases = steps.len().div_ceil(ASSETS_PER_PHASE).max(1);

        MigrationPlan {
            steps,
            total_assets: assets.len(),
            critical_count,
            estimated_phases,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn basic_plan_maps_kem_and_signature() {
        let plan = MigrationPlanner.plan(&[
            PlannedAsset::new("api-server", "RSA-2048").with_urgency(RiskLevel::Critical),
            PlannedAsset::new("db-conn", "ECDSA-P256").with_urgency(RiskLevel::High),
        ]);
        assert_eq!(plan.steps.len(), 2);
        assert_eq!(plan.steps[0].priority, RiskLevel::Critical);
        assert_eq!(plan.steps[0].target_algorithm, "ML-KEM-768");
        assert_eq!(plan.steps[0].notes, "Migrate from RSA-2048 to ML-KEM-768");
        assert_eq!(plan.steps[1].target_algorithm, "ML-DSA-65");
        assert_eq!(plan.estimated_phases, 1);
    }

    #[test]
    fn pqc_assets_need_no_step() {
        let plan = MigrationPlanner.plan(&[
            PlannedAsset::new("pqc-service", "ML-KEM-768"),
            PlannedAsset::new("legacy", "Blowfish"),
        ]);
        assert!(plan.steps.is_empty());
        assert_eq!(plan.total_assets, 2);
        assert_eq!(plan.critical_count, 0);
        assert_eq!(plan.estimated_phases, 1);
    }

    #[test]
    fn steps_sorted_most_urgent_first() {
        let plan = MigrationPlanner.plan(&[
            PlannedAsset::new("low", "RSA-2048").with_urgency(RiskLevel::Low),
            PlannedAsset::new("high", "RSA-2048").with_urgency(RiskLevel::High),
            PlannedAsset::new("crit", "RSA-2048").with_urgency(RiskLevel::Critical),
            PlannedAsset::new("medium-a", "DH-2048"),
            PlannedAsset::new("medium-b", "RSA-3072"),
        ]);
        let order: Vec<&str> = plan.steps.iter().map(|s| s.asset.as_str()).collect();
        assert_eq!(order, vec!["crit", "high", "medium-a", "medium-b", "low"]);
        assert_eq!(plan.critical_count, 1);
    }

    #[rstest]
    #[case("RSA-4096", "ML-KEM-1024", Effort::Medium)]
    #[case("ECDSA-P384", "ML-DSA-87", Effort::Medium)]
    #[case("Ed25519", "ML-DSA-65", Effort::Medium)]
    #[case("X25519", "X25519-ML-KEM-768", Effort::High)]
    fn targets_and_effort(#[case] algorithm: &str, #[case] target: &str, #[case] effort: Effort) {
        let plan = MigrationPlanner.plan(&[PlannedAsset::new("svc", algorithm)]);
        assert_eq!(plan.steps[0].target_algorithm, target);
        assert_eq!(plan.steps[0].estimated_effort, effort);
    }

    #[rstest]
    #[case(0, 1)]
    #[case(1, 1)]
    #[case(5, 1)]
    #[case(6, 2)]
    #[case(11, 3)]
    fn one_phase_per_five_steps(#[case] steps: usize, #[case] phases: usize) {
        let assets: Vec<_> = (0..steps)
            .map(|i| PlannedAsset::new(format!("svc-{i}"), "RSA-2048"))
            .collect();
        assert_eq!(MigrationPlanner.plan(&assets).estimated_phases, phases);
    }

    #[test]
    fn urgency_defaults_to_medium_when_deserialized() {
        let asset: PlannedAsset =
            serde_json::from_str(r#"{"asset":"vpn","algorithm":"X25519"}"#).unwrap();
        assert_eq!(asset.urgency, RiskLevel::Medium);
    }
}

//! Status enums, risk labels, finding categories, and entity types for QRAP.
//!
//! All enums use `SCREAMING_SNAKE_CASE` serialization, which is also the text
//! stored in SQL. `AssessmentStatus` provides `allowed_next_states()` to
//! enforce valid transitions at the application layer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// AssessmentStatus
// ---------------------------------------------------------------------------

/// Status of an assessment through its run lifecycle.
///
/// ```text
/// DRAFT → IN_PROGRESS → COMPLETED → IN_PROGRESS (re-run)
///                     → FAILED    → IN_PROGRESS (retry)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssessmentStatus {
    Draft,
    InProgress,
    Completed,
    Failed,
}

impl AssessmentStatus {
    /// Valid next states from the current state.
    #[must_use]
    #[allow(clippy::match_same_arms)]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Draft => &[Self::InProgress],
            Self::InProgress => &[Self::Completed, Self::Failed],
            Self::Completed => &[Self::InProgress],
            Self::Failed => &[Self::InProgress],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// Check a transition of assessment `id` to `next`, returning `next` when
    /// it is allowed.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTransition` when it is not.
    pub fn transition(self, id: &str, next: Self) -> Result<Self, CoreError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(CoreError::InvalidTransition {
                entity_type: EntityType::Assessment.to_string(),
                id: id.to_string(),
                from: self.to_string(),
                to: next.to_string(),
            })
        }
    }

    /// Whether a run may start from this state.
    #[must_use]
    pub fn is_runnable(self) -> bool {
        self.can_transition_to(Self::InProgress)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
        }
    }
}

impl fmt::Display for AssessmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RiskLevel
// ---------------------------------------------------------------------------

/// Severity of a finding, and the overall risk label of an assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Critical,
    High,
    Medium,
    Low,
}

impl RiskLevel {
    /// Weight contributed to the risk score by one finding of this level.
    #[must_use]
    pub const fn weight(self) -> u32 {
        match self {
            Self::Critical => 10,
            Self::High => 5,
            Self::Medium => 2,
            Self::Low => 0,
        }
    }

    /// Position in a most-severe-first ordering (CRITICAL = 0).
    #[must_use]
    pub const fn priority(self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FindingCategory
// ---------------------------------------------------------------------------

/// Category of a finding.
///
/// The synthetic scan only emits `MissingPqc` and `HarvestNowDecryptLater`;
/// the remaining variants are accepted when reading stored findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FindingCategory {
    MissingPqc,
    HarvestNowDecryptLater,
    WeakAlgorithm,
    DeprecatedProtocol,
    KeyManagement,
}

impl FindingCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingPqc => "MISSING_PQC",
            Self::HarvestNowDecryptLater => "HARVEST_NOW_DECRYPT_LATER",
            Self::WeakAlgorithm => "WEAK_ALGORITHM",
            Self::DeprecatedProtocol => "DEPRECATED_PROTOCOL",
            Self::KeyManagement => "KEY_MANAGEMENT",
        }
    }
}

impl fmt::Display for FindingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EntityType
// ---------------------------------------------------------------------------

/// Kind of persisted entity, used in error messages and table mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Organization,
    Assessment,
    Finding,
}

impl EntityType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Organization => "organization",
            Self::Assessment => "assessment",
            Self::Finding => "finding",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

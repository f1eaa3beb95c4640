//! Rule-based analysis: turning target assets into findings, and findings
//! into an assessment's risk summary.
//!
//! Both halves are pure. The lifecycle in `qrap-db` wires them to the store.

mod aggregator;
mod synthesizer;

pub use aggregator::{RiskSummary, aggregate};
pub use synthesizer::{
    CURRENT_ALGORITHM, FINDINGS_PER_ASSET, HNDL_REMEDIATION, MISSING_PQC_REMEDIATION,
    RECOMMENDED_ALGORITHM, synthesize,
};

//! Harvest-now-decrypt-later exposure estimates.
//!
//! Applies the Mosca inequality: captured ciphertext is at risk when its
//! secrecy shelf life outlasts the years remaining until a cryptographically
//! relevant quantum computer can break the algorithm protecting it.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::RiskLevel;

/// Break year assumed for algorithms missing from the table.
pub const DEFAULT_BREAK_YEAR: i32 = 2035;

/// Default secrecy shelf life of captured data, in years.
pub const DEFAULT_SHELF_LIFE_YEARS: i32 = 10;

/// Conservative estimates of the year each algorithm stops protecting data.
const ALGORITHM_BREAK_YEAR: &[(&str, i32)] = &[
    ("RSA-2048", 2030),
    ("RSA-3072", 2032),
    ("RSA-4096", 2035),
    ("ECDSA-P256", 2030),
    ("ECDSA-P384", 2032),
    ("Ed25519", 2030),
    ("X25519", 2030),
    ("DH-2048", 2030),
    ("AES-128", 2040),
    ("AES-256", 2060),
    ("ML-KEM-512", 2080),
    ("ML-KEM-768", 2080),
    ("ML-KEM-1024", 2080),
    ("ML-DSA-44", 2080),
    ("ML-DSA-65", 2080),
    ("ML-DSA-87", 2080),
];

/// Outcome of an HNDL estimate for one algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct HndlResult {
    pub algorithm: String,
    pub estimated_break_year: i32,
    pub data_shelf_life_years: i32,
    /// Years the data stays secret after the algorithm is broken (never negative).
    pub risk_window_years: i32,
    pub is_at_risk: bool,
    pub urgency: RiskLevel,
}

/// Stateless HNDL calculator.
#[derive(Debug, Clone, Copy, Default)]
pub struct HndlCalculator;

impl HndlCalculator {
    /// Estimated break year for `algorithm`, falling back to [`DEFAULT_BREAK_YEAR`].
    #[must_use]
    pub fn break_year(algorithm: &str) -> i32 {
        ALGORITHM_BREAK_YEAR
            .iter()
            .find(|(name, _)| *name == algorithm)
            .map_or(DEFAULT_BREAK_YEAR, |(_, year)| *year)
    }

    /// Evaluate the HNDL exposure of data protected by `algorithm`.
    #[must_use]
    pub fn calculate(
        &self,
        algorithm: &str,
        data_shelf_life_years: i32,
        reference_year: i32,
    ) -> HndlResult {
        let break_year = Self::break_year(algorithm);
        let years_until_break = break_year - reference_year;
        let risk_window = data_shelf_life_years - years_until_break;

        let urgency = if risk_window >= 10 {
            RiskLevel::Critical
        } else if risk_window >= 5 {
            RiskLevel::High
        } else if risk_window > 0 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        };

        HndlResult {
            algorithm: algorithm.to_string(),
            estimated_break_year: break_year,
            data_shelf_life_years,
            risk_window_years: risk_window.max(0),
            is_at_risk: risk_window > 0,
            urgency,
        }
    }
}

//! Cross-cutting error types for QRAP.
//!
//! This module defines errors raised by pure validation and state machine
//! checks. Storage errors (`DatabaseError`) and the engine's error kinds
//! (`ServiceError`) live in `qrap-db`; `qrap-cli` converges everything into
//! `anyhow`.

use thiserror::Error;

/// Errors raised by validation and status checks in any QRAP crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A state machine transition was attempted that is not allowed.
    #[error("Invalid state transition: {entity_type} {id} from {from} to {to}")]
    InvalidTransition {
        entity_type: String,
        id: String,
        from: String,
        to: String,
    },

    /// Input failed validation (missing, malformed, too long).
    #[error("Validation error: {0}")]
    Validation(String),
}

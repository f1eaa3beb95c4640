//! Error types for qrap-db.
//!
//! `DatabaseError` is what the store primitives return. `ServiceError` is the
//! set of error kinds engine operations expose to callers.

use std::fmt;

use qrap_core::enums::EntityType;
use qrap_core::errors::CoreError;
use thiserror::Error;
use uuid::Uuid;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// The step of a run that was executing when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    /// Inserting the synthesized finding batch.
    PersistFindings,
    /// Writing the aggregate results and the COMPLETED status.
    PersistResults,
    /// Committing the results transaction.
    Commit,
}

impl RunStage {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PersistFindings => "persist_findings",
            Self::PersistResults => "persist_results",
            Self::Commit => "commit",
        }
    }
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by engine operations on `QrapService`.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Input was rejected before anything was written.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The referenced entity does not exist.
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: EntityType, id: String },

    /// The operation is not permitted in the entity's current state, or the
    /// stored state is not recognised.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// The store failed.
    #[error("Store error: {0}")]
    Store(#[from] DatabaseError),

    /// A run failed after taking its lease. Nothing from the run's results
    /// transaction is visible and the assessment has been marked FAILED.
    #[error("Assessment {assessment_id} run failed during {stage}: {source}")]
    PartialFailure {
        assessment_id: Uuid,
        stage: RunStage,
        #[source]
        source: DatabaseError,
    },
}

impl ServiceError {
    pub(crate) fn not_found(entity_type: EntityType, id: impl fmt::Display) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }
}

impl ServiceError {
    /// Translate a point-lookup failure: a missing row is `NotFound`, an
    /// unrecognised stored value is `InvalidState`, anything else is `Store`.
    pub(crate) fn from_lookup(error: DatabaseError, entity_type: EntityType, id: Uuid) -> Self {
        match error {
            DatabaseError::NoResult => Self::not_found(entity_type, id),
            DatabaseError::InvalidState(msg) => Self::InvalidState(msg),
            other => Self::Store(other),
        }
    }
}

impl From<CoreError> for ServiceError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(msg) => Self::Validation(msg),
            e @ CoreError::InvalidTransition { .. } => Self::InvalidState(e.to_string()),
        }
    }
}

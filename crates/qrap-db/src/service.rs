//! Service layer owning the database handle and the injected clock and
//! identity generator.
//!
//! `QrapService` wraps `QrapDb` (raw database access). Store primitives
//! (`repos`), the assessment lifecycle (`lifecycle`) and read paths
//! (`listing`) are all implemented as `impl QrapService` blocks.

use std::sync::Arc;

use chrono::{DateTime, SubsecRound, Utc};
use qrap_config::DatabaseConfig;
use qrap_core::clock::{Clock, SystemClock};
use qrap_core::ids::{IdGenerator, RandomIds};
use uuid::Uuid;

use crate::QrapDb;
use crate::error::DatabaseError;

/// Actor recorded on writes the engine performs on its own behalf.
pub const SYSTEM_ACTOR: &str = "system";

/// Engine entry point. One instance serves concurrent callers.
pub struct QrapService {
    db: QrapDb,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl QrapService {
    /// Create a new service wrapping a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = QrapDb::open_local(db_path).await?;
        Ok(Self::from_db(db))
    }

    /// Create a service backed by a remote database.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the remote database cannot be reached.
    pub async fn new_remote(url: &str, auth_token: &str) -> Result<Self, DatabaseError> {
        let db = QrapDb::open_remote(url, auth_token).await?;
        Ok(Self::from_db(db))
    }

    /// Create a service for whichever database the configuration selects.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn from_config(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let db = QrapDb::open(config).await?;
        Ok(Self::from_db(db))
    }

    /// Create from an existing `QrapDb` with the system clock and random IDs.
    #[must_use]
    pub fn from_db(db: QrapDb) -> Self {
        Self {
            db,
            clock: Arc::new(SystemClock),
            ids: Arc::new(RandomIds),
        }
    }

    /// Replace the clock (for deterministic tests).
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the identity generator (for deterministic tests).
    #[must_use]
    pub fn with_ids(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &QrapDb {
        &self.db
    }

    /// Access the identity generator.
    #[must_use]
    pub fn ids(&self) -> &dyn IdGenerator {
        self.ids.as_ref()
    }

    /// Current time at storage precision (microseconds), so entities
    /// returned by a write compare equal to what a later read returns.
    pub(crate) fn now(&self) -> DateTime<Utc> {
        self.clock.now().trunc_subsecs(6)
    }

    pub(crate) fn next_id(&self) -> Uuid {
        self.ids.next_id()
    }
}

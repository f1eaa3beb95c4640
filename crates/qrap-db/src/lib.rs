//! # qrap-db
//!
//! libSQL persistence and the assessment lifecycle engine for QRAP.
//!
//! Holds all relational state (organizations, assessments, findings) and the
//! operations that move an assessment through its run lifecycle. Uses local
//! libSQL files (or `:memory:` in tests) and remote `libsql://` databases.
//!
//! All engine operations are `impl QrapService` blocks spread over
//! [`repos`] (store primitives), [`lifecycle`] (assessment create/run/summary),
//! [`organizations`] (organization create/update) and [`listing`] (lookups and
//! paginated lists).

pub mod error;
pub mod helpers;
pub mod lifecycle;
pub mod listing;
mod migrations;
pub mod organizations;
pub mod query;
pub mod repos;
pub mod retry;
pub mod service;

#[cfg(test)]
mod test_support;

use libsql::params::IntoParams;
use libsql::Builder;
use qrap_config::DatabaseConfig;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use error::DatabaseError;
use retry::RetryConfig;

/// Central database handle.
///
/// Wraps a libSQL database and its single shared connection. All access goes
/// through a reader/writer gate. Single-statement writes hold it exclusively
/// for one statement, and a [`WriteTx`] holds it exclusively for its whole
/// lifetime, so no other caller's statement lands inside the transaction and
/// no reader observes its uncommitted rows. Reads share the gate until their
/// [`ReadRows`] is dropped.
pub struct QrapDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    gate: RwLock<()>,
    remote: bool,
    retry: RetryConfig,
}

impl QrapDb {
    /// Open a local database at the given path (`":memory:"` for tests).
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let qrap_db = Self {
            db,
            conn,
            gate: RwLock::new(()),
            remote: false,
            retry: RetryConfig::none(),
        };
        qrap_db.run_migrations().await?;
        Ok(qrap_db)
    }

    /// Open a remote database over Hrana (`libsql://...`).
    ///
    /// Statements against a remote database are retried on transient
    /// infrastructure errors.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the connection or migrations fail.
    pub async fn open_remote(url: &str, auth_token: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_remote(url.to_string(), auth_token.to_string())
            .build()
            .await?;
        let conn = db.connect()?;

        let qrap_db = Self {
            db,
            conn,
            gate: RwLock::new(()),
            remote: true,
            retry: RetryConfig::default(),
        };
        qrap_db.run_migrations().await?;
        Ok(qrap_db)
    }

    /// Open whichever database the configuration points at.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the selected database cannot be opened.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        if config.is_remote() {
            tracing::debug!(url = %config.url, "opening remote database");
            Self::open_remote(&config.url, &config.auth_token).await
        } else {
            tracing::debug!(path = %config.path, "opening local database");
            Self::open_local(&config.path).await
        }
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Whether this handle talks to a remote database.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        self.remote
    }

    /// Execute one write statement with the gate held exclusively.
    ///
    /// `make_params` is called once per attempt so the statement can be
    /// replayed after a transient remote error.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::LibSql` if the statement fails.
    pub async fn execute_with<P, F>(&self, sql: &str, make_params: F) -> Result<u64, DatabaseError>
    where
        P: IntoParams,
        F: Fn() -> P,
    {
        let _gate = self.gate.write().await;
        let changed =
            retry::with_retry(&self.retry, || self.conn.execute(sql, make_params())).await?;
        Ok(changed)
    }

    /// Run a read query. The returned rows keep a shared hold on the gate,
    /// so a write transaction cannot open until they are dropped.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::LibSql` if the query fails.
    pub async fn query_with<P, F>(&self, sql: &str, make_params: F) -> Result<ReadRows<'_>, DatabaseError>
    where
        P: IntoParams,
        F: Fn() -> P,
    {
        let gate = self.gate.read().await;
        let rows = retry::with_retry(&self.retry, || self.conn.query(sql, make_params())).await?;
        Ok(ReadRows { rows, _gate: gate })
    }

    /// Begin a write transaction holding the gate exclusively until it ends.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::LibSql` if `BEGIN` fails.
    pub async fn begin_write(&self) -> Result<WriteTx<'_>, DatabaseError> {
        let gate = self.gate.write().await;
        let tx = self.conn.transaction().await?;
        Ok(WriteTx { tx, _gate: gate })
    }
}

/// Rows of a read query, stepped lazily on the shared connection.
pub struct ReadRows<'a> {
    rows: libsql::Rows,
    _gate: RwLockReadGuard<'a, ()>,
}

impl ReadRows<'_> {
    /// Step to the next row.
    ///
    /// # Errors
    ///
    /// Returns `libsql::Error` if stepping the statement fails.
    pub async fn next(&mut self) -> Result<Option<libsql::Row>, libsql::Error> {
        self.rows.next().await
    }
}

/// An open write transaction.
///
/// Dropping it without calling [`WriteTx::commit`] leaves rollback to libSQL;
/// callers on an error path should call [`WriteTx::rollback`] explicitly.
pub struct WriteTx<'a> {
    // Declared first so the transaction ends before the gate is released.
    tx: libsql::Transaction,
    _gate: RwLockWriteGuard<'a, ()>,
}

impl WriteTx<'_> {
    /// Execute a statement inside the transaction.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::LibSql` if the statement fails.
    pub async fn execute(&self, sql: &str, params: impl IntoParams) -> Result<u64, DatabaseError> {
        Ok(self.tx.execute(sql, params).await?)
    }

    /// Commit and release the gate.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::LibSql` if `COMMIT` fails.
    pub async fn commit(self) -> Result<(), DatabaseError> {
        self.tx.commit().await?;
        Ok(())
    }

    /// Roll back and release the gate.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::LibSql` if `ROLLBACK` fails.
    pub async fn rollback(self) -> Result<(), DatabaseError> {
        self.tx.rollback().await?;
        Ok(())
    }
}

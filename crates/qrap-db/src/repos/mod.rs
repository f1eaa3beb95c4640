//! Store primitives for QRAP entities.
//!
//! Each module adds methods to `QrapService` via `impl QrapService` blocks and
//! returns `DatabaseError`; the engine operations in `lifecycle` and `listing`
//! translate those into `ServiceError`.

pub mod assessment;
pub mod finding;
pub mod organization;

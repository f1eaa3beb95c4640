//! Entity structs for all QRAP domain objects.
//!
//! Each entity maps to a table in the libSQL database (see
//! `qrap-db/migrations/001_initial.sql`). All structs derive `Serialize`,
//! `Deserialize`, and `JsonSchema` for JSON roundtrip and schema validation.

mod assessment;
mod finding;
mod organization;

pub use assessment::Assessment;
pub use finding::Finding;
pub use organization::Organization;

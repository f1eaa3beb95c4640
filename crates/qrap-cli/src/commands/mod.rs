pub mod assessment;
pub mod dispatch;
pub mod finding;
pub mod hndl;
pub mod migration_plan;
pub mod org;
pub mod score;
pub mod shared;

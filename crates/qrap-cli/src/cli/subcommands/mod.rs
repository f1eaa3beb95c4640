mod assessment;
mod finding;
mod org;

pub use assessment::AssessmentCommands;
pub use finding::FindingCommands;
pub use org::OrgCommands;

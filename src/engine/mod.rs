pub mod executor;
pub mod graph;
pub mod router;
pub mod state;

pub use executor::{Engine, RunOutcome, RunReport};
pub use graph::{Next, Router, StageId, WorkflowGraph};
pub use state::{ChangeImpactAnalysis, ImpactLevel, StageUpdate, WorkflowState};

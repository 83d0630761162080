pub mod automation;
pub mod bug_reports;
pub mod diagnostics;
pub mod execution;
pub mod impact;
pub mod prompt;
pub mod readiness;
pub mod self_healing;
pub mod summary;
pub mod test_cases;
pub mod test_data;

use std::sync::Arc;

use async_trait::async_trait;

use crate::artifacts::ArtifactStore;
use crate::engine::graph::{StageId, WorkflowGraph};
use crate::engine::router;
use crate::engine::state::{StageUpdate, WorkflowState};
use crate::llm::TextCompletion;

/// One node in the workflow graph: reads its declared state fields, invokes
/// collaborators, returns a partial update.
///
/// A stage must not fail past the engine: collaborator errors degrade into a
/// placeholder artifact plus an `errors` entry in the update.
#[async_trait]
pub trait Stage: Send + Sync {
    fn id(&self) -> StageId;
    async fn run(&self, state: &WorkflowState) -> StageUpdate;
}

/// Assemble the standard STLC graph.
///
/// Fixed spine: generation -> data -> automation -> ... -> summary ->
/// readiness (terminal). Conditional edges: impact analysis when diffs are
/// present, the guarded regeneration loop-back, and self-healing on UI/API
/// failures.
pub fn standard_graph(
    llm: Arc<dyn TextCompletion>,
    artifacts: Arc<ArtifactStore>,
    automation_framework: &str,
) -> WorkflowGraph {
    let mut graph = WorkflowGraph::new(StageId::TestCaseGeneration);

    graph.add_stage(Box::new(test_cases::TestCaseGenerationStage::new(
        Arc::clone(&llm),
        Arc::clone(&artifacts),
    )));
    graph.add_stage(Box::new(test_data::TestDataGenerationStage::new(
        Arc::clone(&llm),
        Arc::clone(&artifacts),
    )));
    graph.add_stage(Box::new(automation::TestScriptAutomationStage::new(
        Arc::clone(&llm),
        Arc::clone(&artifacts),
        automation_framework,
    )));
    graph.add_stage(Box::new(impact::ChangeImpactAnalysisStage));
    graph.add_stage(Box::new(execution::SimulateTestExecutionStage::new(
        Arc::clone(&artifacts),
    )));
    graph.add_stage(Box::new(self_healing::SelfHealingScriptsStage::new(
        Arc::clone(&llm),
        Arc::clone(&artifacts),
    )));
    graph.add_stage(Box::new(bug_reports::BugReportGenerationStage::new(
        Arc::clone(&llm),
        Arc::clone(&artifacts),
    )));
    graph.add_stage(Box::new(summary::TestSummaryReportingStage::new(
        Arc::clone(&llm),
        Arc::clone(&artifacts),
    )));
    graph.add_stage(Box::new(readiness::ReleaseReadinessAdvisoryStage::new(
        llm,
    )));

    graph.add_edge(StageId::TestCaseGeneration, StageId::TestDataGeneration);
    graph.add_edge(StageId::TestDataGeneration, StageId::TestScriptAutomation);
    graph.add_router(StageId::TestScriptAutomation, router::after_script_automation);
    graph.add_router(StageId::ChangeImpactAnalysis, router::after_impact_analysis);
    graph.add_router(StageId::SimulateTestExecution, router::after_execution);
    graph.add_edge(StageId::SelfHealingScripts, StageId::BugReportGeneration);
    graph.add_edge(StageId::BugReportGeneration, StageId::TestSummaryReporting);
    graph.add_edge(StageId::TestSummaryReporting, StageId::ReleaseReadinessAdvisory);
    graph.set_terminal(StageId::ReleaseReadinessAdvisory);

    graph
}

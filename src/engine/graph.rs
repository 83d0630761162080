use std::collections::HashMap;

use crate::engine::state::WorkflowState;
use crate::stages::Stage;

/// Names of the nodes in the STLC workflow graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageId {
    TestCaseGeneration,
    TestDataGeneration,
    TestScriptAutomation,
    ChangeImpactAnalysis,
    SimulateTestExecution,
    SelfHealingScripts,
    BugReportGeneration,
    TestSummaryReporting,
    ReleaseReadinessAdvisory,
}

impl StageId {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageId::TestCaseGeneration => "test_case_generation",
            StageId::TestDataGeneration => "test_data_generation",
            StageId::TestScriptAutomation => "test_script_automation",
            StageId::ChangeImpactAnalysis => "change_impact_analysis",
            StageId::SimulateTestExecution => "simulate_test_execution",
            StageId::SelfHealingScripts => "self_healing_scripts",
            StageId::BugReportGeneration => "bug_report_generation",
            StageId::TestSummaryReporting => "test_summary_reporting",
            StageId::ReleaseReadinessAdvisory => "release_readiness_advisory",
        }
    }
}

impl std::fmt::Display for StageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pure decision function: inspects post-merge state, names the next stage.
pub type Router = fn(&WorkflowState) -> StageId;

/// Outgoing transition of a stage.
pub enum Next {
    /// Fixed successor.
    Stage(StageId),
    /// Successor chosen by a router from the post-merge state.
    Router(Router),
    /// Terminal stage: the run ends after it executes.
    End,
}

/// Static workflow structure: stage registry, transitions, entry stage.
pub struct WorkflowGraph {
    entry: StageId,
    stages: HashMap<StageId, Box<dyn Stage>>,
    edges: HashMap<StageId, Next>,
}

impl WorkflowGraph {
    pub fn new(entry: StageId) -> Self {
        Self {
            entry,
            stages: HashMap::new(),
            edges: HashMap::new(),
        }
    }

    pub fn entry(&self) -> StageId {
        self.entry
    }

    /// Register a stage function under its own id.
    pub fn add_stage(&mut self, stage: Box<dyn Stage>) {
        self.stages.insert(stage.id(), stage);
    }

    /// Fixed edge: `from` always hands off to `to`.
    pub fn add_edge(&mut self, from: StageId, to: StageId) {
        self.edges.insert(from, Next::Stage(to));
    }

    /// Conditional edge: `from` hands off to whatever `router` returns.
    pub fn add_router(&mut self, from: StageId, router: Router) {
        self.edges.insert(from, Next::Router(router));
    }

    /// Mark `stage` as terminal (no outgoing edge).
    pub fn set_terminal(&mut self, stage: StageId) {
        self.edges.insert(stage, Next::End);
    }

    pub(crate) fn stage(&self, id: StageId) -> Option<&dyn Stage> {
        self.stages.get(&id).map(|s| s.as_ref())
    }

    pub(crate) fn next(&self, id: StageId) -> Option<&Next> {
        self.edges.get(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::state::StageUpdate;
    use async_trait::async_trait;

    struct NoopStage(StageId);

    #[async_trait]
    impl Stage for NoopStage {
        fn id(&self) -> StageId {
            self.0
        }

        async fn run(&self, _state: &WorkflowState) -> StageUpdate {
            StageUpdate::default()
        }
    }

    #[test]
    fn test_registry_and_edges() {
        let mut graph = WorkflowGraph::new(StageId::TestCaseGeneration);
        graph.add_stage(Box::new(NoopStage(StageId::TestCaseGeneration)));
        graph.add_edge(StageId::TestCaseGeneration, StageId::TestDataGeneration);
        graph.set_terminal(StageId::ReleaseReadinessAdvisory);

        assert_eq!(graph.entry(), StageId::TestCaseGeneration);
        assert!(graph.stage(StageId::TestCaseGeneration).is_some());
        assert!(graph.stage(StageId::TestDataGeneration).is_none());
        assert!(matches!(
            graph.next(StageId::TestCaseGeneration),
            Some(Next::Stage(StageId::TestDataGeneration))
        ));
        assert!(matches!(
            graph.next(StageId::ReleaseReadinessAdvisory),
            Some(Next::End)
        ));
        assert!(graph.next(StageId::SelfHealingScripts).is_none());
    }

    #[test]
    fn test_stage_id_names() {
        assert_eq!(StageId::TestCaseGeneration.to_string(), "test_case_generation");
        assert_eq!(
            StageId::ReleaseReadinessAdvisory.as_str(),
            "release_readiness_advisory"
        );
    }
}

use std::sync::Arc;

use async_trait::async_trait;

use crate::engine::graph::StageId;
use crate::engine::state::{StageUpdate, WorkflowState};
use crate::llm::TextCompletion;
use crate::stages::{prompt, Stage};

// Quality metrics would come from CI analysis in a real deployment.
const QUALITY_METRICS: &str =
    "Code quality score: 8/10. Critical bugs: 0. High bugs: 1. Passed tests: 95%.";

/// Terminal stage: weighs the summary report and bug reports into a
/// release-readiness recommendation.
pub struct ReleaseReadinessAdvisoryStage {
    llm: Arc<dyn TextCompletion>,
}

impl ReleaseReadinessAdvisoryStage {
    pub fn new(llm: Arc<dyn TextCompletion>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Stage for ReleaseReadinessAdvisoryStage {
    fn id(&self) -> StageId {
        StageId::ReleaseReadinessAdvisory
    }

    async fn run(&self, state: &WorkflowState) -> StageUpdate {
        let input = prompt::release_readiness_input(
            &state.test_summary_report,
            &state.structured_bug_reports,
            QUALITY_METRICS,
        );

        let advice = match self
            .llm
            .complete(prompt::RELEASE_READINESS_SYSTEM, &input)
            .await
        {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(error = %e, "Release readiness call failed");
                return StageUpdate {
                    release_readiness_advice: Some(String::new()),
                    current_status: Some("Release readiness advisory degraded.".to_string()),
                    messages: vec!["Release readiness advisory produced no output.".to_string()],
                    errors: vec![format!("Release readiness advisory failed: {e}")],
                    ..Default::default()
                };
            }
        };

        StageUpdate {
            release_readiness_advice: Some(advice),
            current_status: Some("Release readiness assessed.".to_string()),
            messages: vec!["Release readiness assessment complete.".to_string()],
            ..Default::default()
        }
    }
}

use std::sync::Arc;

use async_trait::async_trait;

use crate::artifacts::ArtifactStore;
use crate::engine::graph::StageId;
use crate::engine::state::{StageUpdate, WorkflowState};
use crate::llm::TextCompletion;
use crate::stages::{prompt, Stage};

/// Entry stage: turns requirements and user stories into structured test
/// cases. Also the target of the regeneration loop-back.
pub struct TestCaseGenerationStage {
    llm: Arc<dyn TextCompletion>,
    artifacts: Arc<ArtifactStore>,
}

impl TestCaseGenerationStage {
    pub fn new(llm: Arc<dyn TextCompletion>, artifacts: Arc<ArtifactStore>) -> Self {
        Self { llm, artifacts }
    }
}

#[async_trait]
impl Stage for TestCaseGenerationStage {
    fn id(&self) -> StageId {
        StageId::TestCaseGeneration
    }

    async fn run(&self, state: &WorkflowState) -> StageUpdate {
        let input = prompt::test_case_input(&state.requirements, &state.user_stories);

        let test_cases = match self.llm.complete(prompt::TEST_CASE_SYSTEM, &input).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(error = %e, "Test case generation call failed");
                return StageUpdate {
                    test_cases: Some(String::new()),
                    current_status: Some("Test case generation degraded.".to_string()),
                    messages: vec!["Test case generation produced no output.".to_string()],
                    errors: vec![format!("Test case generation failed: {e}")],
                    ..Default::default()
                };
            }
        };

        self.artifacts.save("test_cases.md", &test_cases).await;

        let line_count = test_cases.lines().count();
        StageUpdate {
            test_cases: Some(test_cases),
            current_status: Some("Test cases generated.".to_string()),
            messages: vec![format!("Generated {line_count} lines of test cases.")],
            ..Default::default()
        }
    }
}

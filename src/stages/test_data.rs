use std::sync::Arc;

use async_trait::async_trait;

use crate::artifacts::ArtifactStore;
use crate::engine::graph::StageId;
use crate::engine::state::{StageUpdate, WorkflowState};
use crate::llm::TextCompletion;
use crate::stages::{prompt, Stage};

// In a real deployment the constraints would come from application metadata.
const DATA_CONSTRAINTS: &str = "string max 255, numbers 0-1000, valid emails required";

/// Produces valid, boundary, and negative datasets for the generated test
/// cases.
pub struct TestDataGenerationStage {
    llm: Arc<dyn TextCompletion>,
    artifacts: Arc<ArtifactStore>,
}

impl TestDataGenerationStage {
    pub fn new(llm: Arc<dyn TextCompletion>, artifacts: Arc<ArtifactStore>) -> Self {
        Self { llm, artifacts }
    }
}

#[async_trait]
impl Stage for TestDataGenerationStage {
    fn id(&self) -> StageId {
        StageId::TestDataGeneration
    }

    async fn run(&self, state: &WorkflowState) -> StageUpdate {
        let input = prompt::test_data_input(&state.test_cases, DATA_CONSTRAINTS);

        let test_data = match self.llm.complete(prompt::TEST_DATA_SYSTEM, &input).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(error = %e, "Test data generation call failed");
                return StageUpdate {
                    test_data: Some(String::new()),
                    current_status: Some("Test data generation degraded.".to_string()),
                    messages: vec!["Test data generation produced no output.".to_string()],
                    errors: vec![format!("Test data generation failed: {e}")],
                    ..Default::default()
                };
            }
        };

        self.artifacts.save("test_data.json", &test_data).await;

        let line_count = test_data.lines().count();
        StageUpdate {
            test_data: Some(test_data),
            current_status: Some("Test data generated.".to_string()),
            messages: vec![format!("Generated {line_count} lines of test data.")],
            ..Default::default()
        }
    }
}

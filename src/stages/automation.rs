use std::sync::Arc;

use async_trait::async_trait;

use crate::artifacts::ArtifactStore;
use crate::engine::graph::StageId;
use crate::engine::state::{StageUpdate, WorkflowState};
use crate::llm::TextCompletion;
use crate::stages::{prompt, Stage};

/// Transforms structured test cases into automated scripts for the
/// configured framework.
pub struct TestScriptAutomationStage {
    llm: Arc<dyn TextCompletion>,
    artifacts: Arc<ArtifactStore>,
    framework: String,
}

impl TestScriptAutomationStage {
    pub fn new(
        llm: Arc<dyn TextCompletion>,
        artifacts: Arc<ArtifactStore>,
        framework: &str,
    ) -> Self {
        Self {
            llm,
            artifacts,
            framework: framework.to_string(),
        }
    }
}

#[async_trait]
impl Stage for TestScriptAutomationStage {
    fn id(&self) -> StageId {
        StageId::TestScriptAutomation
    }

    async fn run(&self, state: &WorkflowState) -> StageUpdate {
        let input = prompt::automation_input(&state.test_cases, &self.framework);

        let scripts = match self.llm.complete(prompt::AUTOMATION_SYSTEM, &input).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(error = %e, framework = %self.framework, "Script automation call failed");
                return StageUpdate {
                    automated_scripts: Some(String::new()),
                    current_status: Some("Test script automation degraded.".to_string()),
                    messages: vec!["Script automation produced no output.".to_string()],
                    errors: vec![format!("Test script automation failed: {e}")],
                    ..Default::default()
                };
            }
        };

        self.artifacts.save("automated_scripts.md", &scripts).await;

        let line_count = scripts.lines().count();
        StageUpdate {
            automated_scripts: Some(scripts),
            current_status: Some("Test scripts automated.".to_string()),
            messages: vec![format!("Automated {line_count} lines of scripts.")],
            ..Default::default()
        }
    }
}

use std::sync::Arc;

use async_trait::async_trait;

use crate::artifacts::ArtifactStore;
use crate::engine::graph::StageId;
use crate::engine::state::{StageUpdate, WorkflowState};
use crate::llm::TextCompletion;
use crate::stages::{diagnostics, prompt, Stage};

/// Repairs automated scripts whose failures trace back to UI locator or API
/// endpoint drift. Reached only via the post-execution router.
pub struct SelfHealingScriptsStage {
    llm: Arc<dyn TextCompletion>,
    artifacts: Arc<ArtifactStore>,
}

impl SelfHealingScriptsStage {
    pub fn new(llm: Arc<dyn TextCompletion>, artifacts: Arc<ArtifactStore>) -> Self {
        Self { llm, artifacts }
    }
}

#[async_trait]
impl Stage for SelfHealingScriptsStage {
    fn id(&self) -> StageId {
        StageId::SelfHealingScripts
    }

    async fn run(&self, state: &WorkflowState) -> StageUpdate {
        let ui_api_state = diagnostics::current_ui_state();
        let input = prompt::self_healing_input(
            &state.automated_scripts,
            &state.simulated_execution_results,
            ui_api_state,
        );

        let healed = match self.llm.complete(prompt::SELF_HEALING_SYSTEM, &input).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(error = %e, "Self-healing call failed");
                // Keep the original script rather than dropping to nothing.
                return StageUpdate {
                    self_healed_scripts: Some(state.automated_scripts.clone()),
                    current_status: Some("Self-healing degraded.".to_string()),
                    messages: vec!["Self-healing left scripts unchanged.".to_string()],
                    errors: vec![format!("Self-healing failed: {e}")],
                    ..Default::default()
                };
            }
        };

        self.artifacts.save("self_healed_scripts.py", &healed).await;

        StageUpdate {
            self_healed_scripts: Some(healed),
            current_status: Some("Test scripts self-healed.".to_string()),
            messages: vec!["Test scripts updated by self-healing agent.".to_string()],
            ..Default::default()
        }
    }
}

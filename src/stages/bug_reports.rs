use std::sync::Arc;

use async_trait::async_trait;

use crate::artifacts::ArtifactStore;
use crate::engine::graph::StageId;
use crate::engine::state::{StageUpdate, WorkflowState};
use crate::llm::TextCompletion;
use crate::stages::{diagnostics, prompt, Stage};

/// Turns raw issue logs into structured, prioritized bug reports.
///
/// Benign or empty logs produce a no-op report instead of a collaborator
/// call.
pub struct BugReportGenerationStage {
    llm: Arc<dyn TextCompletion>,
    artifacts: Arc<ArtifactStore>,
}

impl BugReportGenerationStage {
    pub fn new(llm: Arc<dyn TextCompletion>, artifacts: Arc<ArtifactStore>) -> Self {
        Self { llm, artifacts }
    }
}

#[async_trait]
impl Stage for BugReportGenerationStage {
    fn id(&self) -> StageId {
        StageId::BugReportGeneration
    }

    async fn run(&self, state: &WorkflowState) -> StageUpdate {
        let raw_logs = &state.bug_reports_raw_logs;

        if raw_logs.is_empty() || raw_logs.to_lowercase().contains("no major issues logged") {
            return StageUpdate {
                structured_bug_reports: Some(
                    "No significant issues to report from logs.".to_string(),
                ),
                current_status: Some("Bug report generation skipped (no issues).".to_string()),
                messages: vec!["No issues detected for bug report generation.".to_string()],
                ..Default::default()
            };
        }

        // Combine tracker exports with the logs produced by this run.
        let full_logs = format!("{}\n{raw_logs}", diagnostics::fetch_issue_logs());
        let input = prompt::bug_report_input(&full_logs);

        let reports = match self.llm.complete(prompt::BUG_REPORT_SYSTEM, &input).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(error = %e, "Bug report generation call failed");
                return StageUpdate {
                    structured_bug_reports: Some(
                        "Bug report generation unavailable; refer to raw logs.".to_string(),
                    ),
                    current_status: Some("Bug report generation degraded.".to_string()),
                    messages: vec!["Bug report generation produced no output.".to_string()],
                    errors: vec![format!("Bug report generation failed: {e}")],
                    ..Default::default()
                };
            }
        };

        self.artifacts.save("bug_reports.md", &reports).await;

        StageUpdate {
            structured_bug_reports: Some(reports),
            current_status: Some("Bug reports generated.".to_string()),
            messages: vec!["Generated bug reports.".to_string()],
            ..Default::default()
        }
    }
}

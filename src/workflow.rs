use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::artifacts::ArtifactStore;
use crate::engine::{Engine, RunOutcome, WorkflowState};
use crate::error::{AppError, Result};
use crate::server::AppState;
use crate::stages;

#[derive(Debug, Deserialize)]
pub struct RunRequest {
    pub requirements: String,
    #[serde(default)]
    pub user_stories: String,
    #[serde(default)]
    pub code_diffs: String,
    #[serde(default)]
    pub previous_test_results: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Completed,
    DidNotConverge,
    Failed,
}

/// Final report returned to the caller: status, executed-stage trace, and the
/// full workflow state (artifacts plus the message/error logs). Returned for
/// structural failures too, so the caller always sees the best-effort state.
#[derive(Debug, Serialize)]
pub struct RunResponse {
    pub status: RunStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub trace: Vec<String>,
    #[serde(flatten)]
    pub state: WorkflowState,
}

fn validate(request: &RunRequest) -> Result<()> {
    if request.requirements.trim().is_empty() {
        return Err(AppError::Validation(
            "'requirements' must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Run one STLC workflow to completion.
///
/// Rejects invalid input before any stage executes; everything past
/// validation produces a [`RunResponse`], whatever the outcome.
pub async fn run_workflow(state: &AppState, request: RunRequest) -> Result<RunResponse> {
    validate(&request)?;

    let initial = WorkflowState {
        requirements: request.requirements,
        user_stories: request.user_stories,
        code_diffs: request.code_diffs,
        previous_test_results: request.previous_test_results,
        current_status: "Initialized".to_string(),
        messages: vec!["STLC workflow started.".to_string()],
        ..Default::default()
    };

    let artifacts = Arc::new(ArtifactStore::for_run(&state.config.artifacts.base_dir));
    tracing::info!(artifact_dir = %artifacts.dir().display(), "Starting STLC workflow run");

    let graph = stages::standard_graph(
        Arc::clone(&state.llm),
        artifacts,
        &state.config.workflow.automation_framework,
    );
    let engine = Engine::new(
        graph,
        state.config.workflow.max_steps,
        state.config.workflow.max_regen_cycles,
    );

    let report = engine.run(initial).await;

    let (status, error) = match report.outcome {
        RunOutcome::Completed => (RunStatus::Completed, None),
        RunOutcome::DidNotConverge { cycles } => (
            RunStatus::DidNotConverge,
            Some(format!(
                "workflow did not converge: regeneration loop fired {cycles} times"
            )),
        ),
        RunOutcome::Failed { error } => (RunStatus::Failed, Some(error)),
    };

    Ok(RunResponse {
        status,
        error,
        trace: report.trace.iter().map(|s| s.to_string()).collect(),
        state: report.state,
    })
}

pub async fn handle_run(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RunRequest>,
) -> Response {
    match run_workflow(&state, request).await {
        Ok(response) => {
            let code = if response.status == RunStatus::Completed {
                StatusCode::OK
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (code, Json(response)).into_response()
        }
        Err(e @ AppError::Validation(_)) => {
            tracing::warn!(error = %e, "Rejected workflow input");
            (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Workflow run failed before the engine started");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, ArtifactConfig, GeminiConfig, ServerConfig, WorkflowConfig};
    use crate::llm::testing::{CannedCompletion, FailingCompletion};
    use crate::llm::TextCompletion;

    fn test_app_state(tmp: &tempfile::TempDir, llm: Arc<dyn TextCompletion>) -> AppState {
        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            gemini: GeminiConfig {
                api_key: "test-key".to_string(),
                model: "gemini-2.5-flash".to_string(),
                temperature: 0.3,
            },
            workflow: WorkflowConfig::default(),
            artifacts: ArtifactConfig {
                base_dir: tmp.path().to_path_buf(),
            },
        };
        AppState { config, llm }
    }

    fn request(requirements: &str, code_diffs: &str) -> RunRequest {
        RunRequest {
            requirements: requirements.to_string(),
            user_stories: String::new(),
            code_diffs: code_diffs.to_string(),
            previous_test_results: String::new(),
        }
    }

    fn canned() -> Arc<dyn TextCompletion> {
        Arc::new(CannedCompletion("generated output".to_string()))
    }

    #[tokio::test]
    async fn test_empty_requirements_rejected_before_engine_starts() {
        let tmp = tempfile::tempdir().unwrap();
        let state = test_app_state(&tmp, canned());

        let result = run_workflow(&state, request("   ", "")).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_scenario_clean_run_skips_impact_and_healing() {
        let tmp = tempfile::tempdir().unwrap();
        let state = test_app_state(&tmp, canned());

        let response = run_workflow(&state, request("Login page requirements", ""))
            .await
            .unwrap();

        assert_eq!(response.status, RunStatus::Completed);
        assert_eq!(
            response.trace,
            vec![
                "test_case_generation",
                "test_data_generation",
                "test_script_automation",
                "simulate_test_execution",
                "bug_report_generation",
                "test_summary_reporting",
                "release_readiness_advisory",
            ]
        );
        assert_eq!(
            response
                .trace
                .iter()
                .filter(|s| *s == "release_readiness_advisory")
                .count(),
            1
        );
        assert_eq!(
            response.state.change_impact_analysis.impact_level,
            crate::engine::ImpactLevel::None
        );
        assert_eq!(response.state.messages[0], "STLC workflow started.");
        assert!(response.state.errors.is_empty());
    }

    #[tokio::test]
    async fn test_scenario_injected_ui_failure_triggers_self_healing() {
        let tmp = tempfile::tempdir().unwrap();
        let state = test_app_state(&tmp, canned());

        let response = run_workflow(
            &state,
            request("Login flow, simulated_self_healing_needed", ""),
        )
        .await
        .unwrap();

        assert_eq!(response.status, RunStatus::Completed);
        let healing_pos = response
            .trace
            .iter()
            .position(|s| s == "self_healing_scripts")
            .expect("self-healing stage must run");
        let bug_report_pos = response
            .trace
            .iter()
            .position(|s| s == "bug_report_generation")
            .expect("bug report stage must run");
        assert!(healing_pos < bug_report_pos);
        assert!(!response.state.self_healed_scripts.is_empty());
    }

    #[tokio::test]
    async fn test_scenario_high_impact_diffs_loop_back_exactly_once() {
        let tmp = tempfile::tempdir().unwrap();
        let state = test_app_state(&tmp, canned());

        let response = run_workflow(
            &state,
            request("Checkout requirements", "ALTER TABLE orders; -- database migration"),
        )
        .await
        .unwrap();

        assert_eq!(response.status, RunStatus::Completed);
        let count = |name: &str| response.trace.iter().filter(|s| *s == name).count();
        assert_eq!(count("test_case_generation"), 2);
        assert_eq!(count("change_impact_analysis"), 2);
        assert_eq!(count("simulate_test_execution"), 1);
        assert_eq!(count("release_readiness_advisory"), 1);
        assert!(response.state.re_run_test_case_gen);
    }

    #[tokio::test]
    async fn test_failing_completion_degrades_but_completes() {
        let tmp = tempfile::tempdir().unwrap();
        let state = test_app_state(&tmp, Arc::new(FailingCompletion));

        let response = run_workflow(&state, request("Login page requirements", ""))
            .await
            .unwrap();

        assert_eq!(response.status, RunStatus::Completed);
        assert!(!response.state.errors.is_empty());
        assert!(response
            .state
            .errors
            .iter()
            .any(|e| e.contains("Test case generation failed")));
    }

    #[tokio::test]
    async fn test_messages_grow_monotonically_across_run() {
        let tmp = tempfile::tempdir().unwrap();
        let state = test_app_state(&tmp, canned());

        let response = run_workflow(&state, request("Login page requirements", ""))
            .await
            .unwrap();

        // One initialization message plus at least one per executed stage.
        assert!(response.state.messages.len() > response.trace.len());
        assert_eq!(response.state.messages[0], "STLC workflow started.");
    }
}

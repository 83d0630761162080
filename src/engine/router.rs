use crate::engine::graph::StageId;
use crate::engine::state::{ImpactLevel, WorkflowState};

/// Classification of a simulated execution log.
///
/// This is a keyword heuristic, not a parser. Ambiguous text matching more
/// than one category resolves in declaration order: a UI/API-related failure
/// wins over a general failure, which wins over a clean run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionSignal {
    /// Failures mentioning UI locators or API endpoints; candidates for
    /// script self-healing.
    UiOrApiFailure,
    /// Failures without UI/API markers; go straight to bug reporting.
    GeneralFailure,
    /// No failure markers at all.
    Clean,
}

pub fn classify_execution_log(log: &str) -> ExecutionSignal {
    let log = log.to_lowercase();

    let failed = log.contains("failure") || log.contains("error");
    let ui_or_api =
        log.contains("button") || log.contains("api endpoint") || log.contains("locator");

    if failed && ui_or_api {
        ExecutionSignal::UiOrApiFailure
    } else if failed {
        ExecutionSignal::GeneralFailure
    } else {
        ExecutionSignal::Clean
    }
}

/// After script automation: analyze change impact when diffs were supplied,
/// otherwise go straight to execution. Emptiness is the sole criterion.
pub fn after_script_automation(state: &WorkflowState) -> StageId {
    if state.code_diffs.is_empty() {
        tracing::info!("No code diffs, proceeding directly to simulated execution");
        StageId::SimulateTestExecution
    } else {
        tracing::info!("Code diffs present, proceeding to change impact analysis");
        StageId::ChangeImpactAnalysis
    }
}

/// After change impact analysis: loop back to test case generation when the
/// impact is high or the analysis asks for new test cases.
///
/// `re_run_test_case_gen` records that a regeneration cycle was already
/// granted this run; once set, the router proceeds to execution rather than
/// looping again. The engine's cycle guard is the hard bound behind this.
pub fn after_impact_analysis(state: &WorkflowState) -> StageId {
    let analysis = &state.change_impact_analysis;

    let wants_new_cases = analysis
        .recommendations
        .iter()
        .any(|r| r.to_lowercase().contains("new test cases"));

    if (analysis.impact_level == ImpactLevel::High || wants_new_cases)
        && !state.re_run_test_case_gen
    {
        tracing::info!(
            impact = %analysis.impact_level,
            "High impact or new functionality detected, re-running test case generation"
        );
        StageId::TestCaseGeneration
    } else {
        tracing::info!(
            impact = %analysis.impact_level,
            "Proceeding to simulated execution"
        );
        StageId::SimulateTestExecution
    }
}

/// After simulated execution: UI/API-related failures go to self-healing,
/// anything else goes to bug report generation.
pub fn after_execution(state: &WorkflowState) -> StageId {
    match classify_execution_log(&state.simulated_execution_results) {
        ExecutionSignal::UiOrApiFailure => {
            tracing::info!("UI/API-related failures detected, proceeding to self-healing");
            StageId::SelfHealingScripts
        }
        ExecutionSignal::GeneralFailure => {
            tracing::info!("General failures detected, proceeding to bug report generation");
            StageId::BugReportGeneration
        }
        ExecutionSignal::Clean => {
            tracing::info!("No failures detected, proceeding to bug report generation");
            StageId::BugReportGeneration
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::state::ChangeImpactAnalysis;

    fn state_with_execution_results(results: &str) -> WorkflowState {
        WorkflowState {
            simulated_execution_results: results.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_classifier_ui_failure_wins_over_general() {
        assert_eq!(
            classify_execution_log("FAILURE: Login button not found"),
            ExecutionSignal::UiOrApiFailure
        );
        assert_eq!(
            classify_execution_log("Error: locator timed out"),
            ExecutionSignal::UiOrApiFailure
        );
        assert_eq!(
            classify_execution_log("error: API endpoint /users not found"),
            ExecutionSignal::UiOrApiFailure
        );
    }

    #[test]
    fn test_classifier_general_failure_without_ui_markers() {
        assert_eq!(
            classify_execution_log("FAILURE: Test 'search' failed."),
            ExecutionSignal::GeneralFailure
        );
    }

    #[test]
    fn test_classifier_clean_run() {
        assert_eq!(
            classify_execution_log("All simulated tests passed successfully."),
            ExecutionSignal::Clean
        );
        // UI keywords without a failure marker are not a failure.
        assert_eq!(
            classify_execution_log("Clicked the button, all good."),
            ExecutionSignal::Clean
        );
    }

    #[test]
    fn test_after_script_automation_empty_diffs_skips_impact() {
        let state = WorkflowState::default();
        assert_eq!(after_script_automation(&state), StageId::SimulateTestExecution);
    }

    #[test]
    fn test_after_script_automation_with_diffs() {
        let state = WorkflowState {
            code_diffs: "diff --git a/db.rs b/db.rs".to_string(),
            ..Default::default()
        };
        assert_eq!(after_script_automation(&state), StageId::ChangeImpactAnalysis);
    }

    #[test]
    fn test_high_impact_loops_back() {
        let state = WorkflowState {
            change_impact_analysis: ChangeImpactAnalysis {
                impact_level: ImpactLevel::High,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(after_impact_analysis(&state), StageId::TestCaseGeneration);
    }

    #[test]
    fn test_new_test_case_recommendation_loops_back() {
        let state = WorkflowState {
            change_impact_analysis: ChangeImpactAnalysis {
                impact_level: ImpactLevel::Medium,
                recommendations: vec![
                    "New test cases and test data are needed for the new functionality."
                        .to_string(),
                ],
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(after_impact_analysis(&state), StageId::TestCaseGeneration);
    }

    #[test]
    fn test_low_and_medium_without_signal_proceed() {
        for level in [ImpactLevel::Low, ImpactLevel::Medium] {
            let state = WorkflowState {
                change_impact_analysis: ChangeImpactAnalysis {
                    impact_level: level,
                    recommendations: vec!["Focus on visual regression tests.".to_string()],
                    ..Default::default()
                },
                ..Default::default()
            };
            assert_eq!(after_impact_analysis(&state), StageId::SimulateTestExecution);
        }
    }

    #[test]
    fn test_granted_regeneration_suppresses_second_loop() {
        let state = WorkflowState {
            re_run_test_case_gen: true,
            change_impact_analysis: ChangeImpactAnalysis {
                impact_level: ImpactLevel::High,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(after_impact_analysis(&state), StageId::SimulateTestExecution);
    }

    #[test]
    fn test_failure_with_button_routes_to_self_healing() {
        let state =
            state_with_execution_results("FAILURE: Login button not found (was 'btn-login').");
        assert_eq!(after_execution(&state), StageId::SelfHealingScripts);
    }

    #[test]
    fn test_general_failure_routes_to_bug_reports() {
        let state = state_with_execution_results("FAILURE: Test 'checkout' failed.");
        assert_eq!(after_execution(&state), StageId::BugReportGeneration);
    }

    #[test]
    fn test_clean_run_routes_to_bug_reports() {
        let state = state_with_execution_results("All simulated tests passed successfully.");
        assert_eq!(after_execution(&state), StageId::BugReportGeneration);
    }
}

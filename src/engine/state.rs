use serde::{Deserialize, Serialize};

/// Severity of a change-impact analysis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactLevel {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl std::fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ImpactLevel::None => "none",
            ImpactLevel::Low => "low",
            ImpactLevel::Medium => "medium",
            ImpactLevel::High => "high",
        };
        f.write_str(s)
    }
}

/// Structured result of the change-impact analysis stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChangeImpactAnalysis {
    pub impact_level: ImpactLevel,
    pub affected_areas: Vec<String>,
    pub recommendations: Vec<String>,
}

/// The single shared record threaded through all workflow stages.
///
/// Stages never write this directly -- they return a [`StageUpdate`] and the
/// engine merges it via [`WorkflowState::apply`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct WorkflowState {
    // Caller-supplied inputs, set once at initialization.
    pub requirements: String,
    pub user_stories: String,
    /// Accumulates across regeneration cycles (append merge).
    pub code_diffs: String,
    /// Accumulates across regeneration cycles (append merge).
    pub previous_test_results: String,

    // Stage-produced artifacts (overwrite merge).
    pub test_cases: String,
    pub test_data: String,
    pub automated_scripts: String,
    pub self_healed_scripts: String,
    pub simulated_execution_results: String,
    pub bug_reports_raw_logs: String,
    pub structured_bug_reports: String,
    pub test_summary_report: String,
    pub change_impact_analysis: ChangeImpactAnalysis,
    pub release_readiness_advice: String,

    // Control flow.
    pub current_status: String,
    /// Append-only ordered log; entries are never reordered or truncated.
    pub messages: Vec<String>,
    /// Append-only ordered log; entries are never reordered or truncated.
    pub errors: Vec<String>,
    /// Set by the engine when the regeneration loop-back edge fires.
    pub re_run_test_case_gen: bool,
}

/// Partial-state update returned by a stage.
///
/// `Option` fields carry overwrite-merge semantics (`Some` replaces, `None`
/// leaves the field untouched) except `code_diffs` and
/// `previous_test_results`, which concatenate onto the existing value.
/// `messages` and `errors` always extend the state's logs.
#[derive(Debug, Default)]
pub struct StageUpdate {
    pub code_diffs: Option<String>,
    pub previous_test_results: Option<String>,

    pub test_cases: Option<String>,
    pub test_data: Option<String>,
    pub automated_scripts: Option<String>,
    pub self_healed_scripts: Option<String>,
    pub simulated_execution_results: Option<String>,
    pub bug_reports_raw_logs: Option<String>,
    pub structured_bug_reports: Option<String>,
    pub test_summary_report: Option<String>,
    pub change_impact_analysis: Option<ChangeImpactAnalysis>,
    pub release_readiness_advice: Option<String>,

    pub current_status: Option<String>,
    pub messages: Vec<String>,
    pub errors: Vec<String>,
}

impl WorkflowState {
    /// Merge a stage's partial update into the running state.
    ///
    /// This is the only mutation point during a run; the per-field policy
    /// (overwrite vs append) is fixed here, not at the call sites.
    pub fn apply(&mut self, update: StageUpdate) {
        // Append merge: repeated contributions accumulate.
        if let Some(diffs) = update.code_diffs {
            self.code_diffs.push_str(&diffs);
        }
        if let Some(results) = update.previous_test_results {
            self.previous_test_results.push_str(&results);
        }

        // Overwrite merge: each stage owns its artifact and fully replaces it.
        if let Some(v) = update.test_cases {
            self.test_cases = v;
        }
        if let Some(v) = update.test_data {
            self.test_data = v;
        }
        if let Some(v) = update.automated_scripts {
            self.automated_scripts = v;
        }
        if let Some(v) = update.self_healed_scripts {
            self.self_healed_scripts = v;
        }
        if let Some(v) = update.simulated_execution_results {
            self.simulated_execution_results = v;
        }
        if let Some(v) = update.bug_reports_raw_logs {
            self.bug_reports_raw_logs = v;
        }
        if let Some(v) = update.structured_bug_reports {
            self.structured_bug_reports = v;
        }
        if let Some(v) = update.test_summary_report {
            self.test_summary_report = v;
        }
        if let Some(v) = update.change_impact_analysis {
            self.change_impact_analysis = v;
        }
        if let Some(v) = update.release_readiness_advice {
            self.release_readiness_advice = v;
        }
        if let Some(v) = update.current_status {
            self.current_status = v;
        }

        // Append-only logs.
        self.messages.extend(update.messages);
        self.errors.extend(update.errors);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overwrite_merge_replaces_artifact() {
        let mut state = WorkflowState {
            test_cases: "old cases".to_string(),
            ..Default::default()
        };

        state.apply(StageUpdate {
            test_cases: Some("new cases".to_string()),
            ..Default::default()
        });

        assert_eq!(state.test_cases, "new cases");
    }

    #[test]
    fn test_none_leaves_field_untouched() {
        let mut state = WorkflowState {
            test_summary_report: "report".to_string(),
            ..Default::default()
        };

        state.apply(StageUpdate::default());

        assert_eq!(state.test_summary_report, "report");
    }

    #[test]
    fn test_append_merge_accumulates_diffs() {
        let mut state = WorkflowState {
            code_diffs: "diff one\n".to_string(),
            ..Default::default()
        };

        state.apply(StageUpdate {
            code_diffs: Some("diff two\n".to_string()),
            ..Default::default()
        });

        assert_eq!(state.code_diffs, "diff one\ndiff two\n");
    }

    #[test]
    fn test_logs_are_append_only_and_ordered() {
        let mut state = WorkflowState::default();

        state.apply(StageUpdate {
            messages: vec!["first".to_string()],
            errors: vec!["err a".to_string()],
            ..Default::default()
        });
        let len_after_first = state.messages.len();

        state.apply(StageUpdate {
            messages: vec!["second".to_string(), "third".to_string()],
            errors: vec![],
            ..Default::default()
        });

        assert!(state.messages.len() >= len_after_first);
        assert_eq!(state.messages, vec!["first", "second", "third"]);
        assert_eq!(state.errors, vec!["err a"]);
    }

    #[test]
    fn test_impact_level_defaults_to_none() {
        let state = WorkflowState::default();
        assert_eq!(state.change_impact_analysis.impact_level, ImpactLevel::None);
    }
}

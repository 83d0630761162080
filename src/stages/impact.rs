use async_trait::async_trait;

use crate::engine::graph::StageId;
use crate::engine::state::{ChangeImpactAnalysis, ImpactLevel, StageUpdate, WorkflowState};
use crate::stages::Stage;

/// Classifies supplied code diffs into a structured impact record.
///
/// Skipped in effect when no diffs were supplied: the update carries
/// `impact_level: none` rather than an error.
pub struct ChangeImpactAnalysisStage;

/// Keyword diff analyzer. A production system would use AST parsing or a
/// code dependency graph here.
fn analyze_code_diff(diff: &str) -> String {
    let diff = diff.to_lowercase();
    let summary = if diff.contains("database") || diff.contains("db") {
        "High impact: Database schema or ORM changes detected. This likely affects multiple \
         features and requires re-testing data integrity and CRUD operations extensively."
    } else if diff.contains("ui-button") || diff.contains("css") {
        "Low impact: UI styling or minor component changes. Primarily affects visual regression \
         tests and specific UI element interactions."
    } else if diff.contains("new_feature") {
        "New feature added. Requires new test cases and test data for the new functionality."
    } else {
        "Medium impact: General code changes. Review affected logical paths for test updates."
    };
    summary.to_string()
}

/// Parse the analyzer's free-text summary into the structured record the
/// routers consume. Defaults to medium when no severity marker is present.
fn parse_analysis(summary: &str) -> ChangeImpactAnalysis {
    let lowered = summary.to_lowercase();
    let mut analysis = ChangeImpactAnalysis {
        impact_level: ImpactLevel::Medium,
        ..Default::default()
    };

    if lowered.contains("high impact") {
        analysis.impact_level = ImpactLevel::High;
        analysis
            .recommendations
            .push("Extensive re-testing of affected functionalities is required.".to_string());
    } else if lowered.contains("low impact") {
        analysis.impact_level = ImpactLevel::Low;
        analysis
            .recommendations
            .push("Focus on visual regression or specific UI interaction tests.".to_string());
    }

    if lowered.contains("new feature") {
        analysis.recommendations.push(
            "New test cases and test data are needed for the new functionality.".to_string(),
        );
        // New functionality always warrants the full regeneration path.
        analysis.impact_level = ImpactLevel::High;
    }

    if lowered.contains("database") {
        analysis.affected_areas.push("database and persistence".to_string());
    }
    if lowered.contains("ui") {
        analysis.affected_areas.push("ui components".to_string());
    }

    analysis.recommendations.push(format!("Analyzer summary: {summary}"));
    analysis
}

#[async_trait]
impl Stage for ChangeImpactAnalysisStage {
    fn id(&self) -> StageId {
        StageId::ChangeImpactAnalysis
    }

    async fn run(&self, state: &WorkflowState) -> StageUpdate {
        if state.code_diffs.is_empty() {
            return StageUpdate {
                change_impact_analysis: Some(ChangeImpactAnalysis::default()),
                current_status: Some("No code diffs for impact analysis.".to_string()),
                messages: vec![
                    "Skipping change impact analysis as no diffs were provided.".to_string(),
                ],
                ..Default::default()
            };
        }

        let summary = analyze_code_diff(&state.code_diffs);
        let analysis = parse_analysis(&summary);

        tracing::info!(impact = %analysis.impact_level, "Change impact analysis completed");

        let message = format!(
            "Impact: {}. Recommendations: {}",
            analysis.impact_level,
            analysis.recommendations.join(", ")
        );

        StageUpdate {
            change_impact_analysis: Some(analysis),
            current_status: Some("Change impact analysis completed.".to_string()),
            messages: vec![message],
            ..Default::default()
        }
    }
}

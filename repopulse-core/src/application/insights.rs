// repopulse-core/src/application/insights.rs

use crate::application::ports::agent::InsightAgent;
use crate::domain::metrics::derived::DerivedMetrics;
use crate::domain::metrics::set::MetricSet;
use crate::domain::rules::warning::Warning;
use serde::{Deserialize, Serialize};

/// Narrative output of the language-model collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InsightSet {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub risks: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
}

/// Everything the agent is allowed to see: the same facts the report
/// renders, nothing more.
#[derive(Debug, Clone, Serialize)]
pub struct ReportContext {
    pub repo_name: String,
    pub metrics: MetricSet,
    pub derived: DerivedMetrics,
    pub warnings: Vec<Warning>,
}

/// Insight generation never fails a report run: any agent error is logged
/// and the report simply ships without the insight section.
pub async fn generate_insights(
    agent: &dyn InsightAgent,
    context: &ReportContext,
) -> Option<InsightSet> {
    match agent.generate(context).await {
        Ok(insights) => Some(insights),
        Err(e) => {
            tracing::warn!(error = %e, "Insight generation failed, continuing without insights");
            None
        }
    }
}

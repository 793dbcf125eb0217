// repopulse-core/src/application/render.rs

use chrono::Utc;
use serde::Serialize;

use crate::application::insights::InsightSet;
use crate::application::ports::renderer::TemplateEngine;
use crate::domain::metrics::derived::{DerivedMetrics, LifetimeMetrics, RecentMetrics};
use crate::domain::metrics::set::MetricSet;
use crate::domain::rules::warning::Warning;
use crate::error::RepoPulseError;
use crate::infrastructure::error::InfrastructureError;

// --- DTOs (Data Transfer Objects) ---
// These structures define exactly what the rendered report exposes.

#[derive(Debug, Clone, Serialize)]
pub struct ReportArtifact {
    pub generated_at: String,
    pub repo_name: String,
    pub current_branch: String,
    pub raw_metrics: Vec<MetricRow>,
    pub lifetime: LifetimeMetrics,
    pub recent: RecentMetrics,
    pub warnings: Vec<Warning>,
    pub insights: Option<InsightSet>,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricRow {
    pub name: String,
    pub value: String,
}

impl ReportArtifact {
    pub fn build(
        raw: &MetricSet,
        derived: &DerivedMetrics,
        warnings: Vec<Warning>,
        insights: Option<InsightSet>,
    ) -> Self {
        let raw_metrics = raw
            .iter()
            .map(|(name, value)| MetricRow {
                name: name.clone(),
                value: value.to_string(),
            })
            .collect();

        Self {
            generated_at: Utc::now().to_rfc3339(),
            repo_name: raw
                .text("repo_name")
                .unwrap_or("unknown")
                .to_string(),
            current_branch: raw
                .text("current_branch")
                .unwrap_or("unknown")
                .to_string(),
            raw_metrics,
            lifetime: derived.lifetime.clone(),
            recent: derived.recent.clone(),
            warnings,
            insights,
            errors: raw.errors().to_vec(),
        }
    }
}

// --- EMBEDDED MARKDOWN TEMPLATE ---
const REPORT_TEMPLATE: &str = r#"# Repository Health Report: {{ repo_name }}

- **Branch:** {{ current_branch }}
- **Generated:** {{ generated_at }}

## Collected Metrics

| Metric | Value |
|--------|-------|
{% for row in raw_metrics -%}
| {{ row.name }} | {{ row.value }} |
{% endfor %}
## Lifetime Metrics

| Metric | Value |
|--------|-------|
| commits_per_author | {{ lifetime.commits_per_author }} |
| merge_commit_ratio | {{ lifetime.merge_commit_ratio }} |
| repo_age_days | {{ lifetime.repo_age_days }} |

## Recent Activity (7 days)

| Metric | Value |
|--------|-------|
| commit_velocity | {{ recent.commit_velocity }} |
| author_participation_rate | {{ recent.author_participation_rate }} |
| change_density | {{ recent.change_density }} |

## Warnings

{% if warnings -%}
{% for warning in warnings -%}
### {{ warning.severity|severity_icon }} {{ warning.title }}

- **Severity:** {{ warning.severity }}
- **Rule:** `{{ warning.id }}`

{{ warning.description }}

{% for action in warning.actions -%}
- [{{ action.priority|upper }}] {{ action.description }}
{% endfor %}
{% endfor -%}
{% else -%}
No warnings triggered.
{% endif -%}
{% if insights %}
## Insights

{{ insights.summary }}
{% if insights.risks %}
**Risks**

{% for risk in insights.risks -%}
- {{ risk }}
{% endfor %}
{%- endif %}
{% if insights.improvements %}
**Suggested Improvements**

{% for improvement in insights.improvements -%}
- {{ improvement }}
{% endfor %}
{%- endif %}
{%- endif %}
{% if errors %}
## Collection Errors

{% for error in errors -%}
- {{ error }}
{% endfor %}
{%- endif %}
"#;

// --- RENDERER SERVICE ---

pub struct MarkdownReporter;

impl MarkdownReporter {
    pub fn render(
        artifact: &ReportArtifact,
        engine: &dyn TemplateEngine,
    ) -> Result<String, RepoPulseError> {
        let context = serde_json::to_value(artifact)
            .map_err(|e| RepoPulseError::Infrastructure(InfrastructureError::JsonError(e)))?;
        engine.render(REPORT_TEMPLATE, &context)
    }
}

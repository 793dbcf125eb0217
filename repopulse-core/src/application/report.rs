// repopulse-core/src/application/report.rs

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::RepoPulseError;

// Application Services
use crate::application::insights::{InsightSet, ReportContext, generate_insights};
use crate::application::ports::agent::InsightAgent;
use crate::application::ports::renderer::TemplateEngine;
use crate::application::render::{MarkdownReporter, ReportArtifact};

// Domain
use crate::domain::error::DomainError;
use crate::domain::metrics::derived::DerivedMetrics;
use crate::domain::metrics::set::MetricSet;
use crate::domain::rules::catalog::RuleCatalog;
use crate::domain::rules::evaluator::RuleEvaluator;
use crate::domain::rules::warning::Warning;

// Infrastructure
use crate::infrastructure::config::report::ReportConfig;
use crate::infrastructure::collector::GitCollector;

// Ports
use crate::ports::runner::CommandRunner;

#[derive(Debug, serde::Serialize)]
pub struct ReportOutcome {
    pub repo_name: String,
    pub metrics_collected: usize,
    pub warnings: Vec<Warning>,
    pub collection_errors: Vec<String>,
    pub insights_included: bool,
    pub markdown_path: PathBuf,
    pub json_path: PathBuf,
}

/// The report orchestrator: collect -> derive -> evaluate -> insights ->
/// render -> persist. Strictly sequential; the only hard failures are the
/// precondition check and artifact IO.
pub async fn run_report(
    runner: &dyn CommandRunner,
    agent: Option<&dyn InsightAgent>,
    engine: &dyn TemplateEngine,
    repo_dir: &Path,
    config: &ReportConfig,
    catalog: &RuleCatalog,
) -> Result<ReportOutcome, RepoPulseError> {
    // 0. PRECONDITION
    if !repo_dir.join(".git").exists() {
        return Err(RepoPulseError::Domain(DomainError::NotARepository(
            repo_dir.display().to_string(),
        )));
    }

    let target_dir = repo_dir.join(&config.target_path);
    if !target_dir.exists() {
        fs::create_dir_all(&target_dir)?;
    }

    // 1. COLLECTION (Infra -> MetricSet)
    println!("🔍 Collecting Git repository data...");
    let collector = GitCollector::new(
        runner,
        Duration::from_secs(config.collector.command_timeout_secs),
    );
    let raw = collector.collect(repo_dir).await;
    println!(
        "   📈 Collected {} metrics ({} errors)",
        raw.len(),
        raw.errors().len()
    );

    // 2. DERIVED METRICS (Domain pure logic)
    println!("🧮 Calculating derived metrics...");
    let derived = DerivedMetrics::compute(&raw);
    let mut evaluation = raw.clone();
    derived.apply_to(&mut evaluation);

    // 3. RULE EVALUATION (Domain pure logic)
    println!("⚠️  Evaluating warning rules...");
    let warnings = RuleEvaluator::evaluate(catalog.rules(), &evaluation);
    println!(
        "   🚨 {} of {} rules triggered",
        warnings.len(),
        catalog.len()
    );

    // 4. INSIGHTS (optional collaborator, soft-fail)
    let insights: Option<InsightSet> = match agent {
        Some(agent) => {
            println!("🤖 Generating insights...");
            let context = ReportContext {
                repo_name: repo_name_of(&raw),
                metrics: evaluation.clone(),
                derived: derived.clone(),
                warnings: warnings.clone(),
            };
            generate_insights(agent, &context).await
        }
        None => None,
    };

    // 5. RENDERING & PERSISTENCE
    println!("📝 Formatting report...");
    let artifact = ReportArtifact::build(&raw, &derived, warnings.clone(), insights);
    let markdown = MarkdownReporter::render(&artifact, engine)?;

    let markdown_path = target_dir.join("report.md");
    crate::infrastructure::fs::atomic_write(&markdown_path, &markdown)?;

    let json_path = target_dir.join("report.json");
    save_json(&json_path, &artifact)?;

    Ok(ReportOutcome {
        repo_name: artifact.repo_name.clone(),
        metrics_collected: raw.len(),
        warnings,
        collection_errors: raw.errors().to_vec(),
        insights_included: artifact.insights.is_some(),
        markdown_path,
        json_path,
    })
}

fn repo_name_of(raw: &MetricSet) -> String {
    raw.text("repo_name").unwrap_or("unknown").to_string()
}

fn save_json<T: serde::Serialize>(path: &Path, data: &T) -> Result<(), RepoPulseError> {
    let content = serde_json::to_string_pretty(data)
        .map_err(|e| RepoPulseError::InternalError(format!("Serialization: {}", e)))?;
    crate::infrastructure::fs::atomic_write(path, content)?;
    Ok(())
}

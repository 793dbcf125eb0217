// repopulse/src/commands/report.rs
//
// USE CASE: Run the full analysis and write the report artifacts.

use std::path::PathBuf;

use anyhow::Context;
use repopulse_core::application::ports::agent::InsightAgent;
use repopulse_core::application::run_report;
use repopulse_core::infrastructure::adapters::openai::OpenAiAgent;
use repopulse_core::infrastructure::adapters::shell::ShellRunner;
use repopulse_core::infrastructure::config::{load_report_config, load_rule_catalog};
use repopulse_core::infrastructure::template::ReportTemplater;

pub async fn execute(repo_dir: PathBuf, no_insights: bool) -> anyhow::Result<()> {
    let start = std::time::Instant::now();

    // A. Load the Config (Infra)
    println!("⚙️  Loading configuration...");
    let config = load_report_config(&repo_dir)
        .with_context(|| format!("Failed to load configuration from {:?}", repo_dir))?;
    let catalog = load_rule_catalog(&repo_dir, &config)
        .with_context(|| "Failed to load the warning rule catalog")?;
    println!("   Project: {} ({} rules)", config.name, catalog.len());

    // B. Instantiate the Adapters
    let runner = ShellRunner::new();
    let templater = ReportTemplater::new();

    let agent: Option<OpenAiAgent> = if no_insights || !config.llm.enabled {
        None
    } else {
        match std::env::var("OPENAI_API_KEY") {
            Ok(key) if !key.is_empty() => {
                println!("   Insight model: {}", config.llm.model);
                Some(OpenAiAgent::new(key, &config.llm))
            }
            _ => {
                println!("   🔕 OPENAI_API_KEY not set, skipping insights");
                None
            }
        }
    };

    // C. Run the Pipeline (Application Layer)
    let result = run_report(
        &runner,
        agent.as_ref().map(|a| a as &dyn InsightAgent),
        &templater,
        &repo_dir,
        &config,
        &catalog,
    )
    .await;

    match result {
        Ok(outcome) => {
            println!("\n✨ SUCCESS! Report finished in {:.2?}", start.elapsed());
            println!("📁 Markdown: {}", outcome.markdown_path.display());
            println!("📁 JSON:     {}", outcome.json_path.display());

            println!("\n📊 Summary:");
            println!("   • Repository: {}", outcome.repo_name);
            println!("   • Metrics collected: {}", outcome.metrics_collected);
            println!("   • Collection errors: {}", outcome.collection_errors.len());
            println!("   • Warnings: {}", outcome.warnings.len());

            if !outcome.warnings.is_empty() {
                println!("\n⚠️  Warnings Found:");
                for warning in &outcome.warnings {
                    println!(
                        "   {} {}: {}",
                        warning.severity.icon(),
                        warning.severity.as_str().to_uppercase(),
                        warning.title
                    );
                }
            }
        }
        Err(e) => {
            eprintln!("\n💥 CRITICAL REPORT ERROR: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

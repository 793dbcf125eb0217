// repopulse/src/commands/metrics.rs
//
// USE CASE: Collect raw + derived metrics and print them, without the
// rule evaluation or report rendering stages.

use comfy_table::Table;
use std::path::PathBuf;
use std::time::Duration;

use repopulse_core::domain::metrics::DerivedMetrics;
use repopulse_core::infrastructure::adapters::shell::ShellRunner;
use repopulse_core::infrastructure::collector::GitCollector;
use repopulse_core::infrastructure::config::load_report_config;

pub async fn execute(repo_dir: PathBuf, json: bool) -> anyhow::Result<()> {
    if !repo_dir.join(".git").exists() {
        anyhow::bail!(
            "❌ '{}' is not a Git repository\n👉 Point --repo-dir at a directory containing .git",
            repo_dir.display()
        );
    }

    let config = load_report_config(&repo_dir)?;
    let runner = ShellRunner::new();
    let collector = GitCollector::new(
        &runner,
        Duration::from_secs(config.collector.command_timeout_secs),
    );

    let raw = collector.collect(&repo_dir).await;
    let derived = DerivedMetrics::compute(&raw);

    if json {
        let payload = serde_json::json!({ "raw": raw, "derived": derived });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("\n🧮 Collected Metrics");
    let mut table = Table::new();
    table.set_header(vec!["Metric", "Value"]);
    for (name, value) in raw.iter() {
        table.add_row(vec![name.clone(), value.to_string()]);
    }
    println!("{table}");

    println!("\n📐 Derived Metrics");
    let mut derived_table = Table::new();
    derived_table.set_header(vec!["Metric", "Value"]);
    derived_table.add_row(vec![
        "commits_per_author".to_string(),
        derived.lifetime.commits_per_author.to_string(),
    ]);
    derived_table.add_row(vec![
        "merge_commit_ratio".to_string(),
        derived.lifetime.merge_commit_ratio.to_string(),
    ]);
    derived_table.add_row(vec![
        "repo_age_days".to_string(),
        derived.lifetime.repo_age_days.to_string(),
    ]);
    derived_table.add_row(vec![
        "commit_velocity".to_string(),
        derived.recent.commit_velocity.to_string(),
    ]);
    derived_table.add_row(vec![
        "author_participation_rate".to_string(),
        derived.recent.author_participation_rate.to_string(),
    ]);
    derived_table.add_row(vec![
        "change_density".to_string(),
        derived.recent.change_density.to_string(),
    ]);
    println!("{derived_table}");

    if raw.has_errors() {
        println!("\n⚠️  Collection errors:");
        for error in raw.errors() {
            println!("   • {}", error);
        }
    }

    Ok(())
}

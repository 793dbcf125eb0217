// repopulse/src/commands/rules.rs
//
// USE CASE: Show the effective rule catalog (built-ins + rules.yml).

use comfy_table::Table;
use std::path::PathBuf;

use repopulse_core::infrastructure::config::{load_report_config, load_rule_catalog};

pub fn execute(repo_dir: PathBuf) -> anyhow::Result<()> {
    let config = load_report_config(&repo_dir)?;
    let catalog = load_rule_catalog(&repo_dir, &config)?;

    println!("\n📏 Effective warning rules ({})\n", catalog.len());

    let mut table = Table::new();
    table.set_header(vec!["Id", "Severity", "Conditions", "Title"]);
    for rule in catalog.rules() {
        table.add_row(vec![
            rule.id.clone(),
            rule.severity.to_string(),
            rule.conditions.len().to_string(),
            rule.title.clone(),
        ]);
    }
    println!("{table}");

    Ok(())
}

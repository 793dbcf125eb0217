// repopulse-core/src/infrastructure/config/report.rs

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use validator::Validate;

use crate::domain::rules::catalog::RuleCatalog;
use crate::domain::rules::rule::WarningRule;
use crate::error::RepoPulseError;
use crate::infrastructure::error::InfrastructureError;

#[derive(Debug, Deserialize, Serialize, Validate, Clone)]
pub struct ReportConfig {
    #[serde(default = "default_project_name")]
    pub name: String,

    /// Directory (relative to the repo) where report artifacts land.
    #[serde(default = "default_target_path")]
    pub target_path: String,

    /// Folders searched for satellite configuration (rules.yml).
    #[serde(default = "default_config_paths")]
    pub config_paths: Vec<String>,

    #[serde(default)]
    #[validate(nested)]
    pub collector: CollectorConfig,

    #[serde(default)]
    #[validate(nested)]
    pub llm: LlmConfig,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            name: default_project_name(),
            target_path: default_target_path(),
            config_paths: default_config_paths(),
            collector: CollectorConfig::default(),
            llm: LlmConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Validate, Clone)]
pub struct CollectorConfig {
    /// Per-command wall-clock timeout.
    #[serde(default = "default_command_timeout")]
    #[validate(range(min = 1))]
    pub command_timeout_secs: u64,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            command_timeout_secs: default_command_timeout(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Validate, Clone)]
pub struct LlmConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_model")]
    pub model: String,

    #[validate(range(min = 0.0, max = 2.0))]
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default = "default_agent_timeout")]
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model: default_model(),
            temperature: default_temperature(),
            timeout_secs: default_agent_timeout(),
        }
    }
}

fn default_project_name() -> String {
    "repository".to_string()
}

fn default_target_path() -> String {
    "target".to_string()
}

fn default_config_paths() -> Vec<String> {
    vec!["config".to_string()]
}

fn default_command_timeout() -> u64 {
    60
}

fn default_true() -> bool {
    true
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f64 {
    0.2
}

fn default_agent_timeout() -> u64 {
    120
}

// --- LOADER ---

#[instrument(skip(repo_dir))]
pub fn load_report_config(repo_dir: &Path) -> Result<ReportConfig, InfrastructureError> {
    let mut config = match find_config_file(repo_dir) {
        Some(path) => {
            info!(path = ?path, "Loading report configuration");
            let content = fs::read_to_string(&path)?;
            serde_yaml::from_str(&content)?
        }
        None => {
            // The tool points at arbitrary repositories, so no config file
            // is the common case, not an error.
            info!("No repopulse.yaml found, using defaults");
            ReportConfig::default()
        }
    };

    apply_env_overrides(&mut config);

    config
        .validate()
        .map_err(|e| InfrastructureError::ConfigError(e.to_string()))?;

    Ok(config)
}

fn find_config_file(root: &Path) -> Option<PathBuf> {
    let candidates = ["repopulse.yaml", "repopulse.yml"];
    candidates
        .iter()
        .map(|filename| root.join(filename))
        .find(|p| p.exists())
}

// Layering pattern: REPOPULSE_TARGET_PATH=/tmp/out repopulse report
fn apply_env_overrides(config: &mut ReportConfig) {
    apply_overrides_from(config, |key| std::env::var(key).ok());
}

fn apply_overrides_from(config: &mut ReportConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(val) = lookup("REPOPULSE_TARGET_PATH") {
        info!(old = ?config.target_path, new = ?val, "Overriding target path via ENV");
        config.target_path = val;
    }
    if let Some(val) = lookup("REPOPULSE_MODEL") {
        info!(old = ?config.llm.model, new = ?val, "Overriding LLM model via ENV");
        config.llm.model = val;
    }
}

/// Built-in rules plus any satellite rules.yml, in that order.
pub fn load_rule_catalog(
    repo_dir: &Path,
    config: &ReportConfig,
) -> Result<RuleCatalog, RepoPulseError> {
    let mut catalog = RuleCatalog::builtin()?;

    if let Some(config_folder) = config.config_paths.first() {
        let rules_path = repo_dir.join(config_folder).join("rules.yml");
        if rules_path.exists() {
            #[derive(Deserialize)]
            struct RulesWrapper {
                rules: Vec<WarningRule>,
            }

            let content = fs::read_to_string(&rules_path)?;
            let wrapper: RulesWrapper =
                serde_yaml::from_str(&content).map_err(InfrastructureError::YamlError)?;
            catalog.extend(wrapper.rules)?;
            info!("  📏 Custom warning rules loaded");
        }
    }

    Ok(catalog)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_config_file() -> Result<()> {
        let dir = tempdir()?;
        let config = load_report_config(dir.path())?;

        assert_eq!(config.target_path, "target");
        assert_eq!(config.collector.command_timeout_secs, 60);
        assert!(config.llm.enabled);
        Ok(())
    }

    #[test]
    fn test_config_file_is_loaded() -> Result<()> {
        let dir = tempdir()?;
        fs::write(
            dir.path().join("repopulse.yaml"),
            r#"
name: acme-api
target_path: .repopulse
collector:
  command_timeout_secs: 10
llm:
  enabled: false
  model: gpt-4o
"#,
        )?;

        let config = load_report_config(dir.path())?;
        assert_eq!(config.name, "acme-api");
        assert_eq!(config.target_path, ".repopulse");
        assert_eq!(config.collector.command_timeout_secs, 10);
        assert!(!config.llm.enabled);
        assert_eq!(config.llm.model, "gpt-4o");
        Ok(())
    }

    #[test]
    fn test_invalid_temperature_is_rejected() -> Result<()> {
        let dir = tempdir()?;
        fs::write(
            dir.path().join("repopulse.yaml"),
            "llm:\n  temperature: 3.5\n",
        )?;

        let result = load_report_config(dir.path());
        assert!(matches!(result, Err(InfrastructureError::ConfigError(_))));
        Ok(())
    }

    #[test]
    fn test_env_overrides_apply_last() {
        let mut config = ReportConfig::default();
        let env = HashMap::from([
            ("REPOPULSE_TARGET_PATH", "/tmp/reports"),
            ("REPOPULSE_MODEL", "gpt-5"),
        ]);

        apply_overrides_from(&mut config, |key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.target_path, "/tmp/reports");
        assert_eq!(config.llm.model, "gpt-5");
    }

    #[test]
    fn test_satellite_rules_extend_the_builtins() -> Result<()> {
        let dir = tempdir()?;
        let config_dir = dir.path().join("config");
        fs::create_dir(&config_dir)?;
        fs::write(
            config_dir.join("rules.yml"),
            r#"
rules:
  - id: too_many_branches
    severity: low
    title: Branch count is high
    description: Many local branches suggest unfinished work
    conditions:
      - type: greater_than
        field: local_branches
        value: 50
    actions:
      - priority: low
        description: Prune merged branches
"#,
        )?;

        let config = ReportConfig::default();
        let catalog = load_rule_catalog(dir.path(), &config)?;

        assert_eq!(catalog.len(), 8);
        // Custom rules come after the built-ins, preserving evaluation order
        assert_eq!(catalog.rules()[7].id, "too_many_branches");
        Ok(())
    }

    #[test]
    fn test_satellite_duplicate_id_is_rejected() -> Result<()> {
        let dir = tempdir()?;
        let config_dir = dir.path().join("config");
        fs::create_dir(&config_dir)?;
        fs::write(
            config_dir.join("rules.yml"),
            r#"
rules:
  - id: single_contributor
    severity: low
    title: Duplicate of a built-in
    description: Must be rejected
    conditions:
      - type: equals
        field: total_authors
        value: 1
"#,
        )?;

        let config = ReportConfig::default();
        let result = load_rule_catalog(dir.path(), &config);
        assert!(result.is_err());
        Ok(())
    }
}

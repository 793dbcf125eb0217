// repopulse-core/src/domain/rules/catalog.rs

use crate::domain::error::DomainError;
use crate::domain::rules::rule::WarningRule;
use std::collections::HashSet;

/// The seven built-in rules, compiled into the binary. Adding a rule is a
/// data change here or in a user rules.yml, never an evaluator change.
const BUILTIN_RULES: &str = include_str!("builtin_rules.yml");

/// An ordered, id-unique set of warning rules.
#[derive(Debug, Clone)]
pub struct RuleCatalog {
    rules: Vec<WarningRule>,
}

impl RuleCatalog {
    /// Loads the embedded built-in catalog.
    pub fn builtin() -> Result<Self, DomainError> {
        let rules: Vec<WarningRule> = serde_yaml::from_str(BUILTIN_RULES)
            .map_err(|e| DomainError::InvalidRuleCatalog(format!("built-in rules: {}", e)))?;
        Self::from_rules(rules)
    }

    pub fn from_rules(rules: Vec<WarningRule>) -> Result<Self, DomainError> {
        let mut catalog = Self { rules: Vec::new() };
        catalog.extend(rules)?;
        Ok(catalog)
    }

    /// Appends rules after the existing ones, keeping evaluation order and
    /// rejecting duplicate ids.
    pub fn extend(&mut self, extra: Vec<WarningRule>) -> Result<(), DomainError> {
        let mut seen: HashSet<String> = self.rules.iter().map(|r| r.id.clone()).collect();
        for rule in extra {
            if !seen.insert(rule.id.clone()) {
                return Err(DomainError::InvalidRuleCatalog(format!(
                    "duplicate rule id '{}'",
                    rule.id
                )));
            }
            self.rules.push(rule);
        }
        Ok(())
    }

    pub fn rules(&self) -> &[WarningRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::rules::severity::Severity;
    use anyhow::Result;

    #[test]
    fn test_builtin_catalog_loads_in_fixed_order() -> Result<()> {
        let catalog = RuleCatalog::builtin()?;
        let ids: Vec<&str> = catalog.rules().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "bash_tool_unavailable",
                "incomplete_metrics",
                "low_commit_activity",
                "single_contributor",
                "high_commits_per_author",
                "no_merge_commits",
                "high_change_density",
            ]
        );
        Ok(())
    }

    #[test]
    fn test_builtin_severities_match_the_rule_table() -> Result<()> {
        let catalog = RuleCatalog::builtin()?;
        let severity_of = |id: &str| {
            catalog
                .rules()
                .iter()
                .find(|r| r.id == id)
                .map(|r| r.severity)
        };

        assert_eq!(severity_of("bash_tool_unavailable"), Some(Severity::High));
        assert_eq!(severity_of("single_contributor"), Some(Severity::High));
        assert_eq!(severity_of("incomplete_metrics"), Some(Severity::Medium));
        assert_eq!(severity_of("low_commit_activity"), Some(Severity::Medium));
        assert_eq!(severity_of("high_change_density"), Some(Severity::Medium));
        assert_eq!(severity_of("high_commits_per_author"), Some(Severity::Low));
        assert_eq!(severity_of("no_merge_commits"), Some(Severity::Low));
        Ok(())
    }

    #[test]
    fn test_every_builtin_rule_has_conditions_and_actions() -> Result<()> {
        for rule in RuleCatalog::builtin()?.rules() {
            assert!(!rule.conditions.is_empty(), "rule {} has no conditions", rule.id);
            assert!(!rule.actions.is_empty(), "rule {} has no actions", rule.id);
        }
        Ok(())
    }

    #[test]
    fn test_duplicate_ids_are_rejected() -> Result<()> {
        let mut catalog = RuleCatalog::builtin()?;
        let clone_of_first = catalog.rules()[0].clone();
        let result = catalog.extend(vec![clone_of_first]);
        assert!(matches!(result, Err(DomainError::InvalidRuleCatalog(_))));
        Ok(())
    }
}

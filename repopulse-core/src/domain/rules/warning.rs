// repopulse-core/src/domain/rules/warning.rs

use crate::domain::rules::rule::{RecommendedAction, WarningRule};
use crate::domain::rules::severity::Severity;
use serde::{Deserialize, Serialize};

/// A triggered rule, projected for reporting.
///
/// No independent lifecycle: created fresh per evaluation, discarded after
/// the report is rendered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warning {
    pub id: String,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub actions: Vec<RecommendedAction>,
}

impl Warning {
    pub fn from_rule(rule: &WarningRule) -> Self {
        Self {
            id: rule.id.clone(),
            severity: rule.severity,
            title: rule.title.clone(),
            description: rule.description.clone(),
            actions: rule.actions.clone(),
        }
    }
}

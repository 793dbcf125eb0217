// repopulse-core/src/domain/rules/rule.rs

use crate::domain::rules::severity::{ActionPriority, Severity};
use serde::{Deserialize, Serialize};

/// A named, severity-tagged predicate over a MetricSet plus recommended
/// actions. Rules are data, not code: the built-in catalog is an embedded
/// YAML document and users can append their own via rules.yml.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WarningRule {
    pub id: String,
    pub severity: Severity,
    pub title: String,
    pub description: String,

    // A rule fires iff ALL of its conditions hold; no conditions, no fire.
    #[serde(default)]
    pub conditions: Vec<Condition>,

    #[serde(default)]
    pub actions: Vec<RecommendedAction>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RecommendedAction {
    pub priority: ActionPriority,
    pub description: String,
}

/// One predicate over the metric set.
///
/// Numeric comparisons evaluate to false (not an error) when the field is
/// absent, missing or non-numeric. `any_of` is the single combinator: it
/// holds when at least one inner condition holds, which keeps OR-triggers
/// expressible while the rule itself stays a pure conjunction.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    Equals { field: String, value: f64 },
    GreaterThan { field: String, value: f64 },
    LessThanOrEqual { field: String, value: f64 },
    HasErrors { field: String },
    Empty { field: String },
    HasNullValues { field: String },
    AnyOf { conditions: Vec<Condition> },

    // Forward compatibility: a condition type this binary does not know
    // never matches instead of failing the whole catalog parse.
    #[serde(other)]
    Unknown,
}

// repopulse-core/src/domain/rules/evaluator.rs

use crate::domain::metrics::set::{COLLECTION_ERRORS_FIELD, MetricSet, RAW_METRICS_FIELD};
use crate::domain::rules::rule::{Condition, WarningRule};
use crate::domain::rules::warning::Warning;

/// The generic rule interpreter.
///
/// Pure function of its inputs: same rules + same MetricSet always yield
/// the same warnings, in rule-definition order, without deduplication.
/// Nothing in here can fail a report run; a condition that cannot be
/// evaluated simply does not match.
pub struct RuleEvaluator;

impl RuleEvaluator {
    pub fn evaluate(rules: &[WarningRule], metrics: &MetricSet) -> Vec<Warning> {
        rules
            .iter()
            .filter(|rule| Self::fires(rule, metrics))
            .map(Warning::from_rule)
            .collect()
    }

    /// ALL conditions must hold; a rule with zero conditions never fires.
    fn fires(rule: &WarningRule, metrics: &MetricSet) -> bool {
        !rule.conditions.is_empty()
            && rule
                .conditions
                .iter()
                .all(|condition| Self::matches(condition, metrics))
    }

    fn matches(condition: &Condition, metrics: &MetricSet) -> bool {
        match condition {
            Condition::Equals { field, value } => {
                metrics.numeric(field).is_some_and(|v| v == *value)
            }
            Condition::GreaterThan { field, value } => {
                metrics.numeric(field).is_some_and(|v| v > *value)
            }
            Condition::LessThanOrEqual { field, value } => {
                metrics.numeric(field).is_some_and(|v| v <= *value)
            }
            Condition::HasErrors { field } => {
                field == COLLECTION_ERRORS_FIELD && metrics.has_errors()
            }
            Condition::Empty { field } => field == RAW_METRICS_FIELD && metrics.is_empty(),
            Condition::HasNullValues { field } => {
                field == RAW_METRICS_FIELD && metrics.has_missing_values()
            }
            Condition::AnyOf { conditions } => conditions
                .iter()
                .any(|condition| Self::matches(condition, metrics)),
            Condition::Unknown => false,
        }
    }
}

// repopulse-core/src/domain/metrics/set.rs

use crate::domain::metrics::value::MetricValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field name conditions use to reference the collection error list.
pub const COLLECTION_ERRORS_FIELD: &str = "collection_errors";
/// Field name conditions use to reference the metric map itself.
pub const RAW_METRICS_FIELD: &str = "raw_metrics";

/// The collected + derived key/value facts about one repository snapshot.
///
/// Built once per report run by the collector (and extended with derived
/// metrics), then read-only for rule evaluation and rendering. A BTreeMap
/// keeps serialization order deterministic across runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricSet {
    values: BTreeMap<String, MetricValue>,
    #[serde(default)]
    collection_errors: Vec<String>,
}

impl MetricSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<MetricValue>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn record_error(&mut self, message: impl Into<String>) {
        self.collection_errors.push(message.into());
    }

    pub fn get(&self, name: &str) -> Option<&MetricValue> {
        self.values.get(name)
    }

    /// Numeric view of a field; None when the field is absent, missing or
    /// non-numeric. Rule conditions treat None as "not satisfied".
    pub fn numeric(&self, name: &str) -> Option<f64> {
        self.values.get(name).and_then(MetricValue::as_f64)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(MetricValue::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn has_missing_values(&self) -> bool {
        self.values.values().any(MetricValue::is_missing)
    }

    pub fn has_errors(&self) -> bool {
        !self.collection_errors.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.collection_errors
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &MetricValue)> {
        self.values.iter()
    }
}

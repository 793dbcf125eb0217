// repopulse-core/src/domain/metrics/derived.rs

use crate::domain::metrics::set::MetricSet;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Metrics computed over the whole repository history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LifetimeMetrics {
    pub commits_per_author: f64,
    pub merge_commit_ratio: f64,
    pub repo_age_days: i64,
}

/// Metrics computed over the trailing 7-day window.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecentMetrics {
    pub commit_velocity: f64,
    pub author_participation_rate: f64,
    pub change_density: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub lifetime: LifetimeMetrics,
    pub recent: RecentMetrics,
}

impl DerivedMetrics {
    /// Applies the six fixed formulas to the raw metric set.
    ///
    /// Never fails: a zero denominator or a missing/unparseable input
    /// degrades the affected metric to its documented default (0), and
    /// rules downstream evaluate against that default.
    pub fn compute(raw: &MetricSet) -> Self {
        let total_commits = raw.numeric("total_commits");
        let total_authors = raw.numeric("total_authors");
        let merge_commits = raw.numeric("merge_commits");
        let commits_7d = raw.numeric("commits_7d");
        let authors_7d = raw.numeric("authors_7d");
        let files_changed_7d = raw.numeric("files_changed_7d");

        let lifetime = LifetimeMetrics {
            commits_per_author: ratio(total_commits, total_authors),
            merge_commit_ratio: ratio(merge_commits, total_commits),
            repo_age_days: days_between(
                raw.text("first_commit_date"),
                raw.text("latest_commit_date"),
            ),
        };

        let recent = RecentMetrics {
            commit_velocity: ratio(commits_7d, Some(7.0)),
            author_participation_rate: ratio(authors_7d, total_authors),
            change_density: ratio(files_changed_7d, commits_7d),
        };

        Self { lifetime, recent }
    }

    /// Merges the derived values into the evaluation set so rules can
    /// reference raw and derived fields uniformly.
    pub fn apply_to(&self, metrics: &mut MetricSet) {
        metrics.insert("commits_per_author", self.lifetime.commits_per_author);
        metrics.insert("merge_commit_ratio", self.lifetime.merge_commit_ratio);
        metrics.insert("repo_age_days", self.lifetime.repo_age_days);
        metrics.insert("commit_velocity", self.recent.commit_velocity);
        metrics.insert(
            "author_participation_rate",
            self.recent.author_participation_rate,
        );
        metrics.insert("change_density", self.recent.change_density);
    }
}

/// num / den rounded to two decimals; 0.0 when either side is missing or
/// the denominator is zero.
fn ratio(num: Option<f64>, den: Option<f64>) -> f64 {
    match (num, den) {
        (Some(n), Some(d)) if d != 0.0 => round2(n / d),
        _ => 0.0,
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Days between two `%Y-%m-%d` dates; 0 when either is absent or malformed.
fn days_between(first: Option<&str>, latest: Option<&str>) -> i64 {
    let parse = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok();
    match (first.and_then(parse), latest.and_then(parse)) {
        (Some(f), Some(l)) => (l - f).num_days(),
        _ => 0,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::metrics::value::MetricValue;

    fn raw(entries: &[(&str, MetricValue)]) -> MetricSet {
        let mut set = MetricSet::new();
        for (name, value) in entries {
            set.insert(*name, value.clone());
        }
        set
    }

    #[test]
    fn test_full_computation() {
        let set = raw(&[
            ("total_commits", 245.into()),
            ("total_authors", 8.into()),
            ("merge_commits", 49.into()),
            ("commits_7d", 14.into()),
            ("authors_7d", 4.into()),
            ("files_changed_7d", 35.into()),
            ("first_commit_date", "2024-01-01".into()),
            ("latest_commit_date", "2024-12-31".into()),
        ]);

        let derived = DerivedMetrics::compute(&set);
        assert!((derived.lifetime.commits_per_author - 30.63).abs() < 1e-9);
        assert!((derived.lifetime.merge_commit_ratio - 0.2).abs() < 1e-9);
        assert_eq!(derived.lifetime.repo_age_days, 365);
        assert!((derived.recent.commit_velocity - 2.0).abs() < 1e-9);
        assert!((derived.recent.author_participation_rate - 0.5).abs() < 1e-9);
        assert!((derived.recent.change_density - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_zero_denominators_yield_defaults() {
        let set = raw(&[
            ("total_commits", 245.into()),
            ("total_authors", 0.into()),
            ("merge_commits", 0.into()),
            ("commits_7d", 0.into()),
            ("authors_7d", 0.into()),
            ("files_changed_7d", 12.into()),
        ]);

        let derived = DerivedMetrics::compute(&set);
        assert_eq!(derived.lifetime.commits_per_author, 0.0);
        assert_eq!(derived.recent.author_participation_rate, 0.0);
        // files changed but zero commits in the window: density stays 0
        assert_eq!(derived.recent.change_density, 0.0);
    }

    #[test]
    fn test_missing_inputs_yield_defaults() {
        let set = raw(&[
            ("total_commits", MetricValue::Missing),
            ("total_authors", 3.into()),
        ]);

        let derived = DerivedMetrics::compute(&set);
        assert_eq!(derived.lifetime.commits_per_author, 0.0);
        assert_eq!(derived.lifetime.merge_commit_ratio, 0.0);
        assert_eq!(derived.recent.commit_velocity, 0.0);
    }

    #[test]
    fn test_unparseable_dates_degrade_to_zero_age() {
        let set = raw(&[
            ("first_commit_date", "unknown".into()),
            ("latest_commit_date", "2024-12-31".into()),
        ]);
        assert_eq!(DerivedMetrics::compute(&set).lifetime.repo_age_days, 0);
    }

    #[test]
    fn test_apply_to_extends_the_set() {
        let set = raw(&[("total_commits", 100.into()), ("total_authors", 4.into())]);
        let derived = DerivedMetrics::compute(&set);

        let mut evaluation = set.clone();
        derived.apply_to(&mut evaluation);

        assert_eq!(evaluation.numeric("commits_per_author"), Some(25.0));
        assert_eq!(evaluation.numeric("merge_commit_ratio"), Some(0.0));
        assert_eq!(evaluation.numeric("change_density"), Some(0.0));
    }
}

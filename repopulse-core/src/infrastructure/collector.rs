// repopulse-core/src/infrastructure/collector.rs

use crate::domain::metrics::set::MetricSet;
use crate::domain::metrics::value::MetricValue;
use crate::ports::runner::CommandRunner;
use regex::Regex;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

/// How a command's stdout becomes a metric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueKind {
    Count,
    Text,
}

/// The fixed collection plan. Pipelines carry their own shell fallbacks so
/// a missing remote or tag yields a parseable sentinel instead of a
/// non-zero exit.
const GIT_COMMANDS: &[(&str, &str, ValueKind)] = &[
    (
        "current_branch",
        "git rev-parse --abbrev-ref HEAD || echo 'unknown'",
        ValueKind::Text,
    ),
    (
        "remote_url",
        "git config --get remote.origin.url || echo 'unknown'",
        ValueKind::Text,
    ),
    (
        "first_commit_date",
        "git log --reverse --format=%ad --date=format:%Y-%m-%d --max-count=1 || echo 'unknown'",
        ValueKind::Text,
    ),
    (
        "latest_commit_date",
        "git log -1 --format=%ad --date=format:%Y-%m-%d || echo 'unknown'",
        ValueKind::Text,
    ),
    (
        "total_commits",
        "git rev-list --count HEAD || echo '0'",
        ValueKind::Count,
    ),
    (
        "total_authors",
        "git shortlog -sn --all | wc -l || echo '0'",
        ValueKind::Count,
    ),
    (
        "local_branches",
        "git branch | wc -l || echo '0'",
        ValueKind::Count,
    ),
    (
        "remote_branches",
        "git branch -r | wc -l || echo '0'",
        ValueKind::Count,
    ),
    ("total_tags", "git tag | wc -l || echo '0'", ValueKind::Count),
    (
        "last_tag",
        "git describe --tags --abbrev=0 2>/dev/null || echo 'unknown'",
        ValueKind::Text,
    ),
    (
        "merge_commits",
        "git log --merges --oneline | wc -l || echo '0'",
        ValueKind::Count,
    ),
    (
        "commits_7d",
        "git rev-list --count --since='7 days ago' HEAD || echo '0'",
        ValueKind::Count,
    ),
    (
        "authors_7d",
        "git shortlog -sn --since='7 days ago' | wc -l || echo '0'",
        ValueKind::Count,
    ),
    (
        "files_changed_7d",
        "git log --since='7 days ago' --name-only --pretty=format: | sort -u | wc -l || echo '0'",
        ValueKind::Count,
    ),
    (
        "working_tree_status",
        "git status --porcelain | wc -l",
        ValueKind::Count,
    ),
];

/// Runs the collection plan against a repository and builds the MetricSet.
///
/// Strictly sequential: one command at a time, in table order. A failed or
/// timed-out command records `Missing` plus a collection error and the run
/// continues; the collector itself never aborts a report.
pub struct GitCollector<'a> {
    runner: &'a dyn CommandRunner,
    command_timeout: Duration,
}

impl<'a> GitCollector<'a> {
    pub fn new(runner: &'a dyn CommandRunner, command_timeout: Duration) -> Self {
        Self {
            runner,
            command_timeout,
        }
    }

    pub async fn collect(&self, repo_dir: &Path) -> MetricSet {
        let mut metrics = MetricSet::new();

        for (name, command, kind) in GIT_COMMANDS {
            debug!(command = name, "Executing collection command");

            let result = self
                .runner
                .run(name, command, repo_dir, self.command_timeout)
                .await;

            match result {
                Ok(output) if output.success => match kind {
                    ValueKind::Count => metrics.insert(*name, parse_count(&output.stdout)),
                    ValueKind::Text => metrics.insert(*name, parse_text(&output.stdout)),
                },
                Ok(output) => {
                    let reason = output
                        .stderr
                        .unwrap_or_else(|| "unknown error".to_string());
                    warn!(command = name, %reason, "Collection command failed");
                    metrics.insert(*name, MetricValue::Missing);
                    metrics.record_error(format!("Command '{}' failed: {}", name, reason));
                }
                Err(e) => {
                    warn!(command = name, error = %e, "Collection command errored");
                    metrics.insert(*name, MetricValue::Missing);
                    metrics.record_error(format!("Command '{}' failed: {}", name, e));
                }
            }
        }

        let repo_name = metrics
            .text("remote_url")
            .map(repo_name_from_remote)
            .unwrap_or_else(|| "unknown".to_string());
        metrics.insert("repo_name", repo_name);

        metrics
    }
}

/// `wc -l`-style outputs: digits only, anything else degrades to 0.
fn parse_count(raw: &str) -> i64 {
    let trimmed = raw.trim();
    if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        trimmed.parse().unwrap_or(0)
    } else {
        0
    }
}

fn parse_text(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        "unknown".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Last path segment of the remote URL, `.git` suffix stripped. Handles
/// both scp-like (`git@host:org/repo.git`) and https remotes.
fn repo_name_from_remote(url: &str) -> String {
    if url.is_empty() || url == "unknown" {
        return "unknown".to_string();
    }

    Regex::new(r"([^/:]+?)(?:\.git)?/*$")
        .ok()
        .and_then(|re| re.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

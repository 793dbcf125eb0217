use anyhow::Result;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn repopulse() -> Result<Command> {
    Ok(Command::new(assert_cmd::cargo::cargo_bin!("repopulse")))
}

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Creates a throwaway repository with a single commit.
fn scripted_repo() -> Result<TempDir> {
    let tmp = tempfile::tempdir()?;
    let root = tmp.path();

    run_git(root, &["init", "-q"])?;
    fs::write(root.join("README.md"), "# fixture\n")?;
    run_git(root, &["add", "."])?;
    run_git(
        root,
        &[
            "-c",
            "user.name=Fixture",
            "-c",
            "user.email=fixture@example.com",
            "commit",
            "-q",
            "-m",
            "initial commit",
        ],
    )?;

    Ok(tmp)
}

fn run_git(dir: &Path, args: &[&str]) -> Result<()> {
    let status = Command::new("git").current_dir(dir).args(args).status()?;
    anyhow::ensure!(status.success(), "git {:?} failed", args);
    Ok(())
}

#[test]
fn test_help_mentions_the_subcommands() -> Result<()> {
    repopulse()?
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("report"))
        .stdout(predicate::str::contains("metrics"))
        .stdout(predicate::str::contains("rules"));
    Ok(())
}

#[test]
fn test_rules_lists_the_builtin_catalog() -> Result<()> {
    let tmp = tempfile::tempdir()?;

    let mut assert = repopulse()?
        .arg("rules")
        .arg("--repo-dir")
        .arg(tmp.path())
        .assert()
        .success();

    for id in [
        "bash_tool_unavailable",
        "incomplete_metrics",
        "low_commit_activity",
        "single_contributor",
        "high_commits_per_author",
        "no_merge_commits",
        "high_change_density",
    ] {
        assert = assert.stdout(predicate::str::contains(id));
    }
    drop(assert);
    Ok(())
}

#[test]
fn test_rules_includes_satellite_rules() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let config_dir = tmp.path().join("config");
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
"#,
    )?;

    repopulse()?
        .arg("rules")
        .arg("--repo-dir")
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("too_many_branches"));
    Ok(())
}

#[test]
fn test_report_refuses_a_plain_directory() -> Result<()> {
    let tmp = tempfile::tempdir()?;

    repopulse()?
        .arg("report")
        .arg("--no-insights")
        .arg("--repo-dir")
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a Git repository"));
    Ok(())
}

#[test]
fn test_metrics_refuses_a_plain_directory() -> Result<()> {
    let tmp = tempfile::tempdir()?;

    repopulse()?
        .arg("metrics")
        .arg("--repo-dir")
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a Git repository"));
    Ok(())
}

#[test]
fn test_report_end_to_end_on_scripted_repo() -> Result<()> {
    if !git_available() {
        eprintln!("skipping: git is not available in this environment");
        return Ok(());
    }

    let repo = scripted_repo()?;

    repopulse()?
        .arg("report")
        .arg("--no-insights")
        .arg("--repo-dir")
        .arg(repo.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("SUCCESS"));

    let markdown = fs::read_to_string(repo.path().join("target/report.md"))?;
    assert!(markdown.contains("# Repository Health Report"));
    assert!(markdown.contains("## Warnings"));
    // A fresh single-author repo must trip the bus-factor rule
    assert!(markdown.contains("Repository has only one active contributor"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(repo.path().join("target/report.json"))?)?;
    assert!(json["warnings"].as_array().is_some_and(|w| !w.is_empty()));
    Ok(())
}

#[test]
fn test_metrics_json_output_on_scripted_repo() -> Result<()> {
    if !git_available() {
        eprintln!("skipping: git is not available in this environment");
        return Ok(());
    }

    let repo = scripted_repo()?;

    let output = repopulse()?
        .arg("metrics")
        .arg("--json")
        .arg("--repo-dir")
        .arg(repo.path())
        .output()?;

    assert!(output.status.success());
    let payload: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(payload["raw"]["values"]["total_commits"], 1);
    assert_eq!(payload["derived"]["lifetime"]["commits_per_author"], 1.0);
    Ok(())
}

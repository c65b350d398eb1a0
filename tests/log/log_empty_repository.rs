use crate::common::command::{repository_dir, run_cairn_command};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn log_without_commits_prints_nothing(repository_dir: TempDir) {
    run_cairn_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_cairn_command(repository_dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[rstest]
fn log_head_without_commits_fails(repository_dir: TempDir) {
    run_cairn_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_cairn_command(repository_dir.path(), &["log", "HEAD"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("HEAD does not point to a commit"));
}

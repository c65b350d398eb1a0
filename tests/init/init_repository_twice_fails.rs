use crate::common::command::{repository_dir, run_cairn_command};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn init_repository_twice_fails(repository_dir: TempDir) {
    run_cairn_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_cairn_command(repository_dir.path(), &["init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("repository already exists"));
}

use crate::common::command::{read_head_file, repository_dir, run_cairn_command};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn init_repository_successfully(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_cairn_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Initialized empty cairn repository in",
        ));

    repository_dir
        .child(".cairn/objects")
        .assert(predicate::path::is_dir());
    repository_dir
        .child(".cairn/refs/heads")
        .assert(predicate::path::is_dir());
    assert_eq!(
        read_head_file(repository_dir.path())?,
        "ref: refs/heads/master\n"
    );

    let index: serde_json::Value =
        serde_json::from_slice(&std::fs::read(repository_dir.child(".cairn/index").path())?)?;
    assert_eq!(index["version"], 1);
    assert_eq!(index["entries"], serde_json::json!({}));

    Ok(())
}

#[rstest]
fn init_repository_at_a_new_path(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_cairn_command(repository_dir.path(), &["init", "nested/project"])
        .assert()
        .success();

    repository_dir
        .child("nested/project/.cairn/HEAD")
        .assert(predicate::path::is_file());

    Ok(())
}

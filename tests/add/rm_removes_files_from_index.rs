use crate::common::command::{init_repository_dir, read_index_entries, run_cairn_command};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn rm_cached_keeps_the_working_file(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    run_cairn_command(repository_dir.path(), &["rm", "--cached", "a"])
        .assert()
        .success();

    let entries = read_index_entries(repository_dir.path())?;
    assert_eq!(
        entries.keys().cloned().collect::<Vec<_>>(),
        vec!["1.txt".to_string()]
    );
    repository_dir.child("a/2.txt").assert("two");
    repository_dir.child("a/b/3.txt").assert("three");

    Ok(())
}

#[rstest]
fn rm_without_cached_deletes_the_file(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    run_cairn_command(repository_dir.path(), &["rm", "1.txt"])
        .assert()
        .success();

    assert!(!read_index_entries(repository_dir.path())?.contains_key("1.txt"));
    repository_dir
        .child("1.txt")
        .assert(predicate::path::missing());

    Ok(())
}

#[rstest]
fn rm_untracked_path_fails(init_repository_dir: TempDir) {
    run_cairn_command(init_repository_dir.path(), &["rm", "--cached", "nope.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("did not match any files"));
}

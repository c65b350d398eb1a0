use crate::common::command::{
    cairn_commit, get_head_commit_sha, read_branch_file, read_head_file,
    repository_with_multiple_commits, run_cairn_command,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn commit_on_detached_head_moves_only_head(
    repository_with_multiple_commits: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = repository_with_multiple_commits;
    let master = read_branch_file(repository_dir.path(), "master")?;

    run_cairn_command(repository_dir.path(), &["checkout", "HEAD~2"])
        .assert()
        .success();
    write_file(FileSpec::new(
        repository_dir.path().join("detached.txt"),
        "detached".to_string(),
    ));
    run_cairn_command(repository_dir.path(), &["add", "detached.txt"])
        .assert()
        .success();

    cairn_commit(repository_dir.path(), "On a detached HEAD")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[detached HEAD "));

    let head = get_head_commit_sha(repository_dir.path())?;
    assert_eq!(read_head_file(repository_dir.path())?, format!("{head}\n"));
    assert_eq!(read_branch_file(repository_dir.path(), "master")?, master);

    Ok(())
}

use crate::common::command::{
    cairn_commit, get_head_commit_sha, init_repository_dir, read_head_file, run_cairn_command,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn repository_with_topic_branch(repository_dir: &TempDir) {
    run_cairn_command(repository_dir.path(), &["branch", "topic"])
        .assert()
        .success();
    write_file(FileSpec::new(repository_dir.path().join("1.txt"), "master".to_string()));
    run_cairn_command(repository_dir.path(), &["add", "1.txt"])
        .assert()
        .success();
    cairn_commit(repository_dir.path(), "Change on master")
        .assert()
        .success();
}

#[rstest]
fn checkout_with_staged_changes_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;
    repository_with_topic_branch(&repository_dir);
    let head = get_head_commit_sha(repository_dir.path())?;

    write_file(FileSpec::new(repository_dir.path().join("1.txt"), "staged".to_string()));
    run_cairn_command(repository_dir.path(), &["add", "1.txt"])
        .assert()
        .success();

    run_cairn_command(repository_dir.path(), &["checkout", "topic"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("staged changes would be lost"));

    // nothing moved
    assert_eq!(read_head_file(repository_dir.path())?, "ref: refs/heads/master\n");
    assert_eq!(get_head_commit_sha(repository_dir.path())?, head);
    assert_eq!(
        std::fs::read_to_string(repository_dir.path().join("1.txt"))?,
        "staged"
    );

    Ok(())
}

#[rstest]
fn checkout_overwrites_unstaged_changes(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;
    repository_with_topic_branch(&repository_dir);

    write_file(FileSpec::new(
        repository_dir.path().join("1.txt"),
        "scratch".to_string(),
    ));

    run_cairn_command(repository_dir.path(), &["checkout", "topic"])
        .assert()
        .success();

    assert_eq!(
        std::fs::read_to_string(repository_dir.path().join("1.txt"))?,
        "one"
    );

    Ok(())
}

#[rstest]
fn checkout_refuses_to_overwrite_untracked_files(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;
    run_cairn_command(repository_dir.path(), &["checkout", "-b", "topic"])
        .assert()
        .success();
    write_file(FileSpec::new(repository_dir.path().join("notes.txt"), "topic".to_string()));
    run_cairn_command(repository_dir.path(), &["add", "notes.txt"])
        .assert()
        .success();
    cairn_commit(repository_dir.path(), "Add notes").assert().success();

    run_cairn_command(repository_dir.path(), &["checkout", "master"])
        .assert()
        .success();
    write_file(FileSpec::new(repository_dir.path().join("notes.txt"), "mine".to_string()));

    run_cairn_command(repository_dir.path(), &["checkout", "topic"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "untracked working tree file 'notes.txt' would be overwritten",
        ));

    assert_eq!(read_head_file(repository_dir.path())?, "ref: refs/heads/master\n");
    assert_eq!(
        std::fs::read_to_string(repository_dir.path().join("notes.txt"))?,
        "mine"
    );

    Ok(())
}

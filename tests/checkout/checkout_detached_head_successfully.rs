use crate::common::command::{
    get_head_commit_sha, get_parent_commit_id, read_head_file, repository_with_multiple_commits,
    run_cairn_command,
};
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn checkout_commit_detaches_head(
    repository_with_multiple_commits: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = repository_with_multiple_commits;
    let head = get_head_commit_sha(repository_dir.path())?;
    let parent = get_parent_commit_id(repository_dir.path(), &head)?;

    run_cairn_command(repository_dir.path(), &["checkout", &parent])
        .assert()
        .success()
        .stderr(predicate::str::contains(format!("Note: checking out '{parent}'.")))
        .stderr(predicate::str::contains("detached HEAD"))
        .stderr(predicate::str::contains(format!(
            "HEAD is now at {} Third commit",
            &parent[..7]
        )));

    assert_eq!(read_head_file(repository_dir.path())?, format!("{parent}\n"));
    assert!(!repository_dir.path().join("file4.txt").exists());
    assert!(repository_dir.path().join("file3.txt").exists());

    Ok(())
}

#[rstest]
fn moving_between_detached_commits_reports_previous_position(
    repository_with_multiple_commits: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = repository_with_multiple_commits;
    let head = get_head_commit_sha(repository_dir.path())?;

    run_cairn_command(repository_dir.path(), &["checkout", "HEAD^"])
        .assert()
        .success();
    let detached = get_head_commit_sha(repository_dir.path())?;

    run_cairn_command(repository_dir.path(), &["checkout", "@~2"])
        .assert()
        .success()
        .stderr(predicate::str::contains(format!(
            "Previous HEAD position was {} Third commit",
            &detached[..7]
        )))
        .stderr(predicate::str::contains("HEAD is now at"))
        .stderr(predicate::str::contains("Note:").not());

    assert!(!repository_dir.path().join("file2.txt").exists());
    assert!(repository_dir.path().join("file1.txt").exists());

    run_cairn_command(repository_dir.path(), &["checkout", "master"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Previous HEAD position was"))
        .stderr(predicate::str::contains("Switched to branch 'master'"));

    assert_eq!(get_head_commit_sha(repository_dir.path())?, head);
    assert!(repository_dir.path().join("file4.txt").exists());

    Ok(())
}

use crate::common::command::{
    cairn_stdout, repository_with_multiple_commits, run_cairn_command,
};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn list_branches_marks_the_current_one(
    repository_with_multiple_commits: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = repository_with_multiple_commits;

    for branch in ["zeta", "alpha"] {
        run_cairn_command(repository_dir.path(), &["branch", branch])
            .assert()
            .success();
    }

    assert_eq!(
        cairn_stdout(repository_dir.path(), &["branch"])?,
        "  alpha\n* master\n  zeta\n"
    );

    run_cairn_command(repository_dir.path(), &["checkout", "zeta"])
        .assert()
        .success();

    assert_eq!(
        cairn_stdout(repository_dir.path(), &["branch"])?,
        "  alpha\n  master\n* zeta\n"
    );

    Ok(())
}

#[rstest]
fn list_branches_on_detached_head_marks_none(
    repository_with_multiple_commits: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = repository_with_multiple_commits;

    run_cairn_command(repository_dir.path(), &["checkout", "HEAD^"])
        .assert()
        .success();

    assert_eq!(cairn_stdout(repository_dir.path(), &["branch"])?, "  master\n");

    Ok(())
}

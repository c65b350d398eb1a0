use crate::common::command::{
    cairn_stdout, init_repository_dir, repository_dir, run_cairn_command,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn long_status_of_fresh_repository(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_cairn_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    write_file(FileSpec::new(repository_dir.path().join("notes.txt"), "n".to_string()));

    assert_eq!(
        cairn_stdout(repository_dir.path(), &["status"])?,
        "On branch master\n\
         \nNo commits yet\n\
         \nUntracked files:\n        notes.txt\n\
         \nnothing added to commit but untracked files present\n"
    );

    Ok(())
}

#[rstest]
fn long_status_of_clean_repository(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    assert_eq!(
        cairn_stdout(init_repository_dir.path(), &["status"])?,
        "On branch master\n\nnothing to commit, working tree clean\n"
    );

    Ok(())
}

#[rstest]
fn long_status_groups_staged_and_unstaged_changes(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    write_file(FileSpec::new(repository_dir.path().join("1.txt"), "staged".to_string()));
    run_cairn_command(repository_dir.path(), &["add", "1.txt"])
        .assert()
        .success();
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("2.txt"),
        "unstaged".to_string(),
    ));
    write_file(FileSpec::new(repository_dir.path().join("extra.txt"), "x".to_string()));

    assert_eq!(
        cairn_stdout(repository_dir.path(), &["status"])?,
        "On branch master\n\
         \nChanges to be committed:\n        modified:   1.txt\n\
         \nChanges not staged for commit:\n        modified:   a/2.txt\n\
         \nUntracked files:\n        extra.txt\n"
    );

    Ok(())
}

#[rstest]
fn long_status_with_only_unstaged_changes(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;
    std::fs::remove_file(repository_dir.path().join("1.txt"))?;

    assert_eq!(
        cairn_stdout(repository_dir.path(), &["status"])?,
        "On branch master\n\
         \nChanges not staged for commit:\n        deleted:    1.txt\n\
         \nno changes added to commit\n"
    );

    Ok(())
}

#[rstest]
fn long_status_on_detached_head(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;
    let head = crate::common::command::get_head_commit_sha(repository_dir.path())?;

    run_cairn_command(repository_dir.path(), &["checkout", &head])
        .assert()
        .success();

    assert_eq!(
        cairn_stdout(repository_dir.path(), &["status"])?,
        format!(
            "HEAD detached at {}\n\nnothing to commit, working tree clean\n",
            &head[..7]
        )
    );

    Ok(())
}

use crate::common::command::{
    cairn_stdout, init_repository_dir, repository_dir, run_cairn_command,
};
use crate::common::file::{FileSpec, create_directory, delete_path, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn list_untracked_files_in_name_order(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_cairn_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    write_file(FileSpec::new(repository_dir.path().join("file.txt"), String::new()));
    write_file(FileSpec::new(repository_dir.path().join("another.txt"), String::new()));

    assert_eq!(
        cairn_stdout(repository_dir.path(), &["status", "--porcelain"])?,
        "?? another.txt\n?? file.txt\n"
    );

    Ok(())
}

#[rstest]
fn list_untracked_directories_not_their_contents(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_cairn_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    write_file(FileSpec::new(repository_dir.path().join("file.txt"), String::new()));
    write_file(FileSpec::new(
        repository_dir.path().join("dir").join("another.txt"),
        String::new(),
    ));

    assert_eq!(
        cairn_stdout(repository_dir.path(), &["status", "--porcelain"])?,
        "?? dir/\n?? file.txt\n"
    );

    Ok(())
}

#[rstest]
fn list_untracked_files_inside_tracked_directories(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_cairn_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("b").join("inner.txt"),
        String::new(),
    ));
    run_cairn_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("a").join("outer.txt"),
        String::new(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("b").join("c").join("file.txt"),
        String::new(),
    ));

    assert_eq!(
        cairn_stdout(repository_dir.path(), &["status", "--porcelain"])?,
        "A  a/b/inner.txt\n?? a/b/c/\n?? a/outer.txt\n"
    );

    Ok(())
}

#[rstest]
fn empty_untracked_directories_are_ignored(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_cairn_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    create_directory(&repository_dir.path().join("outer").join("inner"));

    assert_eq!(
        cairn_stdout(repository_dir.path(), &["status", "--porcelain"])?,
        ""
    );

    Ok(())
}

#[rstest]
fn clean_repository_prints_nothing(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    assert_eq!(
        cairn_stdout(init_repository_dir.path(), &["status", "--porcelain"])?,
        ""
    );

    Ok(())
}

#[rstest]
fn report_workspace_changes(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    write_file(FileSpec::new(repository_dir.path().join("1.txt"), "changed".to_string()));
    delete_path(&repository_dir.path().join("a").join("b"));

    assert_eq!(
        cairn_stdout(repository_dir.path(), &["status", "--porcelain"])?,
        " M 1.txt\n D a/b/3.txt\n"
    );

    Ok(())
}

#[cfg(unix)]
#[rstest]
fn report_mode_changes(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    use crate::common::file::make_executable;

    let repository_dir = init_repository_dir;
    make_executable(&repository_dir.path().join("a").join("2.txt"));

    assert_eq!(
        cairn_stdout(repository_dir.path(), &["status", "--porcelain"])?,
        " M a/2.txt\n"
    );

    run_cairn_command(repository_dir.path(), &["add", "a"])
        .assert()
        .success();

    assert_eq!(
        cairn_stdout(repository_dir.path(), &["status", "--porcelain"])?,
        "M  a/2.txt\n"
    );

    Ok(())
}

#[rstest]
fn report_index_changes(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    write_file(FileSpec::new(
        repository_dir.path().join("a").join("4.txt"),
        "four".to_string(),
    ));
    write_file(FileSpec::new(repository_dir.path().join("1.txt"), "uno".to_string()));
    run_cairn_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();
    run_cairn_command(repository_dir.path(), &["rm", "a/b/3.txt"])
        .assert()
        .success();

    assert_eq!(
        cairn_stdout(repository_dir.path(), &["status", "--porcelain"])?,
        "M  1.txt\nA  a/4.txt\nD  a/b/3.txt\n"
    );

    Ok(())
}

#[rstest]
fn report_staged_then_modified_file(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    write_file(FileSpec::new(repository_dir.path().join("new.txt"), "v1".to_string()));
    run_cairn_command(repository_dir.path(), &["add", "new.txt"])
        .assert()
        .success();
    write_file(FileSpec::new(repository_dir.path().join("new.txt"), "v2".to_string()));

    assert_eq!(
        cairn_stdout(repository_dir.path(), &["status", "--porcelain"])?,
        "AM new.txt\n"
    );

    Ok(())
}

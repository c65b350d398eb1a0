use crate::common::command::{
    cairn_stdout, get_head_commit_sha, init_repository_dir, repository_dir, run_cairn_command,
};
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn blob_oid(dir: &std::path::Path, path: &str) -> Result<String, Box<dyn std::error::Error>> {
    Ok(cairn_stdout(dir, &["hash-object", path])?.trim().to_string())
}

#[rstest]
fn ls_tree_recursive_lists_every_file(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;
    let dir = repository_dir.path();

    assert_eq!(
        cairn_stdout(dir, &["ls-tree", "-r", "HEAD"])?,
        format!(
            "100644 blob {}\t1.txt\n100644 blob {}\ta/2.txt\n100644 blob {}\ta/b/3.txt\n",
            blob_oid(dir, "1.txt")?,
            blob_oid(dir, "a/2.txt")?,
            blob_oid(dir, "a/b/3.txt")?
        )
    );

    Ok(())
}

#[rstest]
#[case("HEAD")]
#[case("master")]
#[case("@")]
fn ls_tree_of_commit_lists_its_root_tree(
    init_repository_dir: TempDir,
    #[case] tree_ish: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = cairn_stdout(init_repository_dir.path(), &["ls-tree", tree_ish])?;
    let lines = stdout.lines().collect::<Vec<_>>();

    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("100644 blob ") && lines[0].ends_with("\t1.txt"));
    assert!(lines[1].starts_with("040000 tree ") && lines[1].ends_with("\ta"));

    Ok(())
}

#[rstest]
fn ls_tree_of_blob_fails(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;
    let blob = blob_oid(repository_dir.path(), "1.txt")?;

    run_cairn_command(repository_dir.path(), &["ls-tree", &blob])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is a blob, not a tree"));

    Ok(())
}

#[rstest]
fn ls_tree_reports_corrupt_commit_behind_revision(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;
    let head = get_head_commit_sha(repository_dir.path())?;

    let object_file = repository_dir
        .path()
        .join(".cairn/objects")
        .join(&head[..2])
        .join(&head[2..]);
    std::fs::write(object_file, b"definitely not zlib")?;

    run_cairn_command(repository_dir.path(), &["ls-tree", "HEAD^"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(format!("corrupt object {head}")));

    Ok(())
}

#[rstest]
fn ls_tree_of_unborn_head_reports_dangling_head(repository_dir: TempDir) {
    run_cairn_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_cairn_command(repository_dir.path(), &["ls-tree", "HEAD"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("HEAD does not point to a commit"));
}

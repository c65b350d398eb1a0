use crate::common::file::{FileSpec, write_file};
use crate::common::redirect_temp_dir;
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    redirect_temp_dir();
    TempDir::new().expect("Failed to create temp dir")
}

/// A repository with one commit holding `1.txt`, `a/2.txt` and `a/b/3.txt`.
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_cairn_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    let file1 = FileSpec::new(repository_dir.path().join("1.txt"), "one".to_string());
    write_file(file1);

    let file2 = FileSpec::new(
        repository_dir.path().join("a").join("2.txt"),
        "two".to_string(),
    );
    write_file(file2);

    let file3 = FileSpec::new(
        repository_dir.path().join("a").join("b").join("3.txt"),
        "three".to_string(),
    );
    write_file(file3);

    run_cairn_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    cairn_commit(repository_dir.path(), "Initial commit")
        .assert()
        .success();

    repository_dir
}

/// A repository with four linear commits, each adding `fileN.txt`.
#[fixture]
pub fn repository_with_multiple_commits(repository_dir: TempDir) -> TempDir {
    run_cairn_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    for (n, message) in ["First commit", "Second commit", "Third commit", "Fourth commit"]
        .iter()
        .enumerate()
    {
        let file = FileSpec::new(
            repository_dir.path().join(format!("file{}.txt", n + 1)),
            format!("content {}", n + 1),
        );
        write_file(file);
        run_cairn_command(repository_dir.path(), &["add", "."])
            .assert()
            .success();
        cairn_commit(repository_dir.path(), message)
            .assert()
            .success();
    }

    repository_dir
}

pub fn run_cairn_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("cairn").expect("Failed to find cairn binary");
    cmd.envs(vec![("NO_PAGER", "1")]);
    cmd.env_remove("RUST_LOG");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn cairn_commit(dir: &Path, message: &str) -> Command {
    let mut cmd = run_cairn_command(dir, &["commit", "-m", message]);
    cmd.envs(vec![
        ("CAIRN_AUTHOR_NAME", "fake_user"),
        ("CAIRN_AUTHOR_EMAIL", "fake_email@email.com"),
        ("CAIRN_AUTHOR_DATE", "2023-01-01 12:00:00 +0000"), // %Y-%m-%d %H:%M:%S %z
    ]);
    cmd
}

/// Stdout of a successful command.
pub fn cairn_stdout(dir: &Path, args: &[&str]) -> Result<String, Box<dyn std::error::Error>> {
    let output = run_cairn_command(dir, args).assert().success();
    Ok(String::from_utf8(output.get_output().stdout.clone())?)
}

/// Get the parent commit ID of a given commit by using cairn cat-file
pub fn get_parent_commit_id(
    dir: &Path,
    commit_id: &str,
) -> Result<String, Box<dyn std::error::Error>> {
    let stdout = cairn_stdout(dir, &["cat-file", "-p", commit_id])?;

    // Find the parent line
    for line in stdout.lines() {
        if let Some(oid) = line.strip_prefix("parent ") {
            return Ok(oid.to_string());
        }
    }

    Err("No parent found".into())
}

/// Get the current HEAD commit SHA
pub fn get_head_commit_sha(dir: &Path) -> Result<String, Box<dyn std::error::Error>> {
    let head_path = dir.join(".cairn").join("HEAD");
    let head_content = std::fs::read_to_string(head_path)?;

    // HEAD file contains either a commit SHA or a ref like "ref: refs/heads/master"
    if let Some(ref_path) = head_content.strip_prefix("ref: ") {
        let ref_file = dir.join(".cairn").join(ref_path.trim());
        let commit_sha = std::fs::read_to_string(ref_file)?;
        Ok(commit_sha.trim().to_string())
    } else {
        Ok(head_content.trim().to_string())
    }
}

pub fn read_head_file(dir: &Path) -> Result<String, Box<dyn std::error::Error>> {
    Ok(std::fs::read_to_string(dir.join(".cairn").join("HEAD"))?)
}

pub fn read_branch_file(dir: &Path, branch: &str) -> Result<String, Box<dyn std::error::Error>> {
    let path = dir.join(".cairn").join("refs").join("heads").join(branch);
    Ok(std::fs::read_to_string(path)?.trim().to_string())
}

/// Staged entries from `.cairn/index`, as `path -> (oid, mode)`.
pub fn read_index_entries(
    dir: &Path,
) -> Result<std::collections::BTreeMap<String, (String, String)>, Box<dyn std::error::Error>> {
    let content = std::fs::read(dir.join(".cairn").join("index"))?;
    let index: serde_json::Value = serde_json::from_slice(&content)?;

    let entries = index["entries"]
        .as_object()
        .ok_or("index has no entries map")?
        .iter()
        .map(|(path, entry)| {
            (
                path.clone(),
                (
                    entry["oid"].as_str().unwrap_or_default().to_string(),
                    entry["mode"].as_str().unwrap_or_default().to_string(),
                ),
            )
        })
        .collect();

    Ok(entries)
}

use crate::common::command::{cairn_stdout, repository_dir, run_cairn_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

// "hello\n" hashed as a blob
const HELLO_OID: &str = "ce013625030ba8dba906f756967f9e9ca394464a";

#[rstest]
fn hash_object_without_write_stores_nothing(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_cairn_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    write_file(FileSpec::new(repository_dir.path().join("hello.txt"), "hello\n".to_string()));

    assert_eq!(
        cairn_stdout(repository_dir.path(), &["hash-object", "hello.txt"])?,
        format!("{HELLO_OID}\n")
    );
    assert!(!repository_dir.path().join(".cairn/objects/ce").exists());

    Ok(())
}

#[rstest]
fn hash_object_with_write_stores_the_blob(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_cairn_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    write_file(FileSpec::new(repository_dir.path().join("hello.txt"), "hello\n".to_string()));

    assert_eq!(
        cairn_stdout(repository_dir.path(), &["hash-object", "-w", "hello.txt"])?,
        format!("{HELLO_OID}\n")
    );
    assert!(
        repository_dir
            .path()
            .join(".cairn/objects/ce/013625030ba8dba906f756967f9e9ca394464a")
            .is_file()
    );

    // storing twice is a no-op
    run_cairn_command(repository_dir.path(), &["hash-object", "-w", "hello.txt"])
        .assert()
        .success()
        .stdout(format!("{HELLO_OID}\n"));

    Ok(())
}

#[rstest]
fn hash_object_of_missing_file_fails(repository_dir: TempDir) {
    run_cairn_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_cairn_command(repository_dir.path(), &["hash-object", "missing.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.txt"));
}

use predicates::prelude::*;

mod common;

#[test]
fn test_resolve_root() {
    common::guestdev()
        .args(["resolve", "///"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("/\t"));
}

#[test]
fn test_resolve_proc_json() {
    common::guestdev()
        .args(["--json", "resolve", "/proc"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""mount_point": "/proc""#))
        .stdout(predicate::str::contains(r#""fs_type": "proc""#));
}

#[test]
fn test_resolve_empty_path_fails() {
    common::guestdev()
        .args(["resolve", ""])
        .assert()
        .failure();
}

#[test]
fn test_resolve_missing_path_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("file with spaces");

    common::guestdev()
        .arg("resolve")
        .arg(&missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_fstype_proc() {
    common::guestdev()
        .args(["fstype", "/proc"])
        .assert()
        .success()
        .stdout("proc\tproc\n");
}

#[test]
fn test_fstype_not_a_mount_point() {
    let dir = tempfile::tempdir().unwrap();

    common::guestdev()
        .arg("fstype")
        .arg(dir.path())
        .assert()
        .failure();
}

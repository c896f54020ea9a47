use predicates::prelude::*;
use rstest::rstest;

mod common;

#[rstest]
#[case("/sys/fs/cgroup", "system_mount=true host_device=false")]
#[case("/sysfoo", "system_mount=false host_device=false")]
#[case("/dev/zero", "system_mount=false host_device=true")]
#[case("/mnt/dev/block", "system_mount=false host_device=false")]
fn test_classify(#[case] path: &str, #[case] expected: &str) {
    common::guestdev()
        .args(["classify", path])
        .assert()
        .success()
        .stdout(format!("{}\n", expected));
}

#[test]
fn test_devnum_dev_zero() {
    common::guestdev()
        .args(["devnum", "/dev/zero"])
        .assert()
        .success()
        .stdout("1:5\n");
}

#[test]
fn test_devnum_rejects_regular_file() {
    let file = tempfile::NamedTempFile::new().unwrap();

    common::guestdev()
        .arg("devnum")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a device node"));
}

#[test]
fn test_dm_tty_is_not_device_mapper() {
    common::guestdev()
        .args(["dm", "5", "0"])
        .assert()
        .success()
        .stdout("false\n");
}

#[test]
fn test_dm_template_from_config() {
    let root = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(root.path().join("block/253:0/dm")).unwrap();

    let template = format!("{}/block/{{major}}:{{minor}}/dm", root.path().display());
    let config = common::config_file(&format!(r#"{{"dm_marker_template": "{}"}}"#, template));

    common::guestdev_with_config(config.path())
        .args(["dm", "253", "0"])
        .assert()
        .success()
        .stdout("true\n");

    common::guestdev_with_config(config.path())
        .args(["--json", "dm", "8", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""device_mapper": false"#));
}

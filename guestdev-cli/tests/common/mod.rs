#![allow(dead_code)]

use assert_cmd::Command;
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use tempfile::NamedTempFile;

/// Fresh `guestdev` command with logging kept quiet.
pub fn guestdev() -> Command {
    let bin_path = env!("CARGO_BIN_EXE_guestdev");
    let mut cmd = Command::new(bin_path);
    cmd.timeout(Duration::from_secs(30));
    cmd.env_remove("GUESTDEV_CONFIG");
    cmd.env("RUST_LOG", "error");
    cmd
}

/// Write a JSON options file and return its handle (deleted on drop).
pub fn config_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create config file");
    file.write_all(json.as_bytes())
        .expect("Failed to write config file");
    file
}

/// `guestdev` with `--config` pointing at `path`.
pub fn guestdev_with_config(path: &Path) -> Command {
    let mut cmd = guestdev();
    cmd.arg("--config").arg(path);
    cmd
}

//! Host mount table access.

use std::path::PathBuf;

use serde::Serialize;

use crate::errors::{DeviceError, DeviceResult};

/// One line of the host mount table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MountEntry {
    /// Mount source; pseudo-filesystems report their own name (`proc`, `sysfs`).
    pub device: String,
    pub mount_point: PathBuf,
    pub fs_type: String,
}

impl MountEntry {
    pub fn new(
        device: impl Into<String>,
        mount_point: impl Into<PathBuf>,
        fs_type: impl Into<String>,
    ) -> Self {
        Self {
            device: device.into(),
            mount_point: mount_point.into(),
            fs_type: fs_type.into(),
        }
    }
}

/// Source of mount entries, in the order the kernel reports them.
///
/// Later entries shadow earlier ones mounted at the same place.
pub trait MountTable {
    fn entries(&self) -> DeviceResult<Vec<MountEntry>>;
}

/// Live mount table of the current process (`/proc/self/mountinfo`).
///
/// Re-read on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcMountTable;

impl MountTable for ProcMountTable {
    fn entries(&self) -> DeviceResult<Vec<MountEntry>> {
        let process = procfs::process::Process::myself()
            .map_err(|e| DeviceError::MountTable(format!("Failed to open /proc/self: {}", e)))?;
        let infos = process
            .mountinfo()
            .map_err(|e| DeviceError::MountTable(format!("Failed to read mountinfo: {}", e)))?;

        let entries: Vec<MountEntry> = infos
            .into_iter()
            .map(|info| MountEntry {
                device: info.mount_source.unwrap_or_else(|| "none".to_string()),
                mount_point: PathBuf::from(unescape_octal(&info.mount_point.to_string_lossy())),
                fs_type: info.fs_type,
            })
            .collect();

        tracing::trace!(count = entries.len(), "Read host mount table");
        Ok(entries)
    }
}

/// Fixed list of entries, for callers that already hold a mount table.
#[derive(Debug, Clone, Default)]
pub struct StaticMountTable(Vec<MountEntry>);

impl StaticMountTable {
    pub fn new(entries: Vec<MountEntry>) -> Self {
        Self(entries)
    }
}

impl MountTable for StaticMountTable {
    fn entries(&self) -> DeviceResult<Vec<MountEntry>> {
        Ok(self.0.clone())
    }
}

/// Decode the `\040`-style escapes the kernel uses for whitespace and
/// backslashes in mount paths.
fn unescape_octal(raw: &str) -> String {
    if !raw.contains('\\') {
        return raw.to_string();
    }

    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' && i + 3 < bytes.len() && is_octal_escape(&bytes[i + 1..i + 4]) {
            let value =
                (bytes[i + 1] - b'0') * 64 + (bytes[i + 2] - b'0') * 8 + (bytes[i + 3] - b'0');
            out.push(value);
            i += 4;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn is_octal_escape(digits: &[u8]) -> bool {
    digits.len() == 3 && digits[0] <= b'3' && digits.iter().all(|d| (b'0'..=b'7').contains(d))
}

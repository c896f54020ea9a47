//! Path to backing-device resolution.
//!
//! Resolution happens in two steps:
//! 1. Walk up from the path with `stat` until `st_dev` changes; the last
//!    directory on the same device is the root of the filesystem holding
//!    the path. Bind mounts share `st_dev` with their source, so both sides
//!    of a bind resolve to the same root.
//! 2. Pick the mount-table entry whose mount point is the longest prefix
//!    of that root. Later entries override equal-length earlier ones,
//!    mirroring mount stacking.
//!
//! Because matching starts from the filesystem root rather than the path
//! itself, a bind whose source and destination sit on the same filesystem
//! (`/tmp/a` bound onto `/tmp/b`) reports the outer mount (`/tmp`), not the
//! bind's own `/tmp/b` entry. Use [`MountResolver::device_path_and_fs_type`]
//! to look up an exact mount point.

use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};

use path_clean::clean;
use serde::Serialize;

use crate::device::DeviceNumber;
use crate::errors::{DeviceError, DeviceResult};
use crate::mounts::table::{MountEntry, MountTable, ProcMountTable};

/// Host mount entry covering a resolved path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    pub mount_point: PathBuf,
    /// Mount source, e.g. `/dev/sda1`, or `proc` for pseudo-filesystems.
    pub device_path: String,
    pub fs_type: String,
    /// Device holding the path (`st_dev`).
    pub number: DeviceNumber,
}

/// Resolves host paths against the mount table.
///
/// The table is consulted on every call; results are never cached because
/// the host mount topology may change between calls.
#[derive(Debug, Clone, Default)]
pub struct MountResolver<T = ProcMountTable> {
    table: T,
}

impl MountResolver<ProcMountTable> {
    /// Resolver over the live mount table of this process.
    pub fn new() -> Self {
        Self {
            table: ProcMountTable,
        }
    }
}

impl<T: MountTable> MountResolver<T> {
    pub fn with_table(table: T) -> Self {
        Self { table }
    }

    /// Find the mount point and backing device for `path`.
    pub fn device_for_path(&self, path: impl AsRef<Path>) -> DeviceResult<DeviceInfo> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(DeviceError::InvalidArgument(
                "path cannot be empty".to_string(),
            ));
        }

        let path = normalize(path)?;
        let metadata = std::fs::metadata(&path).map_err(|e| DeviceError::from_stat(&path, e))?;
        let fs_root = filesystem_root(&path, metadata.dev())?;

        let entries = self.table.entries()?;
        let entry = longest_prefix_match(&entries, &fs_root).ok_or_else(|| {
            DeviceError::NotFound(format!("no mount covers {}", fs_root.display()))
        })?;

        let info = DeviceInfo {
            mount_point: entry.mount_point.clone(),
            device_path: entry.device.clone(),
            fs_type: entry.fs_type.clone(),
            number: DeviceNumber::from_rdev(metadata.dev()),
        };

        tracing::debug!(
            path = %path.display(),
            mount_point = %info.mount_point.display(),
            device = %info.device_path,
            number = %info.number,
            "Resolved device for path"
        );
        Ok(info)
    }

    /// Device string and filesystem type recorded for `mount_point`.
    ///
    /// `mount_point` must match a table entry exactly; the last entry
    /// mounted there wins.
    pub fn device_path_and_fs_type(
        &self,
        mount_point: impl AsRef<Path>,
    ) -> DeviceResult<(String, String)> {
        let mount_point = mount_point.as_ref();
        if mount_point.as_os_str().is_empty() {
            return Err(DeviceError::InvalidArgument(
                "mount point cannot be empty".to_string(),
            ));
        }

        let mount_point = clean(mount_point);
        let entries = self.table.entries()?;
        entries
            .iter()
            .rev()
            .find(|entry| entry.mount_point == mount_point)
            .map(|entry| (entry.device.clone(), entry.fs_type.clone()))
            .ok_or_else(|| {
                DeviceError::NotFound(format!("{} is not a mount point", mount_point.display()))
            })
    }
}

/// Absolute, lexically cleaned form of `path` with symlinks resolved.
fn normalize(path: &Path) -> DeviceResult<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| DeviceError::os("getcwd", path, e))?
            .join(path)
    };

    let cleaned = clean(&absolute);
    std::fs::canonicalize(&cleaned).map_err(|e| DeviceError::from_stat(&cleaned, e))
}

/// Topmost ancestor of `path` (inclusive) that still lives on device `dev`.
fn filesystem_root(path: &Path, dev: u64) -> DeviceResult<PathBuf> {
    let mut root = path;
    while let Some(parent) = root.parent() {
        let metadata = std::fs::metadata(parent).map_err(|e| DeviceError::from_stat(parent, e))?;
        if metadata.dev() != dev {
            break;
        }
        root = parent;
    }
    Ok(root.to_path_buf())
}

/// Entry whose mount point is the longest component-wise prefix of `path`.
///
/// The table is not assumed to be sorted; ties go to the later entry.
fn longest_prefix_match<'a>(entries: &'a [MountEntry], path: &Path) -> Option<&'a MountEntry> {
    let mut best: Option<(&MountEntry, usize)> = None;
    for entry in entries {
        if !path.starts_with(&entry.mount_point) {
            continue;
        }
        let depth = entry.mount_point.components().count();
        if best.is_none_or(|(_, best_depth)| depth >= best_depth) {
            best = Some((entry, depth));
        }
    }
    best.map(|(entry, _)| entry)
}

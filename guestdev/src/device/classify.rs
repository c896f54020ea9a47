//! Path classification: pseudo-filesystems and host device nodes.

use std::path::Path;

use path_clean::clean;

use crate::constants::host::{DEV_ROOT, SYS_ROOT};

/// Whether `path` lies inside the sysfs tree.
///
/// Pure string logic on the cleaned path; the filesystem is not touched.
pub fn is_system_mount(path: impl AsRef<Path>) -> bool {
    clean(path.as_ref()).starts_with(SYS_ROOT)
}

/// Whether `path` is the host device tree or something inside it.
///
/// Regular files under `/dev` are not devices. Entries that cannot be
/// stat'ed are reported as `false`.
pub fn is_host_device(path: impl AsRef<Path>) -> bool {
    let path = clean(path.as_ref());
    if path == Path::new(DEV_ROOT) {
        return true;
    }
    if !path.starts_with(DEV_ROOT) {
        return false;
    }

    match std::fs::metadata(&path) {
        Ok(metadata) => !metadata.file_type().is_file(),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Cannot stat path under /dev");
            false
        }
    }
}

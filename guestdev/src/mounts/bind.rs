//! Bind mounts using mount(2).
//!
//! Requires CAP_SYS_ADMIN in the caller's mount namespace.

use std::fs::{DirBuilder, OpenOptions};
use std::io;
use std::os::unix::fs::DirBuilderExt;
use std::path::Path;
use std::str::FromStr;

use nix::errno::Errno;
use nix::mount::{MntFlags, MsFlags, mount, umount2};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::constants::host::MOUNT_PERM;
use crate::errors::{DeviceError, DeviceResult};
use crate::options::DeviceOptions;

/// Mount propagation applied to the destination after binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Propagation {
    Private,
    Shared,
    Slave,
    Unbindable,
}

impl Propagation {
    fn flags(self) -> MsFlags {
        match self {
            Self::Private => MsFlags::MS_PRIVATE,
            Self::Shared => MsFlags::MS_SHARED,
            Self::Slave => MsFlags::MS_SLAVE,
            Self::Unbindable => MsFlags::MS_UNBINDABLE,
        }
    }
}

impl FromStr for Propagation {
    type Err = DeviceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "private" => Ok(Self::Private),
            "shared" => Ok(Self::Shared),
            "slave" => Ok(Self::Slave),
            "unbindable" => Ok(Self::Unbindable),
            other => Err(DeviceError::InvalidArgument(format!(
                "unknown propagation type: {}",
                other
            ))),
        }
    }
}

/// Configuration for creating a bind mount.
#[derive(Debug, Clone)]
pub struct BindMountConfig<'a> {
    pub source: &'a Path,
    pub target: &'a Path,
    pub read_only: bool,
    pub propagation: Option<Propagation>,
}

impl<'a> BindMountConfig<'a> {
    pub fn new(source: &'a Path, target: &'a Path) -> Self {
        Self {
            source,
            target,
            read_only: false,
            propagation: None,
        }
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn propagation(mut self, propagation: Propagation) -> Self {
        self.propagation = Some(propagation);
        self
    }
}

/// Creates bind mounts, preparing destinations with the configured mode.
#[derive(Debug, Clone, Copy)]
pub struct BindMounter {
    mount_perm: u32,
}

impl BindMounter {
    pub fn new(mount_perm: u32) -> Self {
        Self { mount_perm }
    }

    pub fn from_options(options: &DeviceOptions) -> Self {
        Self::new(options.mount_perm)
    }

    /// Bind `source` onto `destination`, optionally read-only.
    pub fn bind_mount(
        &self,
        source: impl AsRef<Path>,
        destination: impl AsRef<Path>,
        read_only: bool,
    ) -> DeviceResult<()> {
        let mut config = BindMountConfig::new(source.as_ref(), destination.as_ref());
        if read_only {
            config = config.read_only();
        }
        self.mount(&config)
    }

    /// Create the bind mount described by `config`.
    ///
    /// If a step after the initial bind fails, the bind is detached before
    /// the error is returned.
    pub fn mount(&self, config: &BindMountConfig<'_>) -> DeviceResult<()> {
        let source = std::fs::canonicalize(config.source)
            .map_err(|e| DeviceError::from_stat(config.source, e))?;
        let target = config.target;

        self.ensure_destination(&source, target)?;
        create_bind_mount(&source, target)?;

        if let Some(propagation) = config.propagation {
            set_propagation(target, propagation)?;
        }

        if config.read_only {
            remount_read_only(target)?;
        }

        debug!(
            source = %source.display(),
            target = %target.display(),
            read_only = config.read_only,
            propagation = ?config.propagation,
            "Bind mount created"
        );
        Ok(())
    }

    /// Make sure `target` exists with the same kind as `source`: a directory
    /// for directories, an empty file otherwise.
    fn ensure_destination(&self, source: &Path, target: &Path) -> DeviceResult<()> {
        let metadata = std::fs::metadata(source).map_err(|e| DeviceError::from_stat(source, e))?;

        let mut builder = DirBuilder::new();
        builder.recursive(true).mode(self.mount_perm);

        if metadata.is_dir() {
            return builder
                .create(target)
                .map_err(|e| DeviceError::os("mkdir", target, e));
        }

        if let Some(parent) = target.parent() {
            builder
                .create(parent)
                .map_err(|e| DeviceError::os("mkdir", parent, e))?;
        }
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(target)
            .map(drop)
            .map_err(|e| DeviceError::os("create", target, e))
    }
}

impl Default for BindMounter {
    fn default() -> Self {
        Self::new(MOUNT_PERM)
    }
}

/// Detach the mount at `target`.
///
/// A target that is not mounted, or does not exist, is not an error.
pub fn unmount(target: impl AsRef<Path>) -> DeviceResult<()> {
    let target = target.as_ref();
    match umount2(target, MntFlags::MNT_DETACH) {
        Ok(()) => {
            debug!(target = %target.display(), "Unmounted");
            Ok(())
        }
        Err(Errno::EINVAL) | Err(Errno::ENOENT) => Ok(()),
        Err(e) => Err(DeviceError::os("umount", target, io::Error::from(e))),
    }
}

// ============================================================================
// Helper functions
// ============================================================================

fn create_bind_mount(source: &Path, target: &Path) -> DeviceResult<()> {
    mount(
        Some(source),
        target,
        None::<&str>,
        MsFlags::MS_BIND,
        None::<&str>,
    )
    .map_err(|e| DeviceError::os("bind mount", target, io::Error::from(e)))
}

fn set_propagation(target: &Path, propagation: Propagation) -> DeviceResult<()> {
    finish_or_detach(target, "set propagation", || {
        mount(
            None::<&str>,
            target,
            None::<&str>,
            propagation.flags(),
            None::<&str>,
        )
    })
}

fn remount_read_only(target: &Path) -> DeviceResult<()> {
    finish_or_detach(target, "remount read-only", || {
        mount(
            None::<&str>,
            target,
            None::<&str>,
            MsFlags::MS_BIND | MsFlags::MS_REMOUNT | MsFlags::MS_RDONLY,
            None::<&str>,
        )
    })
}

/// Run a follow-up `step` on a freshly bound `target`.
///
/// On failure the bind at `target` is detached and the step's error is
/// returned as `op` on `target`, so no half-configured mount is left behind.
pub fn finish_or_detach(
    target: &Path,
    op: &'static str,
    step: impl FnOnce() -> nix::Result<()>,
) -> DeviceResult<()> {
    step().map_err(|e| {
        detach(target);
        DeviceError::os(op, target, io::Error::from(e))
    })
}

/// Undo a half-finished bind.
fn detach(target: &Path) {
    if let Err(e) = umount2(target, MntFlags::MNT_DETACH) {
        warn!(
            target = %target.display(),
            error = %e,
            "Failed to detach bind mount during cleanup"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    #[test]
    fn test_propagation_from_str() {
        assert_eq!("shared".parse::<Propagation>().unwrap(), Propagation::Shared);
        assert_eq!("slave".parse::<Propagation>().unwrap(), Propagation::Slave);
        assert_eq!("private".parse::<Propagation>().unwrap(), Propagation::Private);
        assert_eq!(
            "unbindable".parse::<Propagation>().unwrap(),
            Propagation::Unbindable
        );
        assert!(matches!(
            "rshared".parse::<Propagation>(),
            Err(DeviceError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_config_builder() {
        let config = BindMountConfig::new(Path::new("/a"), Path::new("/b"))
            .read_only()
            .propagation(Propagation::Slave);
        assert!(config.read_only);
        assert_eq!(config.propagation, Some(Propagation::Slave));
    }

    #[test]
    fn test_ensure_destination_for_directory() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("src");
        std::fs::create_dir(&source).unwrap();
        let target = dir.path().join("nested/dest");

        BindMounter::new(0o700)
            .ensure_destination(&source, &target)
            .unwrap();

        let metadata = std::fs::metadata(&target).unwrap();
        assert!(metadata.is_dir());
        assert_eq!(metadata.permissions().mode() & 0o777, 0o700);
    }

    #[test]
    fn test_ensure_destination_for_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("config.json");
        std::fs::write(&source, b"{}").unwrap();
        let target = dir.path().join("guest/etc/config.json");

        BindMounter::default()
            .ensure_destination(&source, &target)
            .unwrap();

        let metadata = std::fs::metadata(&target).unwrap();
        assert!(metadata.is_file());
        assert_eq!(metadata.len(), 0);
    }

    #[test]
    fn test_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let err = BindMounter::default()
            .bind_mount(dir.path().join("missing"), dir.path().join("dest"), false)
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_unmount_not_mounted_is_ok() {
        if !nix::unistd::geteuid().is_root() {
            eprintln!("skipping: umount2 requires root");
            return;
        }

        let dir = tempfile::tempdir().unwrap();
        unmount(dir.path()).unwrap();
        unmount(dir.path().join("missing")).unwrap();
    }
}

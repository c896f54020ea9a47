//! Linux device number decoding.

use std::fmt;
use std::os::unix::fs::{FileTypeExt, MetadataExt};
use std::path::Path;

use serde::Serialize;

use crate::errors::{DeviceError, DeviceResult};

/// Extract the major number from a raw device identifier.
///
/// Matches the kernel's `MAJOR()` for the classic 32-bit encoding.
#[inline]
pub fn major(rdev: u64) -> u32 {
    ((rdev >> 8) & 0xfff) as u32
}

/// Extract the minor number from a raw device identifier.
///
/// The low 8 bits plus the 12 bits starting at bit 20.
#[inline]
pub fn minor(rdev: u64) -> u32 {
    ((rdev & 0xff) | ((rdev >> 12) & 0xfff00)) as u32
}

/// A (major, minor) device number pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DeviceNumber {
    pub major: u32,
    pub minor: u32,
}

impl DeviceNumber {
    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Decode a raw `dev_t` value.
    pub fn from_rdev(rdev: u64) -> Self {
        Self {
            major: major(rdev),
            minor: minor(rdev),
        }
    }

    /// Device number a device node represents (`st_rdev`).
    ///
    /// Fails with [`DeviceError::InvalidArgument`] when `path` is not a
    /// character or block special file.
    pub fn of_node(path: impl AsRef<Path>) -> DeviceResult<Self> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path).map_err(|e| DeviceError::from_stat(path, e))?;

        let file_type = metadata.file_type();
        if !file_type.is_char_device() && !file_type.is_block_device() {
            return Err(DeviceError::InvalidArgument(format!(
                "{} is not a device node",
                path.display()
            )));
        }

        Ok(Self::from_rdev(metadata.rdev()))
    }

    /// Device number of the filesystem holding `path` (`st_dev`).
    pub fn of_path(path: impl AsRef<Path>) -> DeviceResult<Self> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path).map_err(|e| DeviceError::from_stat(path, e))?;
        Ok(Self::from_rdev(metadata.dev()))
    }
}

impl fmt::Display for DeviceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.major, self.minor)
    }
}

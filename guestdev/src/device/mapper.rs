//! Device-mapper detection via sysfs.

use std::io;
use std::path::PathBuf;

use crate::constants::host::DM_MARKER_TEMPLATE;
use crate::device::DeviceNumber;
use crate::errors::{DeviceError, DeviceResult};
use crate::options::DeviceOptions;

/// Detects device-mapper devices (LVM, dm-crypt, ...) by probing sysfs.
///
/// The probed path comes from a template so tests and alternate roots can
/// point it elsewhere.
#[derive(Debug, Clone)]
pub struct DeviceMapperDetector {
    marker_template: String,
}

impl DeviceMapperDetector {
    /// Create a detector probing `marker_template`, where `{major}` and
    /// `{minor}` are substituted.
    pub fn new(marker_template: impl Into<String>) -> Self {
        Self {
            marker_template: marker_template.into(),
        }
    }

    pub fn from_options(options: &DeviceOptions) -> Self {
        Self::new(options.dm_marker_template.clone())
    }

    /// Path probed for the given device.
    pub fn marker_path(&self, major: u32, minor: u32) -> PathBuf {
        PathBuf::from(
            self.marker_template
                .replace("{major}", &major.to_string())
                .replace("{minor}", &minor.to_string()),
        )
    }

    /// Whether (major, minor) is a device-mapper device.
    ///
    /// A missing marker is a plain `false`; only unexpected I/O failures
    /// are errors.
    pub fn is_device_mapper(&self, major: u32, minor: u32) -> DeviceResult<bool> {
        let marker = self.marker_path(major, minor);
        match std::fs::metadata(&marker) {
            Ok(_) => {
                tracing::debug!(major, minor, marker = %marker.display(), "Device-mapper device");
                Ok(true)
            }
            Err(e) if is_absent(&e) => Ok(false),
            Err(e) => Err(DeviceError::os("stat", marker, e)),
        }
    }

    pub fn is_device_mapper_number(&self, number: DeviceNumber) -> DeviceResult<bool> {
        self.is_device_mapper(number.major, number.minor)
    }
}

impl Default for DeviceMapperDetector {
    fn default() -> Self {
        Self::new(DM_MARKER_TEMPLATE)
    }
}

fn is_absent(e: &io::Error) -> bool {
    e.kind() == io::ErrorKind::NotFound || e.raw_os_error() == Some(libc::ENOTDIR)
}

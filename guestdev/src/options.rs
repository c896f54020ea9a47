//! Configuration for device resolution and guest addressing.

use crate::constants::{host, virtio_scsi};
use crate::errors::{DeviceError, DeviceResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables for the resolver, the addressers and the bind mounter.
///
/// Every field has a default, so a config file only needs to name the
/// values it overrides.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceOptions {
    /// Upper bound on the virtio-SCSI attachment index.
    ///
    /// Default: 65535
    #[serde(default = "default_max_scsi_devices")]
    pub max_scsi_devices: u32,

    /// Path template probed to detect device-mapper devices.
    ///
    /// `{major}` and `{minor}` are replaced with the device numbers.
    /// Default: `/sys/dev/block/{major}:{minor}/dm`
    #[serde(default = "default_dm_marker_template")]
    pub dm_marker_template: String,

    /// Permission bits used when creating bind-mount destinations.
    ///
    /// Default: 0o750
    #[serde(default = "default_mount_perm")]
    pub mount_perm: u32,
}

fn default_max_scsi_devices() -> u32 {
    virtio_scsi::MAX_SCSI_DEVICES
}

fn default_dm_marker_template() -> String {
    host::DM_MARKER_TEMPLATE.to_string()
}

fn default_mount_perm() -> u32 {
    host::MOUNT_PERM
}

impl Default for DeviceOptions {
    fn default() -> Self {
        Self {
            max_scsi_devices: default_max_scsi_devices(),
            dm_marker_template: default_dm_marker_template(),
            mount_perm: default_mount_perm(),
        }
    }
}

impl DeviceOptions {
    /// Load options from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> DeviceResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            DeviceError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&raw).map_err(|e| DeviceError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Parse options from a JSON document.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let opts = DeviceOptions::default();
        assert_eq!(opts.max_scsi_devices, 65535);
        assert_eq!(opts.dm_marker_template, "/sys/dev/block/{major}:{minor}/dm");
        assert_eq!(opts.mount_perm, 0o750);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let opts = DeviceOptions::from_json(r#"{"max_scsi_devices": 512}"#).unwrap();
        assert_eq!(opts.max_scsi_devices, 512);
        assert_eq!(opts.mount_perm, 0o750);
        assert_eq!(opts.dm_marker_template, DeviceOptions::default().dm_marker_template);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"dm_marker_template": "/tmp/sys/{{major}}:{{minor}}/dm", "mount_perm": 448}}"#
        )
        .unwrap();

        let opts = DeviceOptions::from_file(file.path()).unwrap();
        assert_eq!(opts.dm_marker_template, "/tmp/sys/{major}:{minor}/dm");
        assert_eq!(opts.mount_perm, 0o700);
        assert_eq!(opts.max_scsi_devices, 65535);
    }

    #[test]
    fn test_from_file_errors() {
        let err = DeviceOptions::from_file("/no/such/guestdev.json").unwrap_err();
        assert!(matches!(err, DeviceError::Config(_)));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = DeviceOptions::from_file(file.path()).unwrap_err();
        assert!(matches!(err, DeviceError::Config(_)));
    }
}

//! virtio-blk drive naming.

use std::fmt;

use serde::Serialize;

use crate::constants::virtio_blk::{ALPHABET_LEN, DRIVE_PREFIX};
use crate::errors::{DeviceError, DeviceResult};

/// Linux virtio-blk drive name (vda, vdb, ..., vdz, vdaa, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DriveName(String);

impl DriveName {
    /// Name for attachment `index` (0 = vda, 25 = vdz, 26 = vdaa).
    ///
    /// Suffixes follow bijective base-26, like spreadsheet columns: there is
    /// no "zero" letter, so `z` is followed by `aa`, not `ba`.
    pub fn from_index(index: u64) -> Self {
        let mut suffix = Vec::new();
        let mut n = index;
        loop {
            suffix.push(b'a' + (n % ALPHABET_LEN) as u8);
            n /= ALPHABET_LEN;
            if n == 0 {
                break;
            }
            n -= 1;
        }
        suffix.reverse();

        let mut name = String::with_capacity(DRIVE_PREFIX.len() + suffix.len());
        name.push_str(DRIVE_PREFIX);
        name.extend(suffix.into_iter().map(char::from));
        Self(name)
    }

    /// Get the drive name (e.g., "vda").
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the device path in guest (e.g., "/dev/vda").
    pub fn device_path(&self) -> String {
        format!("/dev/{}", self.0)
    }
}

impl fmt::Display for DriveName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Drive name for an attachment index handed out by the orchestrator.
///
/// Fails with [`DeviceError::InvalidArgument`] on a negative index.
pub fn virt_drive_name(index: i64) -> DeviceResult<DriveName> {
    let index = u64::try_from(index).map_err(|_| {
        DeviceError::InvalidArgument(format!("drive index must be non-negative, got {}", index))
    })?;
    Ok(DriveName::from_index(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_virt_drive_name() {
        let cases = [
            (0, "vda"),
            (1, "vdb"),
            (25, "vdz"),
            (26, "vdaa"),
            (27, "vdab"),
            (51, "vdaz"),
            (52, "vdba"),
            (701, "vdzz"),
            (702, "vdaaa"),
            (704, "vdaac"),
            (18277, "vdzzz"),
            (18278, "vdaaaa"),
        ];

        for (index, expected) in cases {
            assert_eq!(virt_drive_name(index).unwrap().as_str(), expected, "index {}", index);
        }
    }

    #[test]
    fn test_negative_index_rejected() {
        let err = virt_drive_name(-1).unwrap_err();
        assert!(matches!(err, DeviceError::InvalidArgument(_)));
    }

    #[test]
    fn test_device_path() {
        let name = DriveName::from_index(2);
        assert_eq!(name.device_path(), "/dev/vdc");
        assert_eq!(name.to_string(), "vdc");
    }

    proptest! {
        #[test]
        fn distinct_indices_get_distinct_names(a in 0u64..1_000_000, b in 0u64..1_000_000) {
            prop_assume!(a != b);
            prop_assert_ne!(DriveName::from_index(a), DriveName::from_index(b));
        }

        #[test]
        fn names_never_shrink(index in 0u64..1_000_000) {
            let here = DriveName::from_index(index);
            let next = DriveName::from_index(index + 1);
            prop_assert!(next.as_str().len() >= here.as_str().len());
            prop_assert!(here.as_str().bytes().skip(2).all(|b| b.is_ascii_lowercase()));
        }
    }
}

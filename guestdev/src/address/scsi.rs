//! virtio-SCSI target/lun addressing.

use std::fmt;

use serde::Serialize;

use crate::constants::virtio_scsi::{LUNS_PER_TARGET, MAX_SCSI_DEVICES};
use crate::errors::{DeviceError, DeviceResult};
use crate::options::DeviceOptions;

/// A SCSI (target id, lun) pair, rendered as `"<scsi_id>:<lun>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ScsiAddress {
    pub scsi_id: u32,
    pub lun: u32,
}

impl fmt::Display for ScsiAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.scsi_id, self.lun)
    }
}

/// Maps attachment indices onto virtio-SCSI addresses.
///
/// Each target exposes [`LUNS_PER_TARGET`] luns; indices fill a target
/// before moving on to the next one.
#[derive(Debug, Clone, Copy)]
pub struct ScsiAddresser {
    max_devices: u32,
}

impl ScsiAddresser {
    pub fn new(max_devices: u32) -> Self {
        Self { max_devices }
    }

    pub fn from_options(options: &DeviceOptions) -> Self {
        Self::new(options.max_scsi_devices)
    }

    /// Largest index this addresser accepts.
    pub fn max_devices(&self) -> u32 {
        self.max_devices
    }

    /// (scsi_id, lun) for `index`.
    ///
    /// Running out of slots is a hard failure; the index is never wrapped
    /// or truncated.
    pub fn scsi_id_lun(&self, index: i64) -> DeviceResult<(u32, u32)> {
        if index < 0 || index > i64::from(self.max_devices) {
            return Err(DeviceError::InvalidArgument(format!(
                "SCSI index {} out of range [0, {}]",
                index, self.max_devices
            )));
        }

        let index = index as u32;
        Ok((index / LUNS_PER_TARGET, index % LUNS_PER_TARGET))
    }

    pub fn address(&self, index: i64) -> DeviceResult<ScsiAddress> {
        let (scsi_id, lun) = self.scsi_id_lun(index)?;
        Ok(ScsiAddress { scsi_id, lun })
    }

    /// Canonical `"scsi_id:lun"` string for `index`.
    pub fn scsi_address(&self, index: i64) -> DeviceResult<String> {
        self.address(index).map(|addr| addr.to_string())
    }
}

impl Default for ScsiAddresser {
    fn default() -> Self {
        Self::new(MAX_SCSI_DEVICES)
    }
}

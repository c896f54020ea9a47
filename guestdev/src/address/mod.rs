//! Guest-visible device addressing.
//!
//! Addresses are pure functions of the attachment index, so the runtime can
//! compute them before the guest ever sees the device:
//! - [`drive`]: virtio-blk names (`vda`, ..., `vdz`, `vdaa`, ...)
//! - [`scsi`]: virtio-SCSI `id:lun` pairs

pub mod drive;
pub mod scsi;

pub use drive::{DriveName, virt_drive_name};
pub use scsi::{ScsiAddress, ScsiAddresser};

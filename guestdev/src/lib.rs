//! guestdev - host block device resolution and guest device addressing.
//!
//! Before a host path is attached to a VM sandbox as a block device, the
//! runtime needs to know which host device backs it and which name the
//! guest kernel will give it. This crate answers both questions without
//! any help from the guest:
//!
//! - [`mounts`]: resolve a path to its mount point and backing device, and
//!   create bind mounts
//! - [`device`]: decode device numbers, classify `/sys` and `/dev` paths,
//!   detect device-mapper devices
//! - [`address`]: virtio-blk drive names and virtio-SCSI `id:lun` pairs
//!
//! ```ignore
//! use guestdev::{MountResolver, ScsiAddresser, virt_drive_name};
//!
//! let info = MountResolver::new().device_for_path("/var/lib/images")?;
//! let drive = virt_drive_name(index)?;          // "vdc"
//! let scsi = ScsiAddresser::default().scsi_address(index)?; // "0:2"
//! ```

pub mod address;
pub mod constants;
pub mod device;
pub mod errors;
pub mod mounts;
pub mod options;

pub use address::{DriveName, ScsiAddress, ScsiAddresser, virt_drive_name};
pub use device::{DeviceMapperDetector, DeviceNumber, is_host_device, is_system_mount};
pub use errors::{DeviceError, DeviceResult};
pub use mounts::{
    BindMountConfig, BindMounter, DeviceInfo, MountEntry, MountResolver, MountTable,
    ProcMountTable, Propagation, StaticMountTable, finish_or_detach, unmount,
};
pub use options::DeviceOptions;

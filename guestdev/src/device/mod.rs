//! Host device inspection.
//!
//! - [`number`]: `dev_t` decoding
//! - [`classify`]: sysfs / host device path checks
//! - [`mapper`]: device-mapper detection

pub mod classify;
pub mod mapper;
pub mod number;

pub use classify::{is_host_device, is_system_mount};
pub use mapper::DeviceMapperDetector;
pub use number::{DeviceNumber, major, minor};

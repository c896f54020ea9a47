//! Host mount topology.
//!
//! - [`table`]: mount table sources (live `/proc/self/mountinfo` or a fixed list)
//! - [`resolver`]: path → mount point / backing device
//! - [`bind`]: bind mount creation and teardown

pub mod bind;
pub mod resolver;
pub mod table;

pub use bind::{BindMountConfig, BindMounter, Propagation, finish_or_detach, unmount};
pub use resolver::{DeviceInfo, MountResolver};
pub use table::{MountEntry, MountTable, ProcMountTable, StaticMountTable};

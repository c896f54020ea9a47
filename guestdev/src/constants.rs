//! Host and guest naming constants.
//!
//! Centralized location for the values the guest kernel and the runtime
//! must agree on.

/// virtio-blk drive naming
pub mod virtio_blk {
    /// Prefix of every guest virtio-blk disk name (`vda`, `vdb`, ...)
    pub const DRIVE_PREFIX: &str = "vd";

    /// Number of letters available per drive-name position
    pub const ALPHABET_LEN: u64 = 26;
}

/// virtio-SCSI addressing
pub mod virtio_scsi {
    /// Logical units exposed per SCSI target
    pub const LUNS_PER_TARGET: u32 = 256;

    /// Default cap on addressable attachment slots across all targets
    pub const MAX_SCSI_DEVICES: u32 = 65535;
}

/// Host filesystem locations
pub mod host {
    /// Root of the system-information pseudo-filesystem
    pub const SYS_ROOT: &str = "/sys";

    /// Root of the host device tree
    pub const DEV_ROOT: &str = "/dev";

    /// Device-mapper marker for a block device; `{major}` and `{minor}` are substituted
    pub const DM_MARKER_TEMPLATE: &str = "/sys/dev/block/{major}:{minor}/dm";

    /// Permission bits for bind-mount destination directories
    pub const MOUNT_PERM: u32 = 0o750;
}

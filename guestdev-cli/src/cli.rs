use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use guestdev::DeviceOptions;
use serde::Serialize;

use crate::commands;

/// Resolve host block devices and assign guest device addresses.
#[derive(Parser, Debug)]
#[command(name = "guestdev", version, about)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalFlags,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug)]
pub struct GlobalFlags {
    /// JSON file with device options (max_scsi_devices, dm_marker_template, mount_perm)
    #[arg(long, global = true, env = "GUESTDEV_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl GlobalFlags {
    pub fn options(&self) -> anyhow::Result<DeviceOptions> {
        match &self.config {
            Some(path) => Ok(DeviceOptions::from_file(path)?),
            None => Ok(DeviceOptions::default()),
        }
    }

    /// Print `value` as JSON when `--json` is set, otherwise print `text`.
    pub fn emit<T: Serialize>(
        &self,
        value: &T,
        text: impl FnOnce() -> String,
    ) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            println!("{}", text());
        }
        Ok(())
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the mount point and backing device of a path
    Resolve(commands::resolve::ResolveArgs),
    /// Show the device and filesystem type mounted at a mount point
    Fstype(commands::resolve::FstypeArgs),
    /// Check whether a path is under /sys or is a host device
    Classify(commands::inspect::ClassifyArgs),
    /// Show the major:minor number of a device node
    Devnum(commands::inspect::DevnumArgs),
    /// Check whether a device is a device-mapper device
    Dm(commands::inspect::DmArgs),
    /// Show the virtio-blk drive name for an attachment index
    Drive(commands::address::DriveArgs),
    /// Show the virtio-SCSI address for an attachment index
    Scsi(commands::address::ScsiArgs),
    /// Bind mount a source onto a destination
    Bind(commands::mount::BindArgs),
    /// Detach a mount
    Unmount(commands::mount::UnmountArgs),
}

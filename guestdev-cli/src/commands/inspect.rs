use std::path::PathBuf;

use clap::Args;
use guestdev::{DeviceMapperDetector, DeviceNumber, is_host_device, is_system_mount};
use serde::Serialize;

use crate::cli::GlobalFlags;

#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Path to classify
    pub path: PathBuf,
}

#[derive(Args, Debug)]
pub struct DevnumArgs {
    /// Character or block device node
    pub device: PathBuf,
}

#[derive(Args, Debug)]
pub struct DmArgs {
    /// Device major number
    pub major: u32,

    /// Device minor number
    pub minor: u32,
}

#[derive(Serialize)]
struct ClassifyOutput {
    system_mount: bool,
    host_device: bool,
}

#[derive(Serialize)]
struct DmOutput {
    major: u32,
    minor: u32,
    device_mapper: bool,
}

pub fn execute_classify(args: ClassifyArgs, global: &GlobalFlags) -> anyhow::Result<()> {
    let output = ClassifyOutput {
        system_mount: is_system_mount(&args.path),
        host_device: is_host_device(&args.path),
    };

    global.emit(&output, || {
        format!(
            "system_mount={} host_device={}",
            output.system_mount, output.host_device
        )
    })
}

pub fn execute_devnum(args: DevnumArgs, global: &GlobalFlags) -> anyhow::Result<()> {
    let number = DeviceNumber::of_node(&args.device)?;
    global.emit(&number, || number.to_string())
}

pub fn execute_dm(args: DmArgs, global: &GlobalFlags) -> anyhow::Result<()> {
    let detector = DeviceMapperDetector::from_options(&global.options()?);
    let output = DmOutput {
        major: args.major,
        minor: args.minor,
        device_mapper: detector.is_device_mapper(args.major, args.minor)?,
    };

    global.emit(&output, || output.device_mapper.to_string())
}

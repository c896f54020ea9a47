use clap::Args;
use guestdev::{ScsiAddresser, virt_drive_name};
use serde::Serialize;

use crate::cli::GlobalFlags;

#[derive(Args, Debug)]
pub struct DriveArgs {
    /// Attachment index allocated for the disk
    #[arg(allow_negative_numbers = true)]
    pub index: i64,
}

#[derive(Args, Debug)]
pub struct ScsiArgs {
    /// Attachment index allocated for the disk
    #[arg(allow_negative_numbers = true)]
    pub index: i64,
}

#[derive(Serialize)]
struct DriveOutput {
    index: i64,
    name: String,
    device_path: String,
}

#[derive(Serialize)]
struct ScsiOutput {
    index: i64,
    scsi_id: u32,
    lun: u32,
    address: String,
}

pub fn execute_drive(args: DriveArgs, global: &GlobalFlags) -> anyhow::Result<()> {
    let name = virt_drive_name(args.index)?;
    let output = DriveOutput {
        index: args.index,
        name: name.as_str().to_string(),
        device_path: name.device_path(),
    };

    global.emit(&output, || output.name.clone())
}

pub fn execute_scsi(args: ScsiArgs, global: &GlobalFlags) -> anyhow::Result<()> {
    let addresser = ScsiAddresser::from_options(&global.options()?);
    let address = addresser.address(args.index)?;
    let output = ScsiOutput {
        index: args.index,
        scsi_id: address.scsi_id,
        lun: address.lun,
        address: address.to_string(),
    };

    global.emit(&output, || output.address.clone())
}

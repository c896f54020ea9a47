use std::path::PathBuf;

use clap::Args;
use guestdev::MountResolver;
use serde::Serialize;

use crate::cli::GlobalFlags;

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Host path to resolve
    pub path: PathBuf,
}

#[derive(Args, Debug)]
pub struct FstypeArgs {
    /// Mount point as listed in the mount table
    pub mount_point: PathBuf,
}

#[derive(Serialize)]
struct FstypeOutput {
    device: String,
    fs_type: String,
}

pub fn execute(args: ResolveArgs, global: &GlobalFlags) -> anyhow::Result<()> {
    let info = MountResolver::new().device_for_path(&args.path)?;

    global.emit(&info, || {
        format!(
            "{}\t{}\t{}\t{}",
            info.mount_point.display(),
            info.device_path,
            info.fs_type,
            info.number
        )
    })
}

pub fn execute_fstype(args: FstypeArgs, global: &GlobalFlags) -> anyhow::Result<()> {
    let (device, fs_type) = MountResolver::new().device_path_and_fs_type(&args.mount_point)?;
    let output = FstypeOutput { device, fs_type };

    global.emit(&output, || format!("{}\t{}", output.device, output.fs_type))
}

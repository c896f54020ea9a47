use std::path::PathBuf;

use clap::Args;
use guestdev::{BindMountConfig, BindMounter, Propagation, unmount};

use crate::cli::GlobalFlags;

#[derive(Args, Debug)]
pub struct BindArgs {
    /// Directory or file to expose
    pub source: PathBuf,

    /// Where to mount it
    pub destination: PathBuf,

    /// Remount the destination read-only
    #[arg(long)]
    pub read_only: bool,

    /// Propagation type: private, shared, slave or unbindable
    #[arg(long)]
    pub propagation: Option<Propagation>,
}

#[derive(Args, Debug)]
pub struct UnmountArgs {
    /// Mount to detach
    pub target: PathBuf,
}

pub fn execute_bind(args: BindArgs, global: &GlobalFlags) -> anyhow::Result<()> {
    let mounter = BindMounter::from_options(&global.options()?);

    let mut config = BindMountConfig::new(&args.source, &args.destination);
    if args.read_only {
        config = config.read_only();
    }
    if let Some(propagation) = args.propagation {
        config = config.propagation(propagation);
    }
    mounter.mount(&config)?;

    println!("{}", args.destination.display());
    Ok(())
}

pub fn execute_unmount(args: UnmountArgs, _global: &GlobalFlags) -> anyhow::Result<()> {
    unmount(&args.target)?;
    println!("{}", args.target.display());
    Ok(())
}

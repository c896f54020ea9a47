mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let global = &cli.global;
    tracing::debug!(command = ?cli.command, config = ?global.config, "Running command");

    match cli.command {
        Command::Resolve(args) => commands::resolve::execute(args, global),
        Command::Fstype(args) => commands::resolve::execute_fstype(args, global),
        Command::Classify(args) => commands::inspect::execute_classify(args, global),
        Command::Devnum(args) => commands::inspect::execute_devnum(args, global),
        Command::Dm(args) => commands::inspect::execute_dm(args, global),
        Command::Drive(args) => commands::address::execute_drive(args, global),
        Command::Scsi(args) => commands::address::execute_scsi(args, global),
        Command::Bind(args) => commands::mount::execute_bind(args, global),
        Command::Unmount(args) => commands::mount::execute_unmount(args, global),
    }
}

fn init_tracing(verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    if let Err(e) = tracing_subscriber::fmt()
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter)
        .try_init()
    {
        eprintln!("[WARN] Failed to initialize tracing: {}", e);
    }
}

//! grsync — run rsync from saved, strongly-typed profiles.
//!
//! # Usage
//!
//! ```text
//! grsync run <profile> [--rsync-bin <program>]
//! grsync run --file <path.yaml>
//! grsync args <profile> | --file <path.yaml>
//! grsync profile list
//! grsync profile show <name>
//! grsync profile add <name> <source> <destination> [--archive] [--exclude <pattern>]...
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{args::ArgsArgs, profile::ProfileCommand, run::RunArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "grsync",
    version,
    about = "Run rsync from saved, strongly-typed profiles",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run rsync for a profile, streaming its output.
    Run(RunArgs),

    /// Print the argv rsync would receive, one token per line.
    Args(ArgsArgs),

    /// Manage saved profiles.
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Run(args) => args.run(),
        Commands::Args(args) => args.run(),
        Commands::Profile { command } => commands::profile::run(command),
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

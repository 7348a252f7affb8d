//! `grsync profile` — list, show, and add saved profiles.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use grsync_core::profile::{self as store, Profile, ProfileName};
use grsync_core::RsyncOptions;

use super::home;

/// Subcommands for `grsync profile`.
#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    /// List saved profiles.
    List,

    /// Show a profile's paths and compiled rsync arguments.
    Show {
        /// Profile name.
        name: String,
    },

    /// Save a new profile. Edit the YAML afterwards for the full option set.
    Add(AddArgs),
}

/// Arguments for `grsync profile add`.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Profile name (file stem under ~/.grsync/profiles/).
    pub name: String,

    /// Source path, passed to rsync verbatim.
    pub source: PathBuf,

    /// Destination directory.
    pub destination: PathBuf,

    /// Archive mode (-rlptgoD).
    #[arg(long)]
    pub archive: bool,

    /// Compress file data during the transfer.
    #[arg(long)]
    pub compress: bool,

    /// Delete extraneous files from the destination.
    #[arg(long)]
    pub delete: bool,

    /// Exclude pattern; repeat for several.
    #[arg(long, value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Overwrite an existing profile with the same name.
    #[arg(long)]
    pub force: bool,
}

pub fn run(command: ProfileCommand) -> Result<()> {
    match command {
        ProfileCommand::List => list(),
        ProfileCommand::Show { name } => show(&name),
        ProfileCommand::Add(args) => add(args),
    }
}

fn list() -> Result<()> {
    let names = store::list_profiles_at(&home()?).context("failed to list profiles")?;
    if names.is_empty() {
        println!("No profiles saved. Run `grsync profile add` first.");
        return Ok(());
    }
    for name in names {
        println!("{name}");
    }
    Ok(())
}

fn show(name: &str) -> Result<()> {
    let loaded = store::load_profile_at(&home()?, &ProfileName::from(name))
        .with_context(|| format!("could not load profile '{name}'"))?;
    let rsync = loaded.to_rsync();

    println!("{name}");
    println!("  source:      {}", loaded.source.display());
    println!("  destination: {}", loaded.destination.display());
    println!("  args:        {}", rsync.args().join(" "));
    Ok(())
}

fn add(args: AddArgs) -> Result<()> {
    let home = home()?;
    let name = ProfileName::from(args.name);
    name.validate()?;
    if store::profile_path_at(&home, &name).exists() && !args.force {
        bail!("profile '{name}' already exists; pass --force to overwrite");
    }

    let new_profile = Profile {
        source: args.source,
        destination: args.destination,
        options: RsyncOptions {
            archive: args.archive,
            compress: args.compress,
            delete: args.delete,
            exclude: args.exclude,
            ..RsyncOptions::default()
        },
    };
    let path = store::save_profile_at(&home, &name, &new_profile)
        .with_context(|| format!("could not save profile '{name}'"))?;
    println!("✓ saved profile '{name}' to {}", path.display());
    Ok(())
}

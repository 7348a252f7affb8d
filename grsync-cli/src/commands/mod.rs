pub mod args;
pub mod profile;
pub mod run;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use grsync_core::profile::{self as store, Profile, ProfileName};

/// Where to load a profile from: a saved name, or an explicit YAML file.
#[derive(Args, Debug)]
pub struct ProfileSource {
    /// Name of a profile saved under ~/.grsync/profiles/.
    #[arg(required_unless_present = "file")]
    pub profile: Option<String>,

    /// Load the profile from this YAML file instead.
    #[arg(long, value_name = "PATH", conflicts_with = "profile")]
    pub file: Option<PathBuf>,
}

impl ProfileSource {
    pub fn load(&self) -> Result<Profile> {
        if let Some(path) = &self.file {
            return store::load_profile_file(path)
                .with_context(|| format!("could not load profile from {}", path.display()));
        }
        let name = self
            .profile
            .clone()
            .context("provide a profile name or use --file")?;
        let home = home()?;
        store::load_profile_at(&home, &ProfileName::from(name.clone()))
            .with_context(|| format!("could not load profile '{name}'"))
    }

    /// Human-readable name for messages.
    pub fn label(&self) -> String {
        match (&self.profile, &self.file) {
            (_, Some(path)) => path.display().to_string(),
            (Some(name), None) => name.clone(),
            (None, None) => String::new(),
        }
    }
}

pub fn home() -> Result<PathBuf> {
    dirs::home_dir().context("could not determine home directory")
}

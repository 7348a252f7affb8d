//! `grsync args` — print the argv a profile compiles to.

use anyhow::Result;
use clap::Args;

use super::ProfileSource;

/// Arguments for `grsync args`.
#[derive(Args, Debug)]
pub struct ArgsArgs {
    #[command(flatten)]
    pub source: ProfileSource,
}

impl ArgsArgs {
    pub fn run(self) -> Result<()> {
        let profile = self.source.load()?;
        for token in profile.to_rsync().argv() {
            println!("{}", token.to_string_lossy());
        }
        Ok(())
    }
}

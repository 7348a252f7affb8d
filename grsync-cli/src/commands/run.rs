//! `grsync run` — run rsync for a profile and stream its output.

use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::thread;

use anyhow::{Context, Result};
use clap::Args;

use super::ProfileSource;

/// Arguments for `grsync run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub source: ProfileSource,

    /// Program to run instead of `rsync` from PATH.
    #[arg(long, env = "GRSYNC_RSYNC_BIN", value_name = "PROGRAM")]
    pub rsync_bin: Option<PathBuf>,
}

impl RunArgs {
    pub fn run(self) -> Result<()> {
        let label = self.source.label();
        let profile = self.source.load()?;

        let mut rsync = profile.to_rsync();
        if let Some(bin) = self.rsync_bin {
            rsync = rsync.with_program(bin);
        }

        let stdout = rsync.stdout_pipe()?;
        let stderr = rsync.stderr_pipe()?;

        // Both pipes are drained while `run` blocks; rsync stalls on a full pipe.
        let result = thread::scope(|s| {
            let out = s.spawn(move || forward(stdout, io::stdout()));
            let err = s.spawn(move || forward(stderr, io::stderr()));
            let result = rsync.run();
            for (stream, handle) in [("stdout", out), ("stderr", err)] {
                match handle.join() {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => tracing::warn!(stream, error = %e, "forwarding rsync output failed"),
                    Err(_) => tracing::warn!(stream, "output forwarder panicked"),
                }
            }
            result
        });

        result.with_context(|| format!("rsync failed for '{label}'"))
    }
}

fn forward(mut reader: impl Read, mut sink: impl Write) -> io::Result<()> {
    io::copy(&mut reader, &mut sink)?;
    sink.flush()
}

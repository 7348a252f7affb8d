//! Launch and supervise one rsync run.
//!
//! ## Lifecycle
//!
//! 1. [`Rsync::new`] compiles the options into argv. Nothing runs yet.
//! 2. Optionally, [`Rsync::stdout_pipe`] / [`Rsync::stderr_pipe`] hand out
//!    readers wired to the child's streams.
//! 3. [`Rsync::run`] prepares the destination, spawns, and waits.
//!
//! `run` consumes the wrapper, so pipes can only be requested before start.
//!
//! ## Draining
//!
//! A requested pipe must be read on another thread while `run` blocks:
//! rsync stalls once the pipe buffer is full, and `run` would wait forever.
//!
//! ```no_run
//! use std::io::Read;
//! use grsync_core::{Rsync, RsyncOptions};
//!
//! let options = RsyncOptions { archive: true, ..RsyncOptions::default() };
//! let mut rsync = Rsync::new("/src/", "/dst", &options);
//! let mut stdout = rsync.stdout_pipe()?;
//!
//! std::thread::scope(|s| {
//!     let reader = s.spawn(move || {
//!         let mut out = String::new();
//!         stdout.read_to_string(&mut out).map(|_| out)
//!     });
//!     let status = rsync.run();
//!     let _output = reader.join();
//!     status
//! })?;
//! # Ok::<(), grsync_core::RsyncError>(())
//! ```

use std::ffi::OsString;
use std::io::{PipeReader, PipeWriter};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use crate::args;
use crate::error::{RsyncError, Stream};
use crate::options::RsyncOptions;

/// Program name looked up on `PATH` when no override is given.
pub const RSYNC_PROGRAM: &str = "rsync";

/// A single, not-yet-started rsync invocation.
#[derive(Debug)]
pub struct Rsync {
    source: PathBuf,
    destination: PathBuf,
    program: OsString,
    args: Vec<String>,
    stdout: Option<PipeWriter>,
    stderr: Option<PipeWriter>,
}

impl Rsync {
    /// Bind `source`, `destination` and the compiled `options` to an rsync
    /// process description. Does not touch the filesystem or spawn anything.
    pub fn new(
        source: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
        options: &RsyncOptions,
    ) -> Self {
        let args = args::compile(options);
        tracing::debug!(args = ?args, "compiled rsync arguments");
        Self {
            source: source.into(),
            destination: destination.into(),
            program: OsString::from(RSYNC_PROGRAM),
            args,
            stdout: None,
            stderr: None,
        }
    }

    /// Run `program` instead of `rsync`. A bare name is still resolved via `PATH`.
    pub fn with_program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn program(&self) -> &std::ffi::OsStr {
        &self.program
    }

    /// Compiled option tokens, without the trailing source and destination.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Full argv passed to the program: option tokens, then source, then destination.
    pub fn argv(&self) -> Vec<OsString> {
        self.args
            .iter()
            .map(OsString::from)
            .chain([
                self.source.clone().into_os_string(),
                self.destination.clone().into_os_string(),
            ])
            .collect()
    }

    /// Reader connected to the child's standard output once it starts.
    ///
    /// Streams that are never requested go to the null device.
    pub fn stdout_pipe(&mut self) -> Result<PipeReader, RsyncError> {
        open_pipe(&mut self.stdout, Stream::Stdout)
    }

    /// Reader connected to the child's standard error once it starts.
    pub fn stderr_pipe(&mut self) -> Result<PipeReader, RsyncError> {
        open_pipe(&mut self.stderr, Stream::Stderr)
    }

    /// Prepare the destination, start rsync, and block until it exits.
    ///
    /// Returns [`RsyncError::DestinationPreparation`] without spawning,
    /// [`RsyncError::ProcessLaunch`] without waiting, or
    /// [`RsyncError::ProcessExecution`] when the child exits unsuccessfully.
    pub fn run(self) -> Result<(), RsyncError> {
        prepare_destination(&self.destination)?;

        let program = self.program.to_string_lossy().into_owned();
        let mut child = self.spawn()?;
        tracing::info!(pid = child.id(), program = %program, "rsync started");

        let status = child.wait().map_err(|source| RsyncError::Wait {
            program: program.clone(),
            source,
        })?;

        if status.success() {
            tracing::info!(program = %program, "rsync finished");
            Ok(())
        } else {
            tracing::warn!(program = %program, %status, "rsync exited unsuccessfully");
            Err(RsyncError::ProcessExecution { program, status })
        }
    }

    // The Command owns the parent's copies of the pipe write ends; it is
    // dropped on return so readers see EOF once the child exits.
    fn spawn(self) -> Result<Child, RsyncError> {
        let Rsync {
            source,
            destination,
            program,
            args,
            stdout,
            stderr,
        } = self;

        let mut command = Command::new(&program);
        command
            .args(&args)
            .arg(&source)
            .arg(&destination)
            .stdin(Stdio::null())
            .stdout(stdout.map_or_else(Stdio::null, Stdio::from))
            .stderr(stderr.map_or_else(Stdio::null, Stdio::from));

        command.spawn().map_err(|source| RsyncError::ProcessLaunch {
            program: program.to_string_lossy().into_owned(),
            source,
        })
    }
}

fn open_pipe(slot: &mut Option<PipeWriter>, stream: Stream) -> Result<PipeReader, RsyncError> {
    if slot.is_some() {
        return Err(RsyncError::PipeAlreadyRequested { stream });
    }
    let (reader, writer) = std::io::pipe().map_err(|source| RsyncError::Pipe { stream, source })?;
    *slot = Some(writer);
    Ok(reader)
}

/// Ensure `path` is an existing directory, creating it and its parents if needed.
pub fn prepare_destination(path: &Path) -> Result<(), RsyncError> {
    let is_dir = std::fs::metadata(path)
        .map(|meta| meta.is_dir())
        .unwrap_or(false);
    if is_dir {
        tracing::debug!(path = %path.display(), "destination exists");
        return Ok(());
    }

    tracing::debug!(path = %path.display(), "creating destination");
    std::fs::create_dir_all(path).map_err(|source| RsyncError::DestinationPreparation {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn archive() -> RsyncOptions {
        RsyncOptions {
            archive: true,
            ..RsyncOptions::default()
        }
    }

    #[test]
    fn new_defaults_to_rsync_program() {
        let rsync = Rsync::new("/a", "/b", &archive());
        assert_eq!(rsync.program(), RSYNC_PROGRAM);
        assert_eq!(rsync.source(), Path::new("/a"));
        assert_eq!(rsync.destination(), Path::new("/b"));
    }

    #[test]
    fn argv_places_paths_last() {
        let rsync = Rsync::new("/a", "/b", &archive());
        assert_eq!(rsync.args(), ["--archive"]);
        assert_eq!(rsync.argv(), vec!["--archive", "/a", "/b"]);
    }

    #[test]
    fn with_program_overrides_binary() {
        let rsync = Rsync::new("/a", "/b", &archive()).with_program("/opt/bin/rsync");
        assert_eq!(rsync.program(), "/opt/bin/rsync");
    }

    #[test]
    fn pipe_requested_twice_is_rejected() {
        let mut rsync = Rsync::new("/a", "/b", &archive());
        rsync.stdout_pipe().expect("first stdout pipe");
        let err = rsync.stdout_pipe().unwrap_err();
        assert!(matches!(
            err,
            RsyncError::PipeAlreadyRequested {
                stream: Stream::Stdout
            }
        ));
        rsync.stderr_pipe().expect("stderr is independent");
    }

    #[test]
    fn prepare_destination_creates_nested_dirs() {
        let tmp = TempDir::new().expect("tempdir");
        let dest = tmp.path().join("a").join("b").join("c");
        prepare_destination(&dest).expect("prepare");
        assert!(dest.is_dir());
    }

    #[test]
    fn prepare_destination_accepts_existing_dir() {
        let tmp = TempDir::new().expect("tempdir");
        prepare_destination(tmp.path()).expect("prepare existing");
        assert!(tmp.path().is_dir());
    }

    #[test]
    fn prepare_destination_fails_on_file() {
        let tmp = TempDir::new().expect("tempdir");
        let file = tmp.path().join("occupied");
        std::fs::write(&file, b"x").expect("write");
        let err = prepare_destination(&file).unwrap_err();
        assert!(matches!(err, RsyncError::DestinationPreparation { .. }));
    }
}

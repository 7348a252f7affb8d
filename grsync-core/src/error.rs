//! Error types for grsync-core.

use std::fmt;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Which standard stream of the child a pipe is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stream::Stdout => write!(f, "stdout"),
            Stream::Stderr => write!(f, "stderr"),
        }
    }
}

/// All errors that can arise from preparing, launching, or supervising rsync.
#[derive(Debug, Error)]
pub enum RsyncError {
    /// The destination directory could not be verified or created.
    /// The process is never started when this is returned.
    #[error("failed to prepare destination {path}: {source}")]
    DestinationPreparation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The child could not be spawned (binary missing, permission denied, …).
    #[error("failed to launch {program}: {source}")]
    ProcessLaunch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The child ran but exited unsuccessfully or was killed by a signal.
    #[error("{program} exited unsuccessfully ({status})")]
    ProcessExecution { program: String, status: ExitStatus },

    /// Waiting on a started child failed.
    #[error("failed to wait for {program}: {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The OS refused to create a pipe.
    #[error("failed to create {stream} pipe: {source}")]
    Pipe {
        stream: Stream,
        #[source]
        source: std::io::Error,
    },

    #[error("{stream} pipe was already requested")]
    PipeAlreadyRequested { stream: Stream },
}

impl RsyncError {
    /// Exit code of the child, when it ran and exited normally with a failure.
    ///
    /// `None` for every other variant, and for children terminated by a signal.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            RsyncError::ProcessExecution { status, .. } => status.code(),
            _ => None,
        }
    }
}

/// All errors that can arise from profile store operations.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// I/O failure, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML serialization error (save path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// YAML parse error on load — includes file path and line context from serde_yaml.
    #[error("failed to parse profile at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Name would resolve outside `profiles/` or to no file at all.
    #[error("invalid profile name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("profile not found at {path}")]
    ProfileNotFound { path: PathBuf },

    /// `dirs::home_dir()` returned `None` — cannot locate `~/.grsync/`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,
}

/// Convenience constructor for [`ProfileError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ProfileError {
    ProfileError::Io {
        path: path.into(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_display() {
        assert_eq!(Stream::Stdout.to_string(), "stdout");
        assert_eq!(Stream::Stderr.to_string(), "stderr");
    }

    #[test]
    fn pipe_already_requested_message_names_stream() {
        let err = RsyncError::PipeAlreadyRequested {
            stream: Stream::Stderr,
        };
        assert_eq!(err.to_string(), "stderr pipe was already requested");
        assert_eq!(err.exit_code(), None);
    }

    #[test]
    fn launch_error_keeps_source() {
        let err = RsyncError::ProcessLaunch {
            program: "rsync".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.to_string().starts_with("failed to launch rsync"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn home_not_found_error_message() {
        assert!(ProfileError::HomeNotFound.to_string().contains("home directory"));
    }
}

//! grsync core library — rsync options, argv compiler, process wrapper, profiles.
//!
//! - [`options`] — [`RsyncOptions`], the flat configuration model
//! - [`args`] — the ordered option table and [`args::compile`]
//! - [`process`] — [`Rsync`], one supervised rsync run
//! - [`profile`] — YAML profiles under `~/.grsync/profiles/`
//! - [`error`] — [`RsyncError`], [`ProfileError`]

pub mod args;
pub mod error;
pub mod options;
pub mod process;
pub mod profile;

pub use args::{compile, compile_with_prefix, NEGATIVE_PREFIX, POSITIVE_PREFIX};
pub use error::{ProfileError, RsyncError, Stream};
pub use options::RsyncOptions;
pub use process::{Rsync, RSYNC_PROGRAM};
pub use profile::{Profile, ProfileName};

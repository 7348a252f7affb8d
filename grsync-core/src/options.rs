//! The rsync configuration model.
//!
//! [`RsyncOptions`] is a flat, declarative record of rsync options. Every field
//! has a zero state (`false`, `0`, empty string, empty list) that means "not
//! set": such fields never contribute an argument. Field declaration order has
//! no effect on the compiled argv; see [`crate::args`] for the emission order.
//!
//! All fields deserialize from kebab-case keys matching the rsync flag names,
//! so a profile can say `dry-run: true` or `skip-compress: [gz, zip]`.
//! Serialization writes only the fields that are set, so a saved profile
//! lists exactly the options it uses.

use serde::{Deserialize, Serialize};

/// Options for a single rsync invocation.
///
/// Build one with struct update syntax:
///
/// ```
/// use grsync_core::RsyncOptions;
///
/// let options = RsyncOptions {
///     archive: true,
///     exclude: vec!["*.tmp".into()],
///     ..RsyncOptions::default()
/// };
/// assert!(options.no.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct RsyncOptions {
    // -----------------------------------------------------------------------
    // Output
    // -----------------------------------------------------------------------
    /// Increase verbosity.
    #[serde(skip_serializing_if = "is_false")]
    pub verbose: bool,
    /// Suppress non-error messages.
    #[serde(skip_serializing_if = "is_false")]
    pub quiet: bool,
    /// Give some file-transfer stats.
    #[serde(skip_serializing_if = "is_false")]
    pub stats: bool,
    /// Output numbers in a human-readable format.
    #[serde(skip_serializing_if = "is_false")]
    pub human_readable: bool,
    /// Show progress during transfer.
    #[serde(skip_serializing_if = "is_false")]
    pub progress: bool,
    /// Fine-grained informational verbosity, e.g. `progress2`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub info: String,
    /// Output updates using the specified format, e.g. `%n`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub out_format: String,

    // -----------------------------------------------------------------------
    // Transfer selection
    // -----------------------------------------------------------------------
    /// Skip based on checksum, not mod-time & size.
    #[serde(skip_serializing_if = "is_false")]
    pub checksum: bool,
    /// Archive mode; equals -rlptgoD (no -H,-A,-X).
    #[serde(skip_serializing_if = "is_false")]
    pub archive: bool,
    /// Recurse into directories.
    #[serde(skip_serializing_if = "is_false")]
    pub recursive: bool,
    /// Use relative path names.
    #[serde(skip_serializing_if = "is_false")]
    pub relative: bool,
    /// Don't send implied dirs with --relative.
    #[serde(skip_serializing_if = "is_false")]
    pub no_implied_dirs: bool,
    /// Skip files that are newer on the receiver.
    #[serde(skip_serializing_if = "is_false")]
    pub update: bool,
    /// Update destination files in-place.
    #[serde(skip_serializing_if = "is_false")]
    pub inplace: bool,
    /// Append data onto shorter files.
    #[serde(skip_serializing_if = "is_false")]
    pub append: bool,
    /// Like --append, but with old data in file checksum.
    #[serde(skip_serializing_if = "is_false")]
    pub append_verify: bool,
    /// Transfer directories without recursing.
    #[serde(skip_serializing_if = "is_false")]
    pub dirs: bool,
    /// Skip creating new files on receiver.
    #[serde(skip_serializing_if = "is_false")]
    pub existing: bool,
    /// Skip updating files that exist on receiver.
    #[serde(skip_serializing_if = "is_false")]
    pub ignore_existing: bool,
    /// Don't skip files that match size and time.
    #[serde(skip_serializing_if = "is_false")]
    pub ignore_times: bool,
    /// Skip files that match in size.
    #[serde(skip_serializing_if = "is_false")]
    pub size_only: bool,
    /// Compare mod-times with reduced accuracy (seconds).
    #[serde(skip_serializing_if = "is_zero")]
    pub modify_window: i64,
    /// Don't transfer any file larger than this many bytes.
    #[serde(skip_serializing_if = "is_zero")]
    pub max_size: i64,
    /// Don't transfer any file smaller than this many bytes.
    #[serde(skip_serializing_if = "is_zero")]
    pub min_size: i64,
    /// Find similar file for basis if no dest file.
    #[serde(skip_serializing_if = "is_false")]
    pub fuzzy: bool,
    /// Don't cross filesystem boundaries.
    #[serde(skip_serializing_if = "is_false")]
    pub one_file_system: bool,

    // -----------------------------------------------------------------------
    // Links
    // -----------------------------------------------------------------------
    /// Copy symlinks as symlinks.
    #[serde(skip_serializing_if = "is_false")]
    pub links: bool,
    /// Transform symlink into referent file/dir.
    #[serde(skip_serializing_if = "is_false")]
    pub copy_links: bool,
    /// Only "unsafe" symlinks are transformed.
    #[serde(skip_serializing_if = "is_false")]
    pub copy_unsafe_links: bool,
    /// Ignore symlinks that point outside the tree.
    #[serde(skip_serializing_if = "is_false")]
    pub safe_links: bool,
    /// Transform symlink to dir into referent dir.
    #[serde(skip_serializing_if = "is_false")]
    pub copy_dir_links: bool,
    /// Treat symlinked dir on receiver as dir.
    #[serde(skip_serializing_if = "is_false")]
    pub keep_dir_links: bool,
    /// Preserve hard links.
    #[serde(skip_serializing_if = "is_false")]
    pub hard_links: bool,

    // -----------------------------------------------------------------------
    // Metadata
    // -----------------------------------------------------------------------
    /// Preserve permissions.
    #[serde(skip_serializing_if = "is_false")]
    pub perms: bool,
    /// Preserve executability.
    #[serde(skip_serializing_if = "is_false")]
    pub executability: bool,
    /// Affect file and/or directory permissions, e.g. `Du+rwx,Fgo-w`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub chmod: String,
    /// Preserve ACLs (implies --perms).
    #[serde(skip_serializing_if = "is_false")]
    pub acls: bool,
    /// Preserve extended attributes.
    #[serde(skip_serializing_if = "is_false")]
    pub xattrs: bool,
    /// Preserve owner (super-user only).
    #[serde(skip_serializing_if = "is_false")]
    pub owner: bool,
    /// Preserve group.
    #[serde(skip_serializing_if = "is_false")]
    pub group: bool,
    /// Preserve device files (super-user only).
    #[serde(skip_serializing_if = "is_false")]
    pub devices: bool,
    /// Preserve special files.
    #[serde(skip_serializing_if = "is_false")]
    pub specials: bool,
    /// Preserve modification times.
    #[serde(skip_serializing_if = "is_false")]
    pub times: bool,
    /// Omit directories from --times.
    #[serde(skip_serializing_if = "is_false")]
    pub omit_dir_times: bool,
    /// Receiver attempts super-user activities.
    #[serde(rename = "super")]
    #[serde(skip_serializing_if = "is_false")]
    pub super_: bool,
    /// Store/recover privileged attrs using xattrs.
    #[serde(skip_serializing_if = "is_false")]
    pub fake_super: bool,
    /// Don't map uid/gid values by user/group name.
    #[serde(skip_serializing_if = "is_false")]
    pub numeric_ids: bool,
    /// Change ownership on receipt, `USER:GROUP`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub chown: String,

    // -----------------------------------------------------------------------
    // Delta transfer
    // -----------------------------------------------------------------------
    /// Handle sparse files efficiently.
    #[serde(skip_serializing_if = "is_false")]
    pub sparse: bool,
    /// Perform a trial run with no changes made.
    #[serde(skip_serializing_if = "is_false")]
    pub dry_run: bool,
    /// Copy files whole (without the delta-transfer algorithm).
    #[serde(skip_serializing_if = "is_false")]
    pub whole_file: bool,
    /// Force a fixed checksum block-size.
    #[serde(skip_serializing_if = "is_zero")]
    pub block_size: i64,
    /// Keep partially transferred files.
    #[serde(skip_serializing_if = "is_false")]
    pub partial: bool,
    /// Put a partially transferred file into this directory.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub partial_dir: String,
    /// Put all updated files into place at end of transfer.
    #[serde(skip_serializing_if = "is_false")]
    pub delay_updates: bool,
    /// Create temporary files in this directory.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub temp_dir: String,
    /// Also compare received files relative to this directory.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub compare_dest: String,
    /// Like --compare-dest, and include copies of unchanged files.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub copy_dest: String,
    /// Hardlink to files in this directory when unchanged.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub link_dest: String,
    /// Compress file data during the transfer.
    #[serde(skip_serializing_if = "is_false")]
    pub compress: bool,
    /// Explicitly set compression level.
    #[serde(skip_serializing_if = "is_zero")]
    pub compress_level: i64,
    /// Skip compressing files with these suffixes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skip_compress: Vec<String>,

    // -----------------------------------------------------------------------
    // Deletion
    // -----------------------------------------------------------------------
    /// Sender removes synchronized files (non-dir).
    #[serde(skip_serializing_if = "is_false")]
    pub remove_source_files: bool,
    /// Delete extraneous files from dest dirs.
    #[serde(skip_serializing_if = "is_false")]
    pub delete: bool,
    /// Receiver deletes before transfer, not during.
    #[serde(skip_serializing_if = "is_false")]
    pub delete_before: bool,
    /// Receiver deletes during the transfer.
    #[serde(skip_serializing_if = "is_false")]
    pub delete_during: bool,
    /// Find deletions during, delete after.
    #[serde(skip_serializing_if = "is_false")]
    pub delete_delay: bool,
    /// Receiver deletes after transfer, not during.
    #[serde(skip_serializing_if = "is_false")]
    pub delete_after: bool,
    /// Also delete excluded files from dest dirs.
    #[serde(skip_serializing_if = "is_false")]
    pub delete_excluded: bool,
    /// Delete even if there are I/O errors.
    #[serde(skip_serializing_if = "is_false")]
    pub ignore_errors: bool,
    /// Force deletion of dirs even if not empty.
    #[serde(skip_serializing_if = "is_false")]
    pub force: bool,
    /// Don't delete more than this many files.
    #[serde(skip_serializing_if = "is_zero")]
    pub max_delete: i64,
    /// Prune empty directory chains from file-list.
    #[serde(skip_serializing_if = "is_false")]
    pub prune_empty_dirs: bool,

    // -----------------------------------------------------------------------
    // Filtering
    // -----------------------------------------------------------------------
    /// Auto-ignore files in the same way CVS does.
    #[serde(skip_serializing_if = "is_false")]
    pub cvs_exclude: bool,
    /// Exclude patterns, one `--exclude=PATTERN` each, in order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
    /// Include patterns, one `--include=PATTERN` each, in order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,
    /// A single filter rule, e.g. `merge filter.txt`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub filter: String,

    // -----------------------------------------------------------------------
    // Remote
    // -----------------------------------------------------------------------
    /// Remote shell to use.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub rsh: String,
    /// Program to run as rsync on the remote machine.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub rsync_path: String,
    /// I/O timeout in seconds.
    #[serde(skip_serializing_if = "is_zero")]
    pub timeout: i64,
    /// Daemon connection timeout in seconds.
    #[serde(skip_serializing_if = "is_zero")]
    pub contimeout: i64,
    /// Prefer IPv4.
    #[serde(skip_serializing_if = "is_false")]
    pub ipv4: bool,
    /// Prefer IPv6.
    #[serde(skip_serializing_if = "is_false")]
    pub ipv6: bool,

    // -----------------------------------------------------------------------
    // Negation
    // -----------------------------------------------------------------------
    /// Options to disable explicitly. Every set field here is emitted with the
    /// `--no-` prefix after the positive arguments. A `no` nested inside this
    /// value is ignored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no: Option<Box<RsyncOptions>>,
}

impl RsyncOptions {
    /// Attach a negation set, replacing any existing one.
    pub fn with_negated(mut self, negated: RsyncOptions) -> Self {
        self.no = Some(Box::new(negated));
        self
    }

    /// True when no field is set and there is no negation set.
    pub fn is_empty(&self) -> bool {
        *self == RsyncOptions::default()
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

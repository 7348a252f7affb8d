//! Compile [`RsyncOptions`] into rsync argv tokens.
//!
//! ## Emission order
//!
//! Tokens are emitted by walking [`OPTION_TABLE`] front to back. The order is
//! part of the contract: rsync gives earlier `--exclude` / `--include` /
//! `--filter` rules precedence, so the table is spelled out explicitly rather
//! than derived from struct layout.
//!
//! ## Rules
//!
//! | rule       | set when        | tokens                         |
//! |------------|-----------------|--------------------------------|
//! | switch     | `true`          | `--name`                       |
//! | number     | `> 0`           | `--name`, `N`                  |
//! | value      | non-empty       | `--name`, `VALUE`              |
//! | assign     | non-empty       | `--name=VALUE`                 |
//! | patterns   | per element     | `--name=P1`, `--name=P2`, …    |
//! | comma list | non-empty       | `--name`, `A,B,…`              |
//!
//! Nothing is validated, quoted, or escaped. Contradictory flags such as
//! `--delete-before` with `--delete-after` go through untouched; rsync decides.

use crate::options::RsyncOptions;

/// Prefix for enabling flags.
pub const POSITIVE_PREFIX: &str = "--";
/// Prefix for explicitly disabling flags.
pub const NEGATIVE_PREFIX: &str = "--no-";

// ---------------------------------------------------------------------------
// Option table
// ---------------------------------------------------------------------------

/// A field's current value, tagged with how it is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emit<'a> {
    /// `--flag` when true.
    Switch(bool),
    /// `--flag N` when N > 0.
    Number(i64),
    /// `--flag VALUE` when non-empty.
    Value(&'a str),
    /// `--flag=VALUE` when non-empty.
    Assign(&'a str),
    /// One `--flag=PATTERN` per entry.
    Patterns(&'a [String]),
    /// `--flag a,b,c` when non-empty.
    CommaList(&'a [String]),
}

/// One row of the option table: an rsync flag name and how to read it.
#[derive(Clone, Copy)]
pub struct OptionRule {
    /// Flag name without any prefix, e.g. `dry-run`.
    pub flag: &'static str,
    /// Reads the field this flag is compiled from.
    pub read: fn(&RsyncOptions) -> Emit<'_>,
}

impl std::fmt::Debug for OptionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionRule").field("flag", &self.flag).finish()
    }
}

// Copy fields (bool, i64) are read by value, everything else by reference.
macro_rules! rule {
    (@arg Switch, $e:expr) => { $e };
    (@arg Number, $e:expr) => { $e };
    (@arg $kind:ident, $e:expr) => { &$e };
    ($flag:literal, $kind:ident, $field:ident) => {
        OptionRule {
            flag: $flag,
            read: |o| Emit::$kind(rule!(@arg $kind, o.$field)),
        }
    };
}

/// Every supported option, in emission order.
pub const OPTION_TABLE: &[OptionRule] = &[
    rule!("verbose", Switch, verbose),
    rule!("checksum", Switch, checksum),
    rule!("quiet", Switch, quiet),
    rule!("archive", Switch, archive),
    rule!("recursive", Switch, recursive),
    rule!("relative", Switch, relative),
    rule!("no-implied-dirs", Switch, no_implied_dirs),
    rule!("update", Switch, update),
    rule!("inplace", Switch, inplace),
    rule!("append", Switch, append),
    rule!("append-verify", Switch, append_verify),
    rule!("dirs", Switch, dirs),
    rule!("links", Switch, links),
    rule!("copy-links", Switch, copy_links),
    rule!("copy-unsafe-links", Switch, copy_unsafe_links),
    rule!("safe-links", Switch, safe_links),
    rule!("copy-dir-links", Switch, copy_dir_links),
    rule!("keep-dir-links", Switch, keep_dir_links),
    rule!("hard-links", Switch, hard_links),
    rule!("perms", Switch, perms),
    rule!("executability", Switch, executability),
    rule!("chmod", Value, chmod),
    rule!("acls", Switch, acls),
    rule!("xattrs", Switch, xattrs),
    rule!("owner", Switch, owner),
    rule!("group", Switch, group),
    rule!("devices", Switch, devices),
    rule!("specials", Switch, specials),
    rule!("times", Switch, times),
    rule!("omit-dir-times", Switch, omit_dir_times),
    rule!("super", Switch, super_),
    rule!("fake-super", Switch, fake_super),
    rule!("sparse", Switch, sparse),
    rule!("dry-run", Switch, dry_run),
    rule!("whole-file", Switch, whole_file),
    rule!("one-file-system", Switch, one_file_system),
    rule!("block-size", Number, block_size),
    rule!("rsh", Value, rsh),
    rule!("rsync-path", Value, rsync_path),
    rule!("existing", Switch, existing),
    rule!("ignore-existing", Switch, ignore_existing),
    rule!("remove-source-files", Switch, remove_source_files),
    rule!("delete", Switch, delete),
    rule!("delete-before", Switch, delete_before),
    rule!("delete-during", Switch, delete_during),
    rule!("delete-delay", Switch, delete_delay),
    rule!("delete-after", Switch, delete_after),
    rule!("delete-excluded", Switch, delete_excluded),
    rule!("ignore-errors", Switch, ignore_errors),
    rule!("force", Switch, force),
    rule!("max-delete", Number, max_delete),
    rule!("max-size", Number, max_size),
    rule!("min-size", Number, min_size),
    rule!("partial", Switch, partial),
    rule!("partial-dir", Value, partial_dir),
    rule!("delay-updates", Switch, delay_updates),
    rule!("prune-empty-dirs", Switch, prune_empty_dirs),
    rule!("numeric-ids", Switch, numeric_ids),
    rule!("timeout", Number, timeout),
    rule!("contimeout", Number, contimeout),
    rule!("ignore-times", Switch, ignore_times),
    rule!("size-only", Switch, size_only),
    rule!("modify-window", Number, modify_window),
    rule!("temp-dir", Value, temp_dir),
    rule!("fuzzy", Switch, fuzzy),
    rule!("compare-dest", Value, compare_dest),
    rule!("copy-dest", Value, copy_dest),
    rule!("link-dest", Value, link_dest),
    rule!("compress", Switch, compress),
    rule!("compress-level", Number, compress_level),
    rule!("skip-compress", CommaList, skip_compress),
    rule!("cvs-exclude", Switch, cvs_exclude),
    rule!("stats", Switch, stats),
    rule!("human-readable", Switch, human_readable),
    rule!("progress", Switch, progress),
    rule!("ipv4", Switch, ipv4),
    rule!("ipv6", Switch, ipv6),
    rule!("info", Value, info),
    rule!("out-format", Assign, out_format),
    rule!("exclude", Patterns, exclude),
    rule!("include", Patterns, include),
    rule!("filter", Assign, filter),
    rule!("chown", Assign, chown),
];

/// Flag names in emission order.
pub fn option_names() -> impl Iterator<Item = &'static str> {
    OPTION_TABLE.iter().map(|rule| rule.flag)
}

// ---------------------------------------------------------------------------
// Compiler
// ---------------------------------------------------------------------------

/// Compile `options` with `--`, then its `no` set (if any) with `--no-`.
pub fn compile(options: &RsyncOptions) -> Vec<String> {
    let mut args = compile_with_prefix(options, POSITIVE_PREFIX);
    if let Some(negated) = options.no.as_deref() {
        args.extend(compile_with_prefix(negated, NEGATIVE_PREFIX));
    }
    args
}

/// Compile a single options value under `prefix`.
///
/// The `no` field of `options` is not consulted, so negation never nests.
pub fn compile_with_prefix(options: &RsyncOptions, prefix: &str) -> Vec<String> {
    let mut args = Vec::new();
    for rule in OPTION_TABLE {
        emit(&mut args, prefix, rule.flag, (rule.read)(options));
    }
    args
}

fn emit(args: &mut Vec<String>, prefix: &str, flag: &str, value: Emit<'_>) {
    match value {
        Emit::Switch(true) => args.push(format!("{prefix}{flag}")),
        Emit::Number(n) if n > 0 => {
            args.push(format!("{prefix}{flag}"));
            args.push(n.to_string());
        }
        Emit::Value(v) if !v.is_empty() => {
            args.push(format!("{prefix}{flag}"));
            args.push(v.to_owned());
        }
        Emit::Assign(v) if !v.is_empty() => args.push(format!("{prefix}{flag}={v}")),
        Emit::Patterns(patterns) => {
            args.extend(patterns.iter().map(|p| format!("{prefix}{flag}={p}")));
        }
        Emit::CommaList(items) if !items.is_empty() => {
            args.push(format!("{prefix}{flag}"));
            args.push(items.join(","));
        }
        _ => {}
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

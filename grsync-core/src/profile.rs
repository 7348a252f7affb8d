//! Saved sync profiles.
//!
//! # Storage layout
//!
//! ```text
//! ~/.grsync/
//!   profiles/             (mode 0700)
//!     <name>.yaml         (one file per profile — mode 0600)
//! ```
//!
//! # API pattern
//!
//! Store functions come in pairs. `load_profile_at(home, …)` takes the home
//! directory explicitly (tests pass a `TempDir`); `load_profile(…)` resolves
//! it with `dirs::home_dir()` and forwards.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{io_err, ProfileError};
use crate::options::RsyncOptions;
use crate::process::Rsync;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A strongly-typed profile name; the file stem under `profiles/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProfileName(pub String);

impl ProfileName {
    /// Reject names that are not a single plain file stem.
    ///
    /// Empty names, path separators, `..`, and NUL would make
    /// [`profile_path_at`] point outside the profile directory.
    pub fn validate(&self) -> Result<(), ProfileError> {
        let reason = if self.0.is_empty() {
            "name is empty"
        } else if self.0.contains(['/', '\\']) {
            "name contains a path separator"
        } else if self.0.contains("..") {
            "name contains '..'"
        } else if self.0.contains('\0') {
            "name contains a NUL byte"
        } else {
            return Ok(());
        };
        Err(ProfileError::InvalidName {
            name: self.0.clone(),
            reason,
        })
    }
}

impl fmt::Display for ProfileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ProfileName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProfileName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A saved `(source, destination, options)` triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Passed to rsync verbatim; may be remote (`host:path`).
    pub source: PathBuf,
    /// Local destination directory; created on run if missing.
    pub destination: PathBuf,
    #[serde(default, skip_serializing_if = "RsyncOptions::is_empty")]
    pub options: RsyncOptions,
}

impl Profile {
    /// Build the process wrapper for this profile.
    pub fn to_rsync(&self) -> Rsync {
        Rsync::new(&self.source, &self.destination, &self.options)
    }
}

// ---------------------------------------------------------------------------
// 1. Path helpers
// ---------------------------------------------------------------------------

/// `<home>/.grsync/profiles/` — pure, no I/O.
pub fn profiles_dir_at(home: &Path) -> PathBuf {
    home.join(".grsync").join("profiles")
}

/// `<home>/.grsync/profiles/<name>.yaml` — pure, no I/O.
///
/// Does not check `name`; load and save call [`ProfileName::validate`] first.
pub fn profile_path_at(home: &Path, name: &ProfileName) -> PathBuf {
    profiles_dir_at(home).join(format!("{}.yaml", name.0))
}

// ---------------------------------------------------------------------------
// 2. Load
// ---------------------------------------------------------------------------

/// Load a profile from an arbitrary YAML file.
///
/// Returns `ProfileError::ProfileNotFound` if absent,
/// `ProfileError::Parse` (with path + line context) if malformed.
pub fn load_profile_file(path: &Path) -> Result<Profile, ProfileError> {
    if !path.exists() {
        return Err(ProfileError::ProfileNotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    serde_yaml::from_str(&contents).map_err(|source| ProfileError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load `<home>/.grsync/profiles/<name>.yaml`.
pub fn load_profile_at(home: &Path, name: &ProfileName) -> Result<Profile, ProfileError> {
    name.validate()?;
    load_profile_file(&profile_path_at(home, name))
}

/// `load_profile_at` convenience wrapper.
pub fn load_profile(name: &ProfileName) -> Result<Profile, ProfileError> {
    load_profile_at(&home()?, name)
}

/// Names of all saved profiles, sorted.
///
/// Ignores anything that is not a `.yaml` file, including leftover `.yaml.tmp`.
pub fn list_profiles_at(home: &Path) -> Result<Vec<ProfileName>, ProfileError> {
    let dir = profiles_dir_at(home);
    if !dir.exists() {
        return Ok(vec![]);
    }
    let mut names: Vec<ProfileName> = std::fs::read_dir(&dir)
        .map_err(|e| io_err(&dir, e))?
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter_map(|e| {
            let file_name = e.file_name().to_string_lossy().into_owned();
            file_name.strip_suffix(".yaml").map(ProfileName::from)
        })
        .collect();
    names.sort();
    Ok(names)
}

/// `list_profiles_at` convenience wrapper.
pub fn list_profiles() -> Result<Vec<ProfileName>, ProfileError> {
    list_profiles_at(&home()?)
}

// ---------------------------------------------------------------------------
// 3. Save (atomic)
// ---------------------------------------------------------------------------

/// Atomically save a profile to `<home>/.grsync/profiles/<name>.yaml`.
///
/// Write flow: serialize → `.yaml.tmp` sibling → `chmod 0600` → `rename`.
pub fn save_profile_at(
    home: &Path,
    name: &ProfileName,
    profile: &Profile,
) -> Result<PathBuf, ProfileError> {
    name.validate()?;
    let dir = profiles_dir_at(home);
    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| io_err(&dir, e))?;
        set_dir_permissions(&dir)?;
    }

    let path = profile_path_at(home, name);
    let tmp_path = path.with_file_name(format!("{}.yaml.tmp", name.0));

    let yaml = serde_yaml::to_string(profile)?;
    std::fs::write(&tmp_path, yaml).map_err(|e| io_err(&tmp_path, e))?;
    set_file_permissions(&tmp_path)?;
    if let Err(e) = std::fs::rename(&tmp_path, &path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(io_err(&path, e));
    }
    tracing::debug!(path = %path.display(), "saved profile");
    Ok(path)
}

/// `save_profile_at` convenience wrapper.
pub fn save_profile(name: &ProfileName, profile: &Profile) -> Result<PathBuf, ProfileError> {
    save_profile_at(&home()?, name, profile)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn home() -> Result<PathBuf, ProfileError> {
    dirs::home_dir().ok_or(ProfileError::HomeNotFound)
}

#[cfg(unix)]
fn set_dir_permissions(path: &Path) -> Result<(), ProfileError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o700))
        .map_err(|e| io_err(path, e))
}
#[cfg(not(unix))]
fn set_dir_permissions(_path: &Path) -> Result<(), ProfileError> {
    Ok(())
}

#[cfg(unix)]
fn set_file_permissions(path: &Path) -> Result<(), ProfileError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
        .map_err(|e| io_err(path, e))
}
#[cfg(not(unix))]
fn set_file_permissions(_path: &Path) -> Result<(), ProfileError> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

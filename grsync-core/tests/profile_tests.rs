//! Profile store: load errors, listing, atomic save, YAML round-trips.

use std::fs;
use std::path::PathBuf;

use assert_fs::prelude::*;
use grsync_core::profile::{self, Profile, ProfileName};
use grsync_core::{ProfileError, RsyncOptions};
use predicates::prelude::predicate;
use rstest::rstest;

fn name() -> ProfileName {
    ProfileName::from("photos")
}

fn minimal_profile() -> Profile {
    Profile {
        source: PathBuf::from("/src"),
        destination: PathBuf::from("/dst"),
        options: RsyncOptions::default(),
    }
}

fn full_profile() -> Profile {
    Profile {
        source: PathBuf::from("backup@nas:/volume1/photos/"),
        destination: PathBuf::from("/mnt/archive/photos"),
        options: RsyncOptions {
            archive: true,
            compress: true,
            delete: true,
            block_size: 4096,
            rsh: "ssh -p 2222".into(),
            chown: "nobody:nogroup".into(),
            exclude: vec!["*.tmp".into(), "Thumbs.db".into()],
            skip_compress: vec!["jpg".into(), "mp4".into()],
            ..RsyncOptions::default()
        }
        .with_negated(RsyncOptions {
            perms: true,
            ..RsyncOptions::default()
        }),
    }
}

fn unicode_profile() -> Profile {
    Profile {
        source: PathBuf::from("/home/zoë/Фото/"),
        destination: PathBuf::from("/mnt/備份"),
        options: RsyncOptions {
            exclude: vec!["*.ü".into()],
            ..RsyncOptions::default()
        },
    }
}

// ---------------------------------------------------------------------------
// 1. Load error messages
// ---------------------------------------------------------------------------

#[test]
fn load_missing_profile_returns_not_found() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let err = profile::load_profile_at(home.path(), &name()).unwrap_err();
    assert!(matches!(err, ProfileError::ProfileNotFound { .. }), "got: {err}");
    assert!(err.to_string().contains("profile not found"));
    assert!(err.to_string().contains("photos.yaml"));
}

#[test]
fn load_corrupt_yaml_returns_parse_error_with_path() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let dir = profile::profiles_dir_at(home.path());
    fs::create_dir_all(&dir).expect("mkdir");
    fs::write(dir.join("photos.yaml"), b": : corrupt : yaml : !!!\n  - broken: [unclosed")
        .expect("write");

    let err = profile::load_profile_at(home.path(), &name()).unwrap_err();
    assert!(matches!(err, ProfileError::Parse { .. }), "got: {err}");
    assert!(err.to_string().contains("photos.yaml"));
}

#[test]
fn load_unknown_option_returns_parse_error() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let file = home.child("legacy.yaml");
    file.write_str("source: /a\ndestination: /b\noptions:\n  rsync-programm: /usr/bin/rsync\n")
        .expect("write");

    let err = profile::load_profile_file(file.path()).unwrap_err();
    assert!(matches!(err, ProfileError::Parse { .. }), "got: {err}");
}

#[test]
fn load_profile_file_reads_arbitrary_path() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let file = home.child("job.yaml");
    file.write_str(
        "source: /data/\ndestination: /backup\noptions:\n  archive: true\n  exclude: ['*.tmp']\n",
    )
    .expect("write");

    let loaded = profile::load_profile_file(file.path()).expect("load");
    assert_eq!(
        loaded.to_rsync().argv(),
        vec!["--archive", "--exclude=*.tmp", "/data/", "/backup"]
    );
}

// ---------------------------------------------------------------------------
// 2. Save and list
// ---------------------------------------------------------------------------

#[test]
fn save_creates_profiles_dir_and_file() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let path = profile::save_profile_at(home.path(), &name(), &full_profile()).expect("save");

    home.child(".grsync/profiles").assert(predicate::path::is_dir());
    home.child(".grsync/profiles/photos.yaml")
        .assert(predicate::path::is_file());
    assert_eq!(path, profile::profile_path_at(home.path(), &name()));
}

#[test]
fn save_writes_only_set_options() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let path = profile::save_profile_at(home.path(), &name(), &full_profile()).expect("save");
    let yaml = fs::read_to_string(&path).expect("read");

    assert!(yaml.contains("archive: true"), "{yaml}");
    assert!(yaml.contains("block-size: 4096"), "{yaml}");
    assert!(!yaml.contains("verbose"), "{yaml}");
    assert!(!yaml.contains("false"), "{yaml}");
    assert!(yaml.lines().count() < 25, "{yaml}");
}

#[test]
fn save_omits_empty_options_block() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let path = profile::save_profile_at(home.path(), &name(), &minimal_profile()).expect("save");
    let yaml = fs::read_to_string(&path).expect("read");

    assert!(!yaml.contains("options"), "{yaml}");
    assert_eq!(
        profile::load_profile_at(home.path(), &name()).expect("load"),
        minimal_profile()
    );
}

#[rstest]
#[case::parent_dir("../escaped")]
#[case::nested("team/photos")]
#[case::backslash("team\\photos")]
#[case::empty("")]
fn save_rejects_names_outside_store(#[case] bad: &str) {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let err = profile::save_profile_at(home.path(), &ProfileName::from(bad), &minimal_profile())
        .unwrap_err();

    assert!(matches!(err, ProfileError::InvalidName { .. }), "got: {err}");
    home.child(".grsync/escaped.yaml")
        .assert(predicate::path::missing());
    home.child(".grsync/profiles/team")
        .assert(predicate::path::missing());
}

#[test]
fn save_rejects_absolute_name() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let target = home.path().join("evil");
    let bad = ProfileName::from(target.to_string_lossy().into_owned());

    let err = profile::save_profile_at(home.path(), &bad, &minimal_profile()).unwrap_err();
    assert!(matches!(err, ProfileError::InvalidName { .. }), "got: {err}");
    home.child("evil.yaml").assert(predicate::path::missing());
    assert!(profile::list_profiles_at(home.path()).expect("list").is_empty());
}

#[test]
fn load_rejects_parent_dir_name() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    home.child(".grsync/outside.yaml")
        .write_str("source: /a\ndestination: /b\n")
        .expect("write");

    let err = profile::load_profile_at(home.path(), &ProfileName::from("../outside"))
        .unwrap_err();
    assert!(matches!(err, ProfileError::InvalidName { .. }), "got: {err}");
}

#[test]
fn save_overwrites_existing_profile() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    profile::save_profile_at(home.path(), &name(), &minimal_profile()).expect("first save");
    profile::save_profile_at(home.path(), &name(), &full_profile()).expect("second save");

    let loaded = profile::load_profile_at(home.path(), &name()).expect("load");
    assert_eq!(loaded, full_profile());
}

#[test]
fn list_profiles_is_sorted_and_skips_other_files() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    for n in ["zulu", "alpha", "mike"] {
        profile::save_profile_at(home.path(), &ProfileName::from(n), &minimal_profile())
            .expect("save");
    }
    let dir = profile::profiles_dir_at(home.path());
    fs::write(dir.join("notes.txt"), "ignore me").expect("write");
    fs::write(dir.join("half.yaml.tmp"), "ignore me too").expect("write");
    fs::create_dir_all(dir.join("nested.yaml")).expect("mkdir");

    let names = profile::list_profiles_at(home.path()).expect("list");
    assert_eq!(
        names,
        vec![
            ProfileName::from("alpha"),
            ProfileName::from("mike"),
            ProfileName::from("zulu"),
        ]
    );
}

#[test]
fn list_profiles_empty_when_store_missing() {
    let home = assert_fs::TempDir::new().expect("tempdir");
    assert!(profile::list_profiles_at(home.path()).expect("list").is_empty());
}

// ---------------------------------------------------------------------------
// 3. Round-trips
// ---------------------------------------------------------------------------

#[rstest]
#[case("minimal", minimal_profile())]
#[case("all_kinds", full_profile())]
#[case("unicode_paths", unicode_profile())]
fn profile_roundtrip(#[case] label: &str, #[case] original: Profile) {
    let home = assert_fs::TempDir::new().expect("tempdir");
    let n = ProfileName::from(label);
    profile::save_profile_at(home.path(), &n, &original)
        .unwrap_or_else(|e| panic!("[{label}] save failed: {e}"));
    let back = profile::load_profile_at(home.path(), &n)
        .unwrap_or_else(|e| panic!("[{label}] load failed: {e}"));
    assert_eq!(original, back, "[{label}] roundtrip mismatch");
    assert_eq!(
        grsync_core::compile(&original.options),
        grsync_core::compile(&back.options),
        "[{label}] compiled argv changed"
    );
}

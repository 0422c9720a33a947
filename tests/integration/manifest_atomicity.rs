//! Integration tests for atomic publication and failure handling

use super::test_utils::{manifest_bytes, temp_manifests, write_tree};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use treedigest::config::{DigestConfig, ReadPolicy};
use treedigest::error::ManifestError;
use treedigest::manifest::{ManifestWriter, MANIFEST_FILE_NAME};
use treedigest::tree::builder::ManifestBuilder;
use treedigest::tree::hasher::compute_content_digest;
use treedigest::types::{DigestRecord, FileEntry};

/// An interrupted run (temp created, never renamed) leaves no trace
#[test]
fn test_interrupted_write_keeps_prior_manifest() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_tree(root, &[("a.txt", "hello")]);
    ManifestBuilder::new(root.to_path_buf()).build().unwrap();
    let prior = manifest_bytes(root);

    let writer = ManifestWriter::new(root.to_path_buf());
    let mut pending = writer.begin().unwrap();
    pending
        .append(&DigestRecord {
            digest: compute_content_digest(b"partial"),
            path: PathBuf::from("partial.txt"),
        })
        .unwrap();
    assert_eq!(temp_manifests(root).len(), 1);
    drop(pending);

    assert_eq!(manifest_bytes(root), prior);
    assert!(temp_manifests(root).is_empty());
}

/// An interrupted first run leaves no manifest at all
#[test]
fn test_interrupted_first_run_leaves_no_manifest() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    let writer = ManifestWriter::new(root.to_path_buf());
    drop(writer.begin().unwrap());

    assert!(!root.join(MANIFEST_FILE_NAME).exists());
    assert!(temp_manifests(root).is_empty());
}

/// A read failure mid-run leaves the prior manifest byte-identical
#[test]
fn test_read_failure_preserves_prior_manifest() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_tree(root, &[("a.txt", "hello"), ("b/c.txt", "world")]);
    let builder = ManifestBuilder::new(root.to_path_buf());
    builder.build().unwrap();
    let prior = manifest_bytes(root);

    // Scan, then remove a file before it is digested
    let (entries, _) = builder.scan().unwrap();
    fs::remove_file(root.join("b/c.txt")).unwrap();

    let err = builder.publish_entries(&entries).unwrap_err();
    assert!(matches!(err, ManifestError::Read { .. }));
    assert_eq!(err.exit_code(), 4);
    assert_eq!(manifest_bytes(root), prior);
    assert!(temp_manifests(root).is_empty());
}

/// Same failure, sequential streaming path
#[test]
fn test_read_failure_sequential_preserves_prior_manifest() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_tree(root, &[("a.txt", "hello"), ("z.txt", "last")]);
    let builder = ManifestBuilder::new(root.to_path_buf()).with_digest_config(DigestConfig {
        parallel: false,
        ..DigestConfig::default()
    });
    builder.build().unwrap();
    let prior = manifest_bytes(root);

    let mut entries = builder.scan().unwrap().0;
    entries.push(FileEntry::new(root, PathBuf::from("zz-gone.txt")).unwrap());

    assert!(builder.publish_entries(&entries).is_err());
    assert_eq!(manifest_bytes(root), prior);
    assert!(temp_manifests(root).is_empty());
}

#[cfg(unix)]
#[test]
fn test_permission_denied_file_fails_or_is_skipped() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_tree(root, &[("open.txt", "ok"), ("locked.txt", "secret")]);
    let locked = root.join("locked.txt");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged users can read anything; the vanished-file test below
    // covers both outcomes for them.
    if fs::read(&locked).is_ok() {
        return;
    }

    let err = ManifestBuilder::new(root.to_path_buf()).build().unwrap_err();
    assert!(matches!(err, ManifestError::Read { .. }));
    assert!(!root.join(MANIFEST_FILE_NAME).exists());

    let report = ManifestBuilder::new(root.to_path_buf())
        .with_digest_config(DigestConfig {
            read_policy: ReadPolicy::SkipUnreadable,
            ..DigestConfig::default()
        })
        .build()
        .unwrap();
    assert_eq!(report.records, 1);
    assert_eq!(report.skipped.len(), 1);

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();
}

/// A file that disappears after the scan fails the run by default and is
/// skipped under the lenient policy, independent of who runs the test
#[test]
fn test_vanished_file_fails_or_is_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_tree(root, &[("open.txt", "ok"), ("gone.txt", "bye")]);

    let strict = ManifestBuilder::new(root.to_path_buf());
    let (entries, _) = strict.scan().unwrap();
    fs::remove_file(root.join("gone.txt")).unwrap();

    let err = strict.publish_entries(&entries).unwrap_err();
    assert!(matches!(err, ManifestError::Read { .. }));
    assert!(!root.join(MANIFEST_FILE_NAME).exists());
    assert!(temp_manifests(root).is_empty());

    let report = ManifestBuilder::new(root.to_path_buf())
        .with_digest_config(DigestConfig {
            read_policy: ReadPolicy::SkipUnreadable,
            ..DigestConfig::default()
        })
        .publish_entries(&entries)
        .unwrap();
    assert_eq!(report.records, 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].path, PathBuf::from("gone.txt"));
    assert_eq!(
        manifest_bytes(root),
        format!("{}\topen.txt\n", compute_content_digest(b"ok")).into_bytes()
    );
}

#[cfg(unix)]
#[test]
fn test_published_manifest_mode() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_tree(root, &[("a.txt", "hello")]);

    let report = ManifestBuilder::new(root.to_path_buf()).build().unwrap();
    let mode = fs::metadata(&report.manifest_path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o644);
}

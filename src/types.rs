//! Core types shared by the walker, sorter, digest engine and writer.

use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};

/// Hash: raw 256-bit SHA-256 output
pub type Hash = [u8; 32];

/// Content digest of a single file.
///
/// Renders as 64 lowercase hex characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentDigest(Hash);

impl ContentDigest {
    pub fn from_bytes(bytes: Hash) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &Hash {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A regular file discovered under the scanned root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path relative to the root; this is what the manifest lists
    path: PathBuf,
    /// Path the file is opened through (root joined with `path`)
    source: PathBuf,
}

impl FileEntry {
    /// Build an entry from the scanned root and the file's relative path.
    ///
    /// Returns `None` when the relative path has no final component.
    pub fn new(root: &Path, relative: PathBuf) -> Option<Self> {
        relative.file_name()?;
        Some(Self {
            source: root.join(&relative),
            path: relative,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Final path component. Never empty, enforced by [`FileEntry::new`].
    pub fn basename(&self) -> &OsStr {
        self.path.file_name().unwrap_or_else(|| self.path.as_os_str())
    }
}

/// The digest of one [`FileEntry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestRecord {
    pub digest: ContentDigest,
    pub path: PathBuf,
}

/// Why an entry was left out of the manifest without failing the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Vanished or became inaccessible while the tree was being enumerated
    Transient,
    /// Could not be read while digesting (lenient mode only)
    Unreadable,
}

/// An entry dropped from the manifest, with the reason reported to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub path: PathBuf,
    pub reason: SkipReason,
    pub message: String,
}

//! Filesystem walker for enumerating the files a manifest lists

use crate::error::ManifestError;
use crate::tree::path::is_hidden_name;
use crate::types::{FileEntry, SkipReason, SkippedEntry};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, FilterEntry, WalkDir};

/// Filesystem walker
///
/// Always descends to any depth and never follows symbolic links, so a walk
/// covers every visible regular file under the root.
pub struct Walker {
    root: PathBuf,
}

impl Walker {
    /// Create a new walker for the given root path
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Start walking the tree.
    ///
    /// The root is validated up front; traversal itself is lazy. Hidden
    /// directories below the root are pruned without being descended into.
    pub fn walk(&self) -> Result<Walk, ManifestError> {
        match fs::metadata(&self.root) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                return Err(ManifestError::NotADirectory {
                    path: self.root.clone(),
                })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ManifestError::NotADirectory {
                    path: self.root.clone(),
                })
            }
            Err(e) => return Err(ManifestError::read(&self.root, e)),
        }

        // An unreadable root would otherwise surface as a silently empty walk.
        fs::read_dir(&self.root).map_err(|e| ManifestError::read(&self.root, e))?;

        let inner = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(is_visible as fn(&DirEntry) -> bool);

        debug!(root = %self.root.display(), "Walking tree");

        Ok(Walk {
            root: self.root.clone(),
            inner,
            skipped: Vec::new(),
        })
    }
}

/// The root itself is never checked, only names below it.
fn is_visible(entry: &DirEntry) -> bool {
    entry.depth() == 0 || !is_hidden_name(entry.file_name())
}

/// Lazy sequence of the visible regular files under a root.
///
/// Entries that disappear or cannot be read during enumeration are logged
/// and collected in [`Walk::skipped`] instead of ending the walk.
pub struct Walk {
    root: PathBuf,
    inner: FilterEntry<walkdir::IntoIter, fn(&DirEntry) -> bool>,
    skipped: Vec<SkippedEntry>,
}

impl Walk {
    /// Root the walk started from
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Entries skipped so far
    pub fn skipped(&self) -> &[SkippedEntry] {
        &self.skipped
    }

    pub fn into_skipped(self) -> Vec<SkippedEntry> {
        self.skipped
    }

    fn record_transient(&mut self, err: walkdir::Error) {
        let path = err
            .path()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.root.clone());
        let path = path
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or(path);
        warn!(path = %path.display(), error = %err, "Skipping entry that changed during scan");
        self.skipped.push(SkippedEntry {
            path,
            reason: SkipReason::Transient,
            message: err.to_string(),
        });
    }
}

impl Iterator for Walk {
    type Item = FileEntry;

    fn next(&mut self) -> Option<FileEntry> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    self.record_transient(err);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                continue;
            };

            if let Some(file) = FileEntry::new(&self.root, relative.to_path_buf()) {
                return Some(file);
            }
        }
    }
}

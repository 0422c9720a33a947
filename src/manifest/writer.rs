//! Atomic manifest publication
//!
//! Lines go to a uniquely named temporary file next to the canonical
//! manifest. Only a complete, synced file is renamed over the canonical
//! name, so readers see either the previous manifest or the new one.
//! The temporary file is owned by [`PendingManifest`] and is deleted when it
//! drops without being committed, whatever the exit path.

use crate::error::ManifestError;
use crate::manifest::{format, Manifest, MANIFEST_FILE_NAME};
use crate::types::DigestRecord;
use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

const TEMP_PREFIX: &str = ".sha256sum-";
const TEMP_SUFFIX: &str = ".tmp";

/// Mode of a published manifest: rw-r--r--
pub const MANIFEST_MODE: u32 = 0o644;

/// Publishes manifests into one directory
#[derive(Debug, Clone)]
pub struct ManifestWriter {
    dir: PathBuf,
}

impl ManifestWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Canonical manifest path in this directory
    pub fn target(&self) -> PathBuf {
        self.dir.join(MANIFEST_FILE_NAME)
    }

    /// Create the temporary file and return a handle to append records to.
    pub fn begin(&self) -> Result<PendingManifest, ManifestError> {
        let temp = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .suffix(TEMP_SUFFIX)
            .tempfile_in(&self.dir)
            .map_err(|e| ManifestError::write(self.target(), e))?;

        debug!(temp = %temp.path().display(), "Created temporary manifest");

        Ok(PendingManifest {
            target: self.target(),
            out: BufWriter::new(temp),
            written: 0,
        })
    }

    /// Write a complete in-memory manifest and publish it.
    pub fn publish(&self, manifest: &Manifest) -> Result<PathBuf, ManifestError> {
        let mut pending = self.begin()?;
        for record in manifest.records() {
            pending.append(record)?;
        }
        pending.commit()
    }
}

/// A manifest being written. Dropping it without [`PendingManifest::commit`]
/// removes the temporary file and leaves the canonical manifest untouched.
pub struct PendingManifest {
    target: PathBuf,
    out: BufWriter<NamedTempFile>,
    written: usize,
}

impl PendingManifest {
    /// Path of the temporary file
    pub fn temp_path(&self) -> &Path {
        self.out.get_ref().path()
    }

    /// Records appended so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Append one record line.
    pub fn append(&mut self, record: &DigestRecord) -> Result<(), ManifestError> {
        format::ensure_representable(&record.path)?;
        format::write_line(&mut self.out, record)
            .map_err(|e| ManifestError::write(&self.target, e))?;
        self.written += 1;
        Ok(())
    }

    /// Flush, sync and atomically rename over the canonical manifest.
    pub fn commit(self) -> Result<PathBuf, ManifestError> {
        let PendingManifest {
            target,
            out,
            written,
        } = self;

        let temp = out
            .into_inner()
            .map_err(|e| ManifestError::write(&target, e.into_error()))?;

        set_manifest_mode(temp.as_file()).map_err(|e| ManifestError::write(&target, e))?;
        temp.as_file()
            .sync_all()
            .map_err(|e| ManifestError::write(&target, e))?;

        // On failure the returned temp handle drops and deletes the file.
        temp.persist(&target)
            .map_err(|e| ManifestError::write(&target, e.error))?;

        info!(manifest = %target.display(), records = written, "Published manifest");
        Ok(target)
    }
}

#[cfg(unix)]
fn set_manifest_mode(file: &fs::File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(MANIFEST_MODE))
}

#[cfg(not(unix))]
fn set_manifest_mode(file: &fs::File) -> std::io::Result<()> {
    let mut perms = file.metadata()?.permissions();
    perms.set_readonly(false);
    file.set_permissions(perms)
}

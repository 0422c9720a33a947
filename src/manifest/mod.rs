//! Manifest model and publication
//!
//! A manifest is the ordered list of digest records for one tree. It is
//! rendered as `<sha256-hex>\t<path>\n` lines and published under
//! [`MANIFEST_FILE_NAME`] inside the scanned directory.

pub mod format;
pub mod writer;

use crate::error::ManifestError;
use crate::types::DigestRecord;

pub use writer::ManifestWriter;

/// Canonical manifest name. Hidden, so scans never list it.
pub const MANIFEST_FILE_NAME: &str = ".sha256sum-current.txt";

/// Ordered digest records for one tree.
///
/// Where it is published is decided by the [`ManifestWriter`] it is handed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    records: Vec<DigestRecord>,
}

impl Manifest {
    /// Build a manifest from records already in manifest order.
    ///
    /// Fails if any path cannot be written in the line format.
    pub fn new(records: Vec<DigestRecord>) -> Result<Self, ManifestError> {
        for record in &records {
            format::ensure_representable(&record.path)?;
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[DigestRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Render the full manifest text in memory.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.records.len() * 80);
        for record in &self.records {
            format::append_line(&mut out, record);
        }
        out
    }
}

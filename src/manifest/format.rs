//! Manifest line format
//!
//! One record per line: lowercase hex digest, a single tab, the path bytes
//! exactly as walked, then `\n`. Paths are not escaped.

use crate::error::ManifestError;
use crate::tree::path::{is_representable, path_bytes};
use crate::types::DigestRecord;
use std::io::{self, Write};
use std::path::Path;

pub const FIELD_SEPARATOR: u8 = b'\t';
pub const RECORD_TERMINATOR: u8 = b'\n';

/// Reject paths that would corrupt the line format.
pub fn ensure_representable(path: &Path) -> Result<(), ManifestError> {
    if is_representable(path) {
        Ok(())
    } else {
        Err(ManifestError::UnrepresentablePath {
            path: path.to_path_buf(),
        })
    }
}

/// Append one record line to a buffer.
pub fn append_line(out: &mut Vec<u8>, record: &DigestRecord) {
    out.extend_from_slice(record.digest.to_hex().as_bytes());
    out.push(FIELD_SEPARATOR);
    out.extend_from_slice(&path_bytes(&record.path));
    out.push(RECORD_TERMINATOR);
}

/// Write one record line.
pub fn write_line<W: Write>(writer: &mut W, record: &DigestRecord) -> io::Result<()> {
    let mut line = Vec::with_capacity(80);
    append_line(&mut line, record);
    writer.write_all(&line)
}

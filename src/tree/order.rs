//! Deterministic manifest ordering
//!
//! Entries are ordered by basename, then by full relative path, both compared
//! as raw bytes. This is a total order over distinct paths, so the manifest
//! for an unchanged tree is byte-identical from run to run and machine to
//! machine regardless of locale or directory iteration order.

use crate::tree::path::{os_bytes, path_bytes};
use crate::types::FileEntry;
use std::cmp::Ordering;
use std::path::Path;

/// Compare two paths by (basename, full path), byte-wise.
pub fn compare_paths(a: &Path, b: &Path) -> Ordering {
    let name_a = a.file_name().unwrap_or(a.as_os_str());
    let name_b = b.file_name().unwrap_or(b.as_os_str());

    os_bytes(name_a)
        .cmp(&os_bytes(name_b))
        .then_with(|| path_bytes(a).cmp(&path_bytes(b)))
}

/// Compare two entries by (basename, full path), byte-wise.
pub fn compare_entries(a: &FileEntry, b: &FileEntry) -> Ordering {
    compare_paths(a.path(), b.path())
}

/// Sort entries into manifest order. Empty input stays empty.
pub fn sort_entries(entries: &mut [FileEntry]) {
    entries.sort_by(compare_entries);
}

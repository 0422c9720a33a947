//! Content digests using SHA-256

use crate::error::ManifestError;
use crate::types::{ContentDigest, Hash};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const READ_CHUNK: usize = 8192;

/// Compute the content digest of a file on disk.
///
/// The file is streamed, never loaded whole. Any open or read failure is a
/// [`ManifestError::Read`] naming the file.
pub fn compute_file_digest(path: &Path) -> Result<ContentDigest, ManifestError> {
    let file = File::open(path).map_err(|e| ManifestError::read(path, e))?;
    let hash = hash_reader(file).map_err(|e| ManifestError::read(path, e))?;
    Ok(ContentDigest::from_bytes(hash))
}

/// Compute the content digest of in-memory bytes
pub fn compute_content_digest(content: &[u8]) -> ContentDigest {
    let mut hasher = Sha256::new();
    hasher.update(content);
    ContentDigest::from_bytes(finalize(hasher))
}

fn hash_reader<R: Read>(mut reader: R) -> std::io::Result<Hash> {
    let mut hasher = Sha256::new();
    let mut buf = [0_u8; READ_CHUNK];

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
    }

    Ok(finalize(hasher))
}

fn finalize(hasher: Sha256) -> Hash {
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&hasher.finalize());
    hash
}

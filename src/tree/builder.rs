//! Manifest builder: walk, order, digest, publish

use crate::config::{DigestConfig, ReadPolicy};
use crate::error::ManifestError;
use crate::manifest::{format, Manifest, ManifestWriter};
use crate::tree::hasher;
use crate::tree::order::sort_entries;
use crate::tree::walker::{Walk, Walker};
use crate::types::{DigestRecord, FileEntry, SkipReason, SkippedEntry};
use rayon::prelude::*;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// Canonical manifest path
    pub manifest_path: PathBuf,
    /// Records written
    pub records: usize,
    /// Entries left out without failing the run
    pub skipped: Vec<SkippedEntry>,
}

/// Result of digesting one entry under the active read policy
enum DigestOutcome {
    Record(DigestRecord),
    Skipped(SkippedEntry),
}

/// Builds and publishes the manifest for one directory
pub struct ManifestBuilder {
    root: PathBuf,
    digest_config: DigestConfig,
}

impl ManifestBuilder {
    /// Create a new builder for the given root path
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            digest_config: DigestConfig::default(),
        }
    }

    pub fn with_digest_config(mut self, config: DigestConfig) -> Self {
        self.digest_config = config;
        self
    }

    /// Walk, sort, digest and publish.
    ///
    /// On any error the canonical manifest is left exactly as it was.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn build(&self) -> Result<BuildReport, ManifestError> {
        let walk = match Walker::new(self.root.clone()).walk() {
            Ok(walk) => walk,
            Err(e) => {
                error!("Tree scan failed: {}", e);
                return Err(e);
            }
        };
        self.build_from_walk(walk)
    }

    /// Finish a build from a walk already started over this builder's root.
    pub(crate) fn build_from_walk(&self, walk: Walk) -> Result<BuildReport, ManifestError> {
        debug_assert_eq!(walk.root(), self.root.as_path());
        let start = Instant::now();
        info!("Starting manifest build");

        let (entries, skipped) = match collect_walk(walk) {
            Ok(scan) => scan,
            Err(e) => {
                error!("Tree scan failed: {}", e);
                return Err(e);
            }
        };
        debug!(files = entries.len(), skipped = skipped.len(), "Scanned tree");

        let mut report = self.publish_entries(&entries)?;
        let mut all_skipped = skipped;
        all_skipped.append(&mut report.skipped);
        report.skipped = all_skipped;

        info!(
            records = report.records,
            skipped = report.skipped.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Manifest build complete"
        );
        Ok(report)
    }

    /// Enumerate the tree and return its files in manifest order.
    ///
    /// Paths the line format cannot carry are rejected here, before anything
    /// is written.
    pub fn scan(&self) -> Result<(Vec<FileEntry>, Vec<SkippedEntry>), ManifestError> {
        collect_walk(Walker::new(self.root.clone()).walk()?)
    }

    /// Digest entries already in manifest order and publish the result.
    pub fn publish_entries(&self, entries: &[FileEntry]) -> Result<BuildReport, ManifestError> {
        let writer = ManifestWriter::new(self.root.clone());
        if self.digest_config.parallel {
            self.publish_parallel(&writer, entries)
        } else {
            self.publish_sequential(&writer, entries)
        }
    }

    /// Digest on a worker pool, then write. `collect` keeps input order.
    fn publish_parallel(
        &self,
        writer: &ManifestWriter,
        entries: &[FileEntry],
    ) -> Result<BuildReport, ManifestError> {
        let policy = self.digest_config.read_policy;
        let digest_all = || -> Result<Vec<DigestOutcome>, ManifestError> {
            entries
                .par_iter()
                .map(|entry| digest_entry(entry, policy))
                .collect()
        };

        let outcomes = match self.digest_config.jobs {
            Some(jobs) => rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build()
                .map_err(|e| ManifestError::Config(format!("Failed to start digest pool: {}", e)))?
                .install(digest_all)?,
            None => digest_all()?,
        };

        let mut records = Vec::with_capacity(outcomes.len());
        let mut skipped = Vec::new();
        for outcome in outcomes {
            match outcome {
                DigestOutcome::Record(record) => records.push(record),
                DigestOutcome::Skipped(entry) => skipped.push(entry),
            }
        }

        let manifest = Manifest::new(records)?;
        let manifest_path = writer.publish(&manifest)?;
        Ok(BuildReport {
            manifest_path,
            records: manifest.len(),
            skipped,
        })
    }

    /// Digest in order, streaming each line into the pending manifest.
    fn publish_sequential(
        &self,
        writer: &ManifestWriter,
        entries: &[FileEntry],
    ) -> Result<BuildReport, ManifestError> {
        let mut pending = writer.begin()?;
        let mut skipped = Vec::new();

        for entry in entries {
            // An early return drops `pending`, which deletes the temp file.
            match digest_entry(entry, self.digest_config.read_policy)? {
                DigestOutcome::Record(record) => pending.append(&record)?,
                DigestOutcome::Skipped(entry) => skipped.push(entry),
            }
        }

        let records = pending.written();
        let manifest_path = pending.commit()?;
        Ok(BuildReport {
            manifest_path,
            records,
            skipped,
        })
    }
}

fn collect_walk(mut walk: Walk) -> Result<(Vec<FileEntry>, Vec<SkippedEntry>), ManifestError> {
    let mut entries: Vec<FileEntry> = walk.by_ref().collect();
    let skipped = walk.into_skipped();

    for entry in &entries {
        format::ensure_representable(entry.path())?;
    }

    sort_entries(&mut entries);
    Ok((entries, skipped))
}

fn digest_entry(entry: &FileEntry, policy: ReadPolicy) -> Result<DigestOutcome, ManifestError> {
    match hasher::compute_file_digest(entry.source()) {
        Ok(digest) => {
            debug!(path = %entry.path().display(), %digest, "Digested file");
            Ok(DigestOutcome::Record(DigestRecord {
                digest,
                path: entry.path().to_path_buf(),
            }))
        }
        Err(e) if policy == ReadPolicy::SkipUnreadable => {
            warn!(path = %entry.path().display(), error = %e, "Skipping unreadable file");
            Ok(DigestOutcome::Skipped(SkippedEntry {
                path: entry.path().to_path_buf(),
                reason: SkipReason::Unreadable,
                message: e.to_string(),
            }))
        }
        Err(e) => Err(e),
    }
}

//! Treedigest: Deterministic Directory Manifests
//!
//! Computes a sorted SHA-256 manifest of every visible regular file under a
//! directory and publishes it atomically as `.sha256sum-current.txt` inside
//! that directory. Running twice over an unchanged tree yields byte-identical
//! manifests, so two manifests can be diffed to detect changes.
//!
//! The pipeline is walker → sorter → digest engine → writer:
//!
//! ```no_run
//! use treedigest::tree::builder::ManifestBuilder;
//!
//! let report = ManifestBuilder::new(".".into()).build()?;
//! println!("{} files", report.records);
//! # Ok::<(), treedigest::error::ManifestError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod tree;
pub mod types;

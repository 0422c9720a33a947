//! Configuration System
//!
//! Layered configuration for manifest runs. Sources are merged in order, each
//! overriding the previous one:
//!
//! 1. Built-in defaults
//! 2. Global file (`$XDG_CONFIG_HOME/treedigest/config.toml`)
//! 3. Explicit file passed with `--config`
//! 4. Environment (`TREEDIGEST_DIGEST__JOBS=4`, `TREEDIGEST_LOGGING__LEVEL=debug`)
//!
//! Command-line flags are applied on top by the binary.

use crate::error::ManifestError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

mod merge {
    pub mod merge_policy;
}
mod sources {
    pub mod environment;
    pub mod explicit_file;
    pub mod global_file;
}

pub use sources::global_file::global_config_path;

/// What to do with a listed file that cannot be read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReadPolicy {
    /// Abort the run; nothing is published
    #[default]
    FailFast,
    /// Leave the file out, warn, and publish the rest
    SkipUnreadable,
}

/// Digest stage settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestConfig {
    #[serde(default)]
    pub read_policy: ReadPolicy,

    /// Digest files on a worker pool
    #[serde(default = "default_true")]
    pub parallel: bool,

    /// Worker count for parallel digesting (None = one per core)
    #[serde(default)]
    pub jobs: Option<usize>,
}

fn default_true() -> bool {
    true
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            read_policy: ReadPolicy::FailFast,
            parallel: true,
            jobs: None,
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreedigestConfig {
    #[serde(default)]
    pub digest: DigestConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TreedigestConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ManifestError> {
        if self.digest.jobs == Some(0) {
            return Err(ManifestError::Config(
                "digest.jobs must be at least 1".to_string(),
            ));
        }
        self.logging.validate()
    }
}

/// Loads [`TreedigestConfig`] from the layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load defaults, the global file, an optional explicit file and the environment.
    pub fn load(explicit: Option<&Path>) -> Result<TreedigestConfig, ManifestError> {
        let mut builder = merge::merge_policy::builder_with_defaults()?;
        builder = sources::global_file::add_to_builder(builder)?;
        if let Some(path) = explicit {
            builder = sources::explicit_file::add_to_builder(builder, path)?;
        }
        builder = sources::environment::add_to_builder(builder);

        let config: TreedigestConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load a single file on top of the defaults, ignoring other sources.
    pub fn load_from_file(path: &Path) -> Result<TreedigestConfig, ManifestError> {
        let builder = merge::merge_policy::builder_with_defaults()?;
        let builder = sources::explicit_file::add_to_builder(builder, path)?;

        let config: TreedigestConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

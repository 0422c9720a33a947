//! CLI route: resolve configuration for a run and execute it.

use crate::cli::output::format_report;
use crate::cli::parse::Cli;
use crate::config::{ReadPolicy, TreedigestConfig};
use crate::error::ManifestError;
use crate::tree::builder::ManifestBuilder;
use std::path::PathBuf;
use tracing::info;

/// Apply command-line overrides on top of the loaded configuration.
pub fn apply_overrides(mut config: TreedigestConfig, cli: &Cli) -> TreedigestConfig {
    if cli.lenient {
        config.digest.read_policy = ReadPolicy::SkipUnreadable;
    }
    if cli.sequential {
        config.digest.parallel = false;
    }
    if let Some(jobs) = cli.jobs {
        config.digest.parallel = true;
        config.digest.jobs = Some(jobs);
    }

    if cli.quiet {
        config.logging.enabled = false;
    }
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.logging.format = format.clone();
    }
    config
}

/// One manifest run against a target directory
pub struct RunContext {
    target: PathBuf,
    config: TreedigestConfig,
}

impl RunContext {
    pub fn new(target: PathBuf, config: TreedigestConfig) -> Result<Self, ManifestError> {
        config.validate()?;
        Ok(Self { target, config })
    }

    pub fn config(&self) -> &TreedigestConfig {
        &self.config
    }

    /// Build and publish the manifest; returns the status line for stdout.
    pub fn execute(&self) -> Result<String, ManifestError> {
        info!(target = %self.target.display(), "Building manifest");
        let report = ManifestBuilder::new(self.target.clone())
            .with_digest_config(self.config.digest.clone())
            .build()?;
        Ok(format_report(&report))
    }
}

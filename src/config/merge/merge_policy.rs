//! Merge rules: defaults first, later sources override earlier ones.

use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("digest.read_policy", "fail-fast")?
        .set_default("digest.parallel", true)?
        .set_default("logging.level", "warn")?
        .set_default("logging.format", "text")
}

//! Treedigest CLI Binary
//!
//! Writes `.sha256sum-current.txt` for the target directory. Each failure
//! class exits with its own status (see `ManifestError::exit_code`).

use clap::Parser;
use std::process;
use tracing::{error, info};
use treedigest::cli::{apply_overrides, map_error, Cli, RunContext};
use treedigest::config::{ConfigLoader, TreedigestConfig};
use treedigest::error::ManifestError;
use treedigest::logging::init_logging;

fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    if let Err(e) = init_logging(&config.logging) {
        exit_with(&e);
    }

    info!("Treedigest starting");

    let context = match RunContext::new(cli.target.clone(), config) {
        Ok(ctx) => ctx,
        Err(e) => exit_with(&e),
    };

    match context.execute() {
        Ok(output) => {
            info!("Manifest run completed successfully");
            println!("{}", output);
        }
        Err(e) => {
            error!("Manifest run failed: {}", e);
            exit_with(&e);
        }
    }
}

/// Build configuration from config files, environment and CLI flags.
/// Precedence: CLI flags override environment override files override defaults.
fn load_config(cli: &Cli) -> Result<TreedigestConfig, ManifestError> {
    let config = ConfigLoader::load(cli.config.as_deref())?;
    Ok(apply_overrides(config, cli))
}

fn exit_with(e: &ManifestError) -> ! {
    eprintln!("{}", map_error(e));
    process::exit(e.exit_code());
}

//! CLI parse: clap types for treedigest. No behavior; definitions only.

use clap::Parser;
use std::path::PathBuf;

/// Write a sorted SHA-256 manifest of every visible file under a directory
#[derive(Parser, Debug)]
#[command(name = "treedigest", version)]
#[command(
    about = "Write a deterministic SHA-256 manifest (.sha256sum-current.txt) for a directory tree"
)]
pub struct Cli {
    /// Directory to scan; the manifest is written inside it
    #[arg(default_value = ".")]
    pub target: PathBuf,

    /// Configuration file path (layered over the global config)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Skip unreadable files instead of failing the run
    #[arg(long)]
    pub lenient: bool,

    /// Number of digest workers
    #[arg(long, short = 'j')]
    pub jobs: Option<usize>,

    /// Digest files one at a time on the calling thread
    #[arg(long, conflicts_with = "jobs")]
    pub sequential: bool,

    /// Enable debug logging on stderr
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,
}

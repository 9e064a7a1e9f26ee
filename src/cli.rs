//! CLI argument parsing for ipfs-throughput

use clap::Parser;
use std::path::PathBuf;

/// Log file read when no path is given
pub const DEFAULT_LOG_PATH: &str = "ipgs.log";

#[derive(Parser, Debug)]
#[command(name = "ipfs-throughput")]
#[command(version)]
#[command(
    about = "Throughput, latency and implied concurrency from an IPFS fetch log",
    long_about = None
)]
pub struct Cli {
    /// Path to the fetch log
    #[arg(value_name = "LOG_FILE", default_value = DEFAULT_LOG_PATH)]
    pub log_path: PathBuf,
}

use anyhow::Result;
use clap::Parser;
use ipfs_throughput::{cli::Cli, scanner::LogScanner, stats};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for diagnostic output (RUST_LOG, default warn)
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing();

    let scanner = LogScanner::new()?;
    let mut observations = scanner.scan_path(&args.log_path)?;
    observations.sort_by_timestamp();

    let summary = stats::ThroughputStats::compute(&observations);
    println!("{}", stats::render_report(summary.as_ref()));

    Ok(())
}

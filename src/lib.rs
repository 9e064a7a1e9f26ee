//! ipfs-throughput - Throughput and latency statistics for IPFS fetch logs
//!
//! This library scans plain-text fetch logs for `[HH:MM:SS.mmm]` timestamp
//! lines and `durationMs:` markers, pairs every duration with the most recent
//! timestamp, and reduces the pairs to throughput, average latency and
//! implied concurrency.

pub mod cli;
pub mod error;
pub mod scanner;
pub mod stats;

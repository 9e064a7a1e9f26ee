//! Throughput statistics for collected fetch observations
//!
//! Reduces an [`ObservationSet`] to requests per second, mean latency and the
//! Little's Law estimate of in-flight requests (`rps * mean latency`).

use crate::scanner::ObservationSet;
use std::fmt;

/// Span used when every observation shares one timestamp
pub const MIN_SPAN_SECS: f64 = 1.0;

/// Message printed when a log contains no usable observations
pub const NO_ENTRIES_MESSAGE: &str = "No IPFS fetch entries found.";

/// Aggregate statistics for one observation set
#[derive(Debug, Clone, PartialEq)]
pub struct ThroughputStats {
    /// Number of observations
    pub count: usize,
    /// Seconds between earliest and latest observation (floored to 1.0)
    pub span_secs: f64,
    /// Mean fetch duration in milliseconds
    pub avg_ms: f64,
    /// Observations per second over the span
    pub rps: f64,
    /// Average number of fetches in flight
    pub implied_concurrency: f64,
}

impl ThroughputStats {
    /// Compute statistics, or `None` if the set is empty
    pub fn compute(observations: &ObservationSet) -> Option<Self> {
        let first = observations.iter().next()?;
        let (min_ts, max_ts) = observations
            .iter()
            .fold((first.timestamp, first.timestamp), |(lo, hi), o| {
                (lo.min(o.timestamp), hi.max(o.timestamp))
            });

        let count = observations.len();
        let span = max_ts - min_ts;
        let span_secs = if span > 0.0 { span } else { MIN_SPAN_SECS };

        let total_ms = observations
            .iter()
            .try_fold(0u128, |acc, o| acc.checked_add(o.duration_ms))
            .map_or_else(
                || observations.iter().map(|o| o.duration_ms as f64).sum(),
                |total| total as f64,
            );
        let avg_ms = total_ms / count as f64;

        let rps = count as f64 / span_secs;
        let implied_concurrency = rps * (avg_ms / 1000.0);

        Some(Self {
            count,
            span_secs,
            avg_ms,
            rps,
            implied_concurrency,
        })
    }

    /// Mean fetch duration in seconds
    pub fn avg_secs(&self) -> f64 {
        self.avg_ms / 1000.0
    }
}

impl fmt::Display for ThroughputStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Throughput: {:.2} requests/sec ({} requests / {:.3} s)",
            self.rps, self.count, self.span_secs
        )?;
        writeln!(f, "Avg latency: ~{:.1} ms/request", self.avg_ms)?;
        write!(
            f,
            "Implied avg concurrency: ~{:.0} in-flight ({:.2} × {:.4} s)",
            self.implied_concurrency,
            self.rps,
            self.avg_secs()
        )
    }
}

/// Render the report printed to stdout
pub fn render_report(stats: Option<&ThroughputStats>) -> String {
    match stats {
        Some(stats) => stats.to_string(),
        None => NO_ENTRIES_MESSAGE.to_string(),
    }
}

//! Fetch log scanning
//!
//! Lines are classified in priority order:
//! - `[HH:MM:SS.mmm]` at the start of a line updates the last seen timestamp
//!   and is never checked for a duration marker
//! - `durationMs: N` anywhere in the line yields an [`Observation`] paired with
//!   the last seen timestamp, or nothing if no timestamp has been seen yet
//! - everything else is ignored
//!
//! Input is read as raw bytes and decoded leniently, so malformed UTF-8 never
//! aborts a scan.

use crate::error::{Result, ScanError};
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, trace, warn};

const TIMESTAMP_PATTERN: &str = r"^\[(\d{2}):(\d{2}):(\d{2})\.(\d{3})\]";
const DURATION_PATTERN: &str = r"durationMs:\s*(\d+)";
const DIGIT_PATTERN: &str = r"^\d$";

/// One duration marker paired with the timestamp that preceded it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// Time of day in seconds
    pub timestamp: f64,
    /// Fetch duration in milliseconds
    pub duration_ms: u128,
}

impl Observation {
    pub fn new(timestamp: f64, duration_ms: u128) -> Self {
        Self {
            timestamp,
            duration_ms,
        }
    }
}

/// All observations collected during a single scan, in file order until sorted
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationSet {
    observations: Vec<Observation>,
}

impl ObservationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, observation: Observation) {
        self.observations.push(observation);
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.observations.iter()
    }

    pub fn as_slice(&self) -> &[Observation] {
        &self.observations
    }

    /// Stable ascending sort by timestamp
    pub fn sort_by_timestamp(&mut self) {
        self.observations
            .sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
    }
}

impl From<Vec<Observation>> for ObservationSet {
    fn from(observations: Vec<Observation>) -> Self {
        Self { observations }
    }
}

impl FromIterator<Observation> for ObservationSet {
    fn from_iter<I: IntoIterator<Item = Observation>>(iter: I) -> Self {
        Self {
            observations: iter.into_iter().collect(),
        }
    }
}

/// Classification of a single log line
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineKind {
    /// Timestamp line, time of day in seconds
    Timestamp(f64),
    /// Line carrying a duration marker, in milliseconds
    Duration(u128),
    /// Anything else
    Other,
}

/// Compute seconds since midnight from clock fields
///
/// Fields are not range-checked; `[99:99:99.999]` is accepted as written.
pub fn timestamp_seconds(hours: u32, minutes: u32, seconds: u32, millis: u32) -> f64 {
    f64::from(hours * 3600 + minutes * 60 + seconds) + f64::from(millis) / 1000.0
}

/// Decode bytes as UTF-8, dropping invalid sequences
pub fn decode_skipping_invalid(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => Cow::Owned(bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()),
    }
}

/// Split one `\n`-terminated chunk into lines, treating `\r\n` and lone `\r`
/// as line ends too
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.strip_suffix('\n').unwrap_or(text).split('\r')
}

/// Line classifier and observation collector for fetch logs
#[derive(Debug, Clone)]
pub struct LogScanner {
    timestamp: Regex,
    duration: Regex,
    digit: Regex,
}

impl LogScanner {
    /// Compile the timestamp, duration and digit patterns
    pub fn new() -> Result<Self> {
        Ok(Self {
            timestamp: Regex::new(TIMESTAMP_PATTERN)?,
            duration: Regex::new(DURATION_PATTERN)?,
            digit: Regex::new(DIGIT_PATTERN)?,
        })
    }

    fn is_decimal_digit(&self, c: char) -> bool {
        let mut buf = [0u8; 4];
        self.digit.is_match(c.encode_utf8(&mut buf))
    }

    /// Value of a Unicode decimal digit (ASCII or any other `Nd` script)
    ///
    /// `Nd` code points come in contiguous runs of ten starting at zero, so the
    /// value is the offset from the start of the run modulo ten.
    fn digit_value(&self, c: char) -> u32 {
        if let Some(d) = c.to_digit(10) {
            return d;
        }
        let mut zero = u32::from(c);
        while let Some(prev) = zero.checked_sub(1).and_then(char::from_u32) {
            if !self.is_decimal_digit(prev) {
                break;
            }
            zero -= 1;
        }
        (u32::from(c) - zero) % 10
    }

    /// Parse a run of decimal digits, `None` if it overflows `u128`
    pub fn parse_digits(&self, digits: &str) -> Option<u128> {
        digits.chars().try_fold(0u128, |acc, c| {
            acc.checked_mul(10)?
                .checked_add(u128::from(self.digit_value(c)))
        })
    }

    /// Clock field from a timestamp capture group (at most three digits)
    fn field(&self, caps: &Captures<'_>, group: usize) -> u32 {
        caps.get(group).map_or(0, |m| {
            m.as_str()
                .chars()
                .fold(0, |acc, c| acc * 10 + self.digit_value(c))
        })
    }

    /// Classify a single line (without its line terminator)
    pub fn classify(&self, line: &str) -> LineKind {
        if let Some(caps) = self.timestamp.captures(line) {
            return LineKind::Timestamp(timestamp_seconds(
                self.field(&caps, 1),
                self.field(&caps, 2),
                self.field(&caps, 3),
                self.field(&caps, 4),
            ));
        }

        let Some(caps) = self.duration.captures(line) else {
            return LineKind::Other;
        };
        match self.parse_digits(&caps[1]) {
            Some(duration_ms) => LineKind::Duration(duration_ms),
            None => {
                warn!("Duration '{}' exceeds u128, saturating", &caps[1]);
                LineKind::Duration(u128::MAX)
            }
        }
    }

    /// Scan a reader to the end, collecting observations
    pub fn scan_reader<R: BufRead>(&self, mut reader: R) -> Result<ObservationSet> {
        let mut observations = ObservationSet::new();
        let mut last_timestamp: Option<f64> = None;
        let mut orphaned = 0usize;
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }

            let text = decode_skipping_invalid(&buf);
            for line in split_lines(&text) {
                match (self.classify(line), last_timestamp) {
                    (LineKind::Timestamp(ts), _) => last_timestamp = Some(ts),
                    (LineKind::Duration(duration_ms), Some(ts)) => {
                        trace!(timestamp = ts, duration_ms, "observation");
                        observations.push(Observation::new(ts, duration_ms));
                    }
                    (LineKind::Duration(_), None) => orphaned += 1,
                    (LineKind::Other, _) => {}
                }
            }
        }

        debug!(
            observations = observations.len(),
            orphaned, "scan complete"
        );
        Ok(observations)
    }

    /// Open and scan a log file
    pub fn scan_path(&self, path: impl AsRef<Path>) -> Result<ObservationSet> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ScanError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("scanning {}", path.display());

        self.scan_reader(BufReader::new(file)).map_err(|e| match e {
            ScanError::Io(source) => ScanError::Read {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }
}

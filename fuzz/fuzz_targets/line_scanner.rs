#![no_main]

use ipfs_throughput::scanner::LogScanner;
use ipfs_throughput::stats::{render_report, ThroughputStats};
use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    let Ok(scanner) = LogScanner::new() else {
        return;
    };

    // Arbitrary bytes must never abort a scan or panic while reducing
    if let Ok(mut set) = scanner.scan_reader(Cursor::new(data)) {
        set.sort_by_timestamp();
        let _ = render_report(ThroughputStats::compute(&set).as_ref());
    }
});

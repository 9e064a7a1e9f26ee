/// Log scanning benchmarks
///
/// Measures line classification and full scan + compute over synthetic
/// fetch logs of increasing size.
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ipfs_throughput::scanner::LogScanner;
use ipfs_throughput::stats::ThroughputStats;
use std::io::Cursor;

/// Build a log with `entries` fetches, each a timestamp line, a noise line
/// and a duration line
fn synthetic_log(entries: usize) -> Vec<u8> {
    let mut log = String::with_capacity(entries * 96);
    for i in 0..entries {
        let ms = i * 37;
        log.push_str(&format!(
            "[{:02}:{:02}:{:02}.{:03}] INFO property fetch succeeded\n",
            (ms / 3_600_000) % 24,
            (ms / 60_000) % 60,
            (ms / 1000) % 60,
            ms % 1000
        ));
        log.push_str("  cid: 'bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi'\n");
        log.push_str(&format!("  durationMs: {}\n", 50 + (i % 400)));
    }
    log.into_bytes()
}

fn bench_classify(c: &mut Criterion) {
    let scanner = LogScanner::new().unwrap();
    let mut group = c.benchmark_group("classify");

    group.bench_function("timestamp", |b| {
        b.iter(|| scanner.classify(black_box("[12:34:56.789] INFO fetch succeeded")))
    });
    group.bench_function("duration", |b| {
        b.iter(|| scanner.classify(black_box("  attempt: 1, durationMs: 1234 }")))
    });
    group.bench_function("other", |b| {
        b.iter(|| scanner.classify(black_box("  cid: 'bafybeigdyrzt5sfp7udm7hu76uh7y26'")))
    });

    group.finish();
}

fn bench_scan_and_compute(c: &mut Criterion) {
    let scanner = LogScanner::new().unwrap();
    let mut group = c.benchmark_group("scan_and_compute");

    for entries in [1_000usize, 10_000, 100_000] {
        let log = synthetic_log(entries);
        group.throughput(Throughput::Bytes(log.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(entries), &log, |b, log| {
            b.iter(|| {
                let mut set = scanner.scan_reader(Cursor::new(log.as_slice())).unwrap();
                set.sort_by_timestamp();
                black_box(ThroughputStats::compute(&set))
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_classify, bench_scan_and_compute);
criterion_main!(benches);

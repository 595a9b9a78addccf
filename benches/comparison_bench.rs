//! Comparison benchmarks between chunkcrc and the `crc` crate
//!
//! Run with: cargo bench comparison_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

const ISCSI: crc::Crc<u32> = crc::Crc::<u32>::new(&crc::CRC_32_ISCSI);

fn payload(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 251) as u8).collect()
}

fn bench_contiguous(c: &mut Criterion) {
    let mut group = c.benchmark_group("contiguous");

    for size in [64, 1024, 64 * 1024] {
        let data = payload(size);
        assert_eq!(chunkcrc::checksum(&data), ISCSI.checksum(&data));
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("chunkcrc", size), &data, |b, data| {
            b.iter(|| black_box(chunkcrc::checksum(black_box(data))));
        });

        group.bench_with_input(BenchmarkId::new("crc", size), &data, |b, data| {
            b.iter(|| black_box(ISCSI.checksum(black_box(data))));
        });
    }

    group.finish();
}

fn bench_segmented(c: &mut Criterion) {
    let mut group = c.benchmark_group("segmented_1500");
    let data = payload(64 * 1024);
    group.throughput(Throughput::Bytes(data.len() as u64));

    group.bench_function("chunkcrc", |b| {
        b.iter(|| black_box(chunkcrc::crc32c(data.chunks(1500))));
    });

    group.bench_function("crc_digest", |b| {
        b.iter(|| {
            let mut digest = ISCSI.digest();
            for segment in data.chunks(1500) {
                digest.update(segment);
            }
            black_box(digest.finalize())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_contiguous, bench_segmented);
criterion_main!(benches);

//! Benchmark utilities and performance testing
//!
//! Simple throughput measurements for each calculator over whole and chunked
//! payloads. Only available with std feature.

#[cfg(feature = "std")]
use std::time::{Duration, Instant};

use crate::dispatch::{self, checksum_with, Calculator};
use crate::hardware::Hardware;
use crate::software::Software;

/// Simple benchmark statistics
#[derive(Debug, Clone)]
pub struct BenchStats {
    /// Number of checksum calls
    pub count: usize,
    /// Payload bytes per call
    pub payload_size: usize,
    /// Total duration
    pub total_duration: Duration,
    /// Average time per call
    pub avg_ns_per_op: u64,
    /// Throughput in MB/s
    pub mb_per_sec: f64,
}

impl BenchStats {
    /// Create new stats from measurements
    pub fn new(count: usize, payload_size: usize, total_duration: Duration) -> Self {
        let total_ns = total_duration.as_nanos() as u64;
        let avg_ns_per_op = if count > 0 {
            total_ns / count as u64
        } else {
            0
        };
        let mb_per_sec = if total_ns > 0 {
            (count * payload_size) as f64 * 1_000.0 / total_ns as f64
        } else {
            0.0
        };

        Self {
            count,
            payload_size,
            total_duration,
            avg_ns_per_op,
            mb_per_sec,
        }
    }
}

#[cfg(feature = "std")]
impl std::fmt::Display for BenchStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ops x {} B, {:.2}ms total, {} ns/op, {:.1} MB/s",
            self.count,
            self.payload_size,
            self.total_duration.as_secs_f64() * 1000.0,
            self.avg_ns_per_op,
            self.mb_per_sec
        )
    }
}

#[cfg(feature = "std")]
fn payload(size: usize) -> std::vec::Vec<u8> {
    (0..size).map(|i| (i as u32).wrapping_mul(2654435761) as u8).collect()
}

/// Benchmark a calculator over `count` payloads split into `chunk_size` pieces
#[cfg(feature = "std")]
pub fn bench_calculator(
    calc: &dyn Calculator,
    payload_size: usize,
    chunk_size: usize,
    count: usize,
) -> BenchStats {
    let data = payload(payload_size);
    let start = Instant::now();

    for _ in 0..count {
        let crc = checksum_with(calc, data.chunks(chunk_size.max(1)));
        std::hint::black_box(crc);
    }

    let duration = start.elapsed();
    BenchStats::new(count, payload_size, duration)
}

/// Run simple performance test suite
#[cfg(feature = "std")]
pub fn run_perf_test() {
    std::println!("chunkcrc Performance Test Suite");
    std::println!("===============================");
    std::println!("Bound backend: {}", dispatch::backend());

    const TEST_COUNT: usize = 1_000;
    const SIZES: [usize; 4] = [64, 1024, 4096, 65536];

    let hardware = Hardware::detect();
    let mut calculators: std::vec::Vec<(&str, &dyn Calculator)> =
        std::vec![("software", &Software as &dyn Calculator)];
    if let Some(hw) = hardware.as_ref() {
        calculators.push(("hardware", hw as &dyn Calculator));
    }

    for (name, calc) in calculators {
        std::println!("\n{}:", name);
        for size in SIZES {
            let whole = bench_calculator(calc, size, size, TEST_COUNT);
            std::println!("  whole   {}", whole);
            let chunked = bench_calculator(calc, size, 100, TEST_COUNT);
            std::println!("  chunked {}", chunked);
        }
    }
}

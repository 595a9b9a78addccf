//! Incremental CRC32C
//!
//! [`Crc32c`] wraps the dispatched calculator and an [`Accumulator`] for
//! callers that receive a payload piece by piece and cannot hand over the
//! whole chunk sequence at once.

use crate::accumulator::Accumulator;
use crate::dispatch::{self, Backend, Calculator};

/// Streaming CRC32C hasher
///
/// ```rust
/// use chunkcrc::Crc32c;
///
/// let mut hasher = Crc32c::new();
/// hasher.update(b"12345");
/// hasher.update(b"6789");
/// assert_eq!(hasher.finalize(), 0xE3069283);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Crc32c {
    calc: &'static dyn Calculator,
    acc: Accumulator,
}

impl Default for Crc32c {
    fn default() -> Self {
        Self::new()
    }
}

impl Crc32c {
    /// Create a hasher bound to the process-wide calculator
    #[inline]
    pub fn new() -> Self {
        Self::with_calculator(dispatch::calculator())
    }

    /// Create a hasher bound to a specific calculator
    #[inline]
    pub fn with_calculator(calc: &'static dyn Calculator) -> Self {
        Self {
            calc,
            acc: Accumulator::new(),
        }
    }

    /// Feed one chunk
    #[inline]
    pub fn update(&mut self, data: &[u8]) {
        self.calc.update(&mut self.acc, data);
    }

    /// Feed a sequence of chunks
    #[inline]
    pub fn update_chunks<I>(&mut self, chunks: I)
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        for chunk in chunks {
            self.update(chunk.as_ref());
        }
    }

    /// Checksum of everything fed so far; the hasher stays usable
    #[inline]
    pub fn finalize(&self) -> u32 {
        self.calc.finalize(&self.acc)
    }

    /// Start over with an empty input
    #[inline]
    pub fn reset(&mut self) {
        self.acc = Accumulator::new();
    }

    /// Total bytes fed since creation or the last reset
    #[inline]
    pub fn bytes_processed(&self) -> u64 {
        self.acc.bytes_processed()
    }

    /// Backend this hasher computes with
    #[inline]
    pub fn backend(&self) -> Backend {
        self.calc.backend()
    }
}

#[cfg(feature = "std")]
impl std::io::Write for Crc32c {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::software::Software;
    use alloc::vec::Vec;

    static SOFTWARE: Software = Software;

    #[test]
    fn test_empty() {
        assert_eq!(Crc32c::new().finalize(), 0);
        assert_eq!(Crc32c::default().bytes_processed(), 0);
    }

    #[test]
    fn test_incremental_matches_oneshot() {
        let data: Vec<u8> = (0..777u32).map(|i| (i % 251) as u8).collect();
        let expected = crate::checksum(&data);

        let mut hasher = Crc32c::new();
        for piece in data.chunks(13) {
            hasher.update(piece);
        }
        assert_eq!(hasher.finalize(), expected);
        assert_eq!(hasher.bytes_processed(), 777);

        let mut hasher = Crc32c::with_calculator(&SOFTWARE);
        hasher.update_chunks(data.chunks(100));
        assert_eq!(hasher.finalize(), expected);
        assert_eq!(hasher.backend(), Backend::Software);
    }

    #[test]
    fn test_finalize_is_repeatable() {
        let mut hasher = Crc32c::with_calculator(&SOFTWARE);
        hasher.update(b"1234567890abcdefXYZ");
        let first = hasher.finalize();
        assert_eq!(hasher.finalize(), first);

        hasher.update(b"!");
        assert_eq!(hasher.finalize(), crate::checksum(b"1234567890abcdefXYZ!"));
    }

    #[test]
    fn test_reset() {
        let mut hasher = Crc32c::new();
        hasher.update(b"garbage");
        hasher.reset();
        hasher.update(b"123456789");
        assert_eq!(hasher.finalize(), 0xE3069283);
        assert_eq!(hasher.bytes_processed(), 9);
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_io_write() {
        use std::io::Write;

        let mut hasher = Crc32c::new();
        hasher.write_all(b"1234").unwrap();
        write!(hasher, "{}", 56789).unwrap();
        hasher.flush().unwrap();
        assert_eq!(hasher.finalize(), 0xE3069283);
    }
}

//! Per-computation checksum state
//!
//! The accumulator is the only thing carried across chunk boundaries: the
//! running CRC register plus a partially filled 16-byte block used by the
//! software path. The hardware path only touches the register.

/// Size of a slice-by-16 block in bytes
pub const BLOCK_SIZE: usize = 16;

/// Initial register value for CRC32C
pub const INITIAL: u32 = 0xFFFF_FFFF;

/// Running state of one checksum computation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accumulator {
    pub(crate) crc: u32,
    pub(crate) block: [u8; BLOCK_SIZE],
    pub(crate) filled: usize,
    pub(crate) total: u64,
}

impl Default for Accumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Accumulator {
    /// Create a fresh accumulator seeded with all ones
    #[inline]
    pub const fn new() -> Self {
        Self {
            crc: INITIAL,
            block: [0u8; BLOCK_SIZE],
            filled: 0,
            total: 0,
        }
    }

    /// Number of input bytes folded so far
    #[inline]
    pub const fn bytes_processed(&self) -> u64 {
        self.total
    }

    /// Bytes waiting in the block buffer
    #[inline]
    pub(crate) fn pending(&self) -> &[u8] {
        &self.block[..self.filled]
    }
}

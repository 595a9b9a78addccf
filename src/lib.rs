//! chunkcrc: CRC32C over chunked payloads for messaging and transport layers
//!
//! This crate computes CRC32C (Castagnoli) checksums over byte sequences that
//! arrive as several non-contiguous chunks, such as the segments of a wire
//! frame, without copying them into one buffer first.
//!
//! # Backends
//!
//! ```text
//! +-------------------+-------------------------------------------+
//! | sse4.2 / arm-crc  | CPU crc32c instruction, 8 bytes per step  |
//! | software          | slice-by-16 tables, 16 bytes per step     |
//! +-------------------+-------------------------------------------+
//! ```
//!
//! The backend is chosen once per process (see [`dispatch`]) and both produce
//! identical results. Setting `CHUNKCRC_FORCE_SOFTWARE=1` pins the software
//! path.
//!
//! # Features
//!
//! - Any `IntoIterator` of `AsRef<[u8]>` chunks, including empty ones
//! - Result independent of where the chunk boundaries fall
//! - Streaming [`Crc32c`] hasher for data that trickles in
//! - Little-endian CRC32C trailers for framed payloads
//! - `no_std` support; runtime CPU detection with `std`
//!
//! # Example
//!
//! ```rust
//! use chunkcrc::{checksum, crc32c, verify};
//!
//! let header = b"1234";
//! let body = b"56789";
//! assert_eq!(crc32c([&header[..], &body[..]]), 0xE3069283);
//! assert_eq!(checksum(b"123456789"), 0xE3069283);
//!
//! verify([&header[..], &body[..]], 0xE3069283)?;
//! # Ok::<(), chunkcrc::Error>(())
//! ```

#![no_std]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[cfg(feature = "std")]
extern crate std;

#[cfg(test)]
extern crate alloc;

pub mod accumulator;
pub mod dispatch;
pub mod error;
pub mod hardware;
pub mod hasher;
pub mod software;
pub mod table;
pub mod trailer;

#[cfg(all(feature = "std", test))]
pub mod bench;

// Re-export main types
pub use accumulator::Accumulator;
pub use dispatch::{backend, calculator, Backend, Calculator};
pub use error::{Error, Result};
pub use hardware::Hardware;
pub use hasher::Crc32c;
pub use software::Software;
pub use table::CRC32C_POLYNOMIAL;

/// Compute the CRC32C of the concatenation of `chunks`
///
/// Uses the backend bound by [`dispatch::calculator`].
#[inline]
pub fn crc32c<I>(chunks: I) -> u32
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    dispatch::checksum_with(dispatch::calculator(), chunks)
}

/// Compute the CRC32C of a contiguous buffer
#[inline]
pub fn checksum(data: &[u8]) -> u32 {
    crc32c([data])
}

/// Verify the CRC32C of `chunks` against an expected value
#[inline]
pub fn verify<I>(chunks: I, expected: u32) -> Result<()>
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    trailer::verify_chunks(chunks, expected)
}

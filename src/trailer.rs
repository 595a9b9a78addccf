//! CRC32C trailers for framed payloads
//!
//! A trailer is the checksum of the preceding payload, stored as a
//! little-endian `u32` directly after it.
//!
//! ```text
//! +---------------------+------------------+
//! | Payload (N bytes)   | CRC32C u32 (LE)  |
//! +---------------------+------------------+
//! ```

use crate::error::{Error, Result};

/// Trailer size in bytes
pub const TRAILER_SIZE: usize = 4;

/// Write the trailer for `buf[..payload_len]` right after the payload
///
/// Returns the framed length (`payload_len + 4`).
#[inline]
pub fn append(buf: &mut [u8], payload_len: usize) -> Result<usize> {
    let end = payload_len
        .checked_add(TRAILER_SIZE)
        .ok_or(Error::ShortBuffer)?;

    if buf.len() < end {
        return Err(Error::ShortBuffer);
    }

    let crc = crate::checksum(&buf[..payload_len]);
    buf[payload_len..end].copy_from_slice(&crc.to_le_bytes());

    Ok(end)
}

/// Separate a frame into payload and stored checksum
#[inline]
pub fn split(frame: &[u8]) -> Result<(&[u8], u32)> {
    if frame.len() < TRAILER_SIZE {
        return Err(Error::UnexpectedEof);
    }

    let (payload, trailer) = frame.split_at(frame.len() - TRAILER_SIZE);
    let stored = u32::from_le_bytes([trailer[0], trailer[1], trailer[2], trailer[3]]);

    Ok((payload, stored))
}

/// Check a frame's trailer and return its payload
#[inline]
pub fn verify(frame: &[u8]) -> Result<&[u8]> {
    let (payload, stored) = split(frame)?;
    verify_chunks([payload], stored)?;
    Ok(payload)
}

/// Check a payload given as chunks against a stored checksum
#[inline]
pub fn verify_chunks<I>(chunks: I, stored: u32) -> Result<()>
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    if crate::crc32c(chunks) != stored {
        return Err(Error::CrcMismatch);
    }

    Ok(())
}

//! CRC32C using the CPU's dedicated instruction
//!
//! x86/x86_64 use SSE4.2 `crc32`, aarch64 uses the ARMv8 CRC extension.
//! On 64-bit targets eight bytes are folded per instruction; whatever is left
//! of each chunk goes through the byte-wide variant.

#![allow(unsafe_code)]

use crate::accumulator::Accumulator;
use crate::dispatch::{Backend, Calculator};

/// Instruction-backed calculator
///
/// A value of this type can only be obtained from [`Hardware::detect`], so
/// holding one means the instruction is present on the running CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hardware {
    _private: (),
}

static HARDWARE: Hardware = Hardware { _private: () };

impl Hardware {
    /// Probe the CPU, returning `None` when the instruction is missing
    #[inline]
    pub fn detect() -> Option<Self> {
        Self::detect_static().copied()
    }

    #[inline]
    pub(crate) fn detect_static() -> Option<&'static Self> {
        if supported() {
            Some(&HARDWARE)
        } else {
            None
        }
    }

    /// Whether the 64-bit instruction variant is used
    #[inline]
    pub const fn wide(&self) -> bool {
        cfg!(any(target_arch = "x86_64", target_arch = "aarch64"))
    }
}

impl Calculator for Hardware {
    #[inline]
    fn backend(&self) -> Backend {
        if cfg!(target_arch = "aarch64") {
            Backend::ArmCrc
        } else {
            Backend::Sse42
        }
    }

    #[inline]
    fn update(&self, acc: &mut Accumulator, data: &[u8]) {
        acc.total += data.len() as u64;

        // Bytes buffered by the software path come first
        // SAFETY: `self` exists only if `supported()` returned true
        unsafe {
            acc.crc = fold(acc.crc, acc.pending());
            acc.filled = 0;
            acc.crc = fold(acc.crc, data);
        }
    }

    #[inline]
    fn finalize(&self, acc: &Accumulator) -> u32 {
        // SAFETY: as in `update`
        !unsafe { fold(acc.crc, acc.pending()) }
    }
}

#[allow(unreachable_code)]
fn supported() -> bool {
    #[cfg(all(feature = "std", any(target_arch = "x86_64", target_arch = "x86")))]
    {
        return std::is_x86_feature_detected!("sse4.2");
    }

    #[cfg(all(feature = "std", target_arch = "aarch64"))]
    {
        return std::arch::is_aarch64_feature_detected!("crc");
    }

    // Without std only compile-time features can be trusted
    cfg!(any(
        all(
            any(target_arch = "x86_64", target_arch = "x86"),
            target_feature = "sse4.2"
        ),
        all(target_arch = "aarch64", target_feature = "crc")
    ))
}

#[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
#[inline(always)]
fn read_u64_le(word: &[u8]) -> u64 {
    u64::from_le_bytes([
        word[0], word[1], word[2], word[3], word[4], word[5], word[6], word[7],
    ])
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "sse4.2")]
unsafe fn fold(mut crc: u32, data: &[u8]) -> u32 {
    use core::arch::x86_64::{_mm_crc32_u64, _mm_crc32_u8};

    let mut words = data.chunks_exact(8);
    for word in &mut words {
        crc = _mm_crc32_u64(crc as u64, read_u64_le(word)) as u32;
    }

    for &byte in words.remainder() {
        crc = _mm_crc32_u8(crc, byte);
    }

    crc
}

#[cfg(target_arch = "x86")]
#[target_feature(enable = "sse4.2")]
unsafe fn fold(mut crc: u32, data: &[u8]) -> u32 {
    use core::arch::x86::_mm_crc32_u8;

    for &byte in data {
        crc = _mm_crc32_u8(crc, byte);
    }

    crc
}

#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "crc")]
unsafe fn fold(mut crc: u32, data: &[u8]) -> u32 {
    use core::arch::aarch64::{__crc32cb, __crc32cd};

    let mut words = data.chunks_exact(8);
    for word in &mut words {
        crc = __crc32cd(crc, read_u64_le(word));
    }

    for &byte in words.remainder() {
        crc = __crc32cb(crc, byte);
    }

    crc
}

// No instruction to use; `Hardware` is never constructed on these targets.
#[cfg(not(any(target_arch = "x86_64", target_arch = "x86", target_arch = "aarch64")))]
unsafe fn fold(crc: u32, data: &[u8]) -> u32 {
    use crate::table::CRC32C_TABLE;

    data.iter().fold(crc, |crc, &byte| {
        CRC32C_TABLE[0][((crc ^ byte as u32) & 0xFF) as usize] ^ (crc >> 8)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::software::Software;
    use alloc::vec::Vec;

    fn pattern(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i.wrapping_mul(167) ^ (i >> 3)) as u8).collect()
    }

    #[test]
    fn test_matches_software() {
        let Some(hw) = Hardware::detect() else {
            return;
        };

        let data = pattern(4099);
        for len in [0, 1, 7, 8, 9, 15, 16, 17, 63, 64, 65, 1024, 4099] {
            let chunk = [&data[..len]];
            assert_eq!(hw.checksum(chunk), Software.checksum(chunk), "len {len}");
        }
    }

    #[test]
    fn test_known_vectors() {
        let Some(hw) = Hardware::detect() else {
            return;
        };

        assert_eq!(hw.checksum::<[&[u8]; 0]>([]), 0);
        assert_eq!(hw.checksum([b"123456789"]), 0xE3069283);
        assert_eq!(hw.checksum([[0u8; 32]]), 0x8A9136AA);
        assert_eq!(hw.checksum([[0xFFu8; 32]]), 0x62A8AB43);
    }

    #[test]
    fn test_unaligned_chunks() {
        let Some(hw) = Hardware::detect() else {
            return;
        };

        let data = pattern(300);
        let expected = Software.checksum([&data]);
        let split: Vec<&[u8]> = [&data[..5], &data[5..13], &data[13..14], &data[14..]].to_vec();
        assert_eq!(hw.checksum(&split), expected);
        assert_eq!(hw.checksum(data.chunks(3)), expected);
    }

    #[test]
    fn test_accumulator_shared_with_software() {
        let Some(hw) = Hardware::detect() else {
            return;
        };

        // Software leaves bytes in the block buffer, hardware must fold them
        let mut acc = Accumulator::new();
        Software.update(&mut acc, b"12345");
        hw.update(&mut acc, b"6789");
        assert_eq!(hw.finalize(&acc), 0xE3069283);

        let mut acc = Accumulator::new();
        Software.update(&mut acc, b"123456789");
        assert_eq!(hw.finalize(&acc), 0xE3069283);

        // And the other way round, across a block boundary
        let data = pattern(100);
        let mut acc = Accumulator::new();
        hw.update(&mut acc, &data[..21]);
        Software.update(&mut acc, &data[21..50]);
        hw.update(&mut acc, &data[50..77]);
        Software.update(&mut acc, &data[77..]);
        assert_eq!(Software.finalize(&acc), Software.checksum([&data]));
        assert_eq!(hw.finalize(&acc), Software.checksum([&data]));
        assert_eq!(acc.bytes_processed(), 100);
    }

    #[test]
    fn test_backend_reported() {
        if let Some(hw) = Hardware::detect() {
            assert!(hw.backend().is_hardware());
        }
    }
}

//! Portable slice-by-16 CRC32C
//!
//! Complete 16-byte blocks are folded with one table lookup per byte; the
//! final partial block is folded byte by byte when the computation ends.
//! Blocks are assembled across chunk boundaries, so the result depends only
//! on the concatenated content.

use crate::accumulator::{Accumulator, BLOCK_SIZE};
use crate::dispatch::{Backend, Calculator};
use crate::table::CRC32C_TABLE;

/// Table-driven calculator, available on every target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Software;

impl Calculator for Software {
    #[inline]
    fn backend(&self) -> Backend {
        Backend::Software
    }

    #[inline]
    fn update(&self, acc: &mut Accumulator, data: &[u8]) {
        update(acc, data);
    }

    #[inline]
    fn finalize(&self, acc: &Accumulator) -> u32 {
        finalize(acc)
    }
}

/// Feed `data` into the accumulator
pub(crate) fn update(acc: &mut Accumulator, mut data: &[u8]) {
    acc.total += data.len() as u64;

    // Top up a block left over from the previous chunk
    if acc.filled > 0 {
        let take = (BLOCK_SIZE - acc.filled).min(data.len());
        acc.block[acc.filled..acc.filled + take].copy_from_slice(&data[..take]);
        acc.filled += take;
        data = &data[take..];

        if acc.filled < BLOCK_SIZE {
            return;
        }

        acc.crc = fold_block(acc.crc, &acc.block);
        acc.filled = 0;
    }

    let mut blocks = data.chunks_exact(BLOCK_SIZE);
    for block in &mut blocks {
        acc.crc = fold_block(acc.crc, block);
    }

    let rest = blocks.remainder();
    acc.block[..rest.len()].copy_from_slice(rest);
    acc.filled = rest.len();
}

/// Fold the pending tail and return the complemented register
pub(crate) fn finalize(acc: &Accumulator) -> u32 {
    let mut crc = acc.crc;

    for &byte in acc.pending() {
        crc = fold_byte(crc, byte);
    }

    !crc
}

#[inline(always)]
fn fold_byte(crc: u32, byte: u8) -> u32 {
    CRC32C_TABLE[0][((crc ^ byte as u32) & 0xFF) as usize] ^ (crc >> 8)
}

/// Fold one 16-byte block
///
/// The register only overlaps the first four bytes; the remaining twelve are
/// looked up raw. Byte `p` of the block uses row `15 - p`.
#[inline(always)]
fn fold_block(crc: u32, block: &[u8]) -> u32 {
    debug_assert_eq!(block.len(), BLOCK_SIZE);
    let t = &CRC32C_TABLE;
    let lo = crc ^ u32::from_le_bytes([block[0], block[1], block[2], block[3]]);

    t[15][(lo & 0xFF) as usize]
        ^ t[14][((lo >> 8) & 0xFF) as usize]
        ^ t[13][((lo >> 16) & 0xFF) as usize]
        ^ t[12][(lo >> 24) as usize]
        ^ t[11][block[4] as usize]
        ^ t[10][block[5] as usize]
        ^ t[9][block[6] as usize]
        ^ t[8][block[7] as usize]
        ^ t[7][block[8] as usize]
        ^ t[6][block[9] as usize]
        ^ t[5][block[10] as usize]
        ^ t[4][block[11] as usize]
        ^ t[3][block[12] as usize]
        ^ t[2][block[13] as usize]
        ^ t[1][block[14] as usize]
        ^ t[0][block[15] as usize]
}

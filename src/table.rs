//! Slice-by-16 lookup table for the Castagnoli polynomial
//!
//! Row `j` holds the contribution of a byte that still has `j` bytes after it
//! inside a 16-byte block, so row 0 is the classic byte-at-a-time table.

/// CRC32C polynomial (Castagnoli, reflected)
pub const CRC32C_POLYNOMIAL: u32 = 0x82F63B78;

/// Number of rows, one per byte position in a block
pub const TABLE_ROWS: usize = 16;

/// Pre-computed slice-by-16 table, evaluated at compile time
pub static CRC32C_TABLE: [[u32; 256]; TABLE_ROWS] = build();

/// Generate the slice-by-16 table at compile time
///
/// Every seed keeps being reduced for 16 rounds of 8 steps; the working
/// value after round `j` lands in row `j`.
const fn build() -> [[u32; 256]; TABLE_ROWS] {
    let mut table = [[0u32; 256]; TABLE_ROWS];
    let mut i = 0;

    while i < 256 {
        let mut crc = i as u32;
        let mut row = 0;

        while row < TABLE_ROWS {
            let mut step = 0;

            while step < 8 {
                if crc & 1 != 0 {
                    crc = (crc >> 1) ^ CRC32C_POLYNOMIAL;
                } else {
                    crc >>= 1;
                }
                step += 1;
            }

            table[row][i] = crc;
            row += 1;
        }

        i += 1;
    }

    table
}

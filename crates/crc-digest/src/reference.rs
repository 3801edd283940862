//! Bitwise reference implementations.
//!
//! One bit per step, no tables. These mirror the polynomial-division
//! definition directly and serve as the oracle for the table generator, the
//! slicing engine and the folding kernels.

// SAFETY: All array indexing uses bounded loop indices (0..data.len()).
#![allow(clippy::indexing_slicing)]

/// Bitwise CRC-32 (reflected, LSB-first).
///
/// `poly` is the reflected polynomial; `crc` is the raw register, and the
/// raw register is returned (no final XOR).
#[must_use]
pub const fn crc32_bitwise(poly: u32, mut crc: u32, data: &[u8]) -> u32 {
  let mut i = 0;
  while i < data.len() {
    crc ^= data[i] as u32;
    let mut bit = 0;
    while bit < 8 {
      crc = if crc & 1 != 0 { (crc >> 1) ^ poly } else { crc >> 1 };
      bit += 1;
    }
    i += 1;
  }
  crc
}

/// Bitwise CRC-24 (normal, MSB-first).
///
/// `poly` is the normal polynomial without the x^24 term; `crc` is the
/// conventional 24-bit register (not the byte-swapped table layout).
#[must_use]
pub const fn crc24_bitwise(poly: u32, mut crc: u32, data: &[u8]) -> u32 {
  let mut i = 0;
  while i < data.len() {
    crc ^= (data[i] as u32) << 16;
    let mut bit = 0;
    while bit < 8 {
      crc <<= 1;
      if crc & 0x0100_0000 != 0 {
        crc ^= poly;
      }
      bit += 1;
    }
    crc &= 0x00FF_FFFF;
    i += 1;
  }
  crc
}

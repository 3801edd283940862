//! Sliced lookup tables.
//!
//! Each table is 1024 entries: four 256-entry slices. Slice 0 is the classic
//! byte-indexed table. Slice `k` gives the contribution of a byte that still
//! has `k` more bytes to travel through the register:
//!
//! ```text
//! T[256k + i] = (T[256(k-1) + i] >> 8) ^ T[T[256(k-1) + i] & 0xFF]
//! ```
//!
//! Tables are generated at compile time, so there is no runtime
//! initialization and nothing to synchronize.
#![allow(clippy::indexing_slicing)] // Loop bounds keep every index below 1024.

/// A four-slice lookup table.
pub type Table = [u32; 1024];

/// CRC-32 polynomial, normal (MSB-first) form.
pub const CRC32_POLY: u32 = 0x04C1_1DB7;

/// CRC-32 polynomial, reflected form.
pub const CRC32_POLY_REFLECTED: u32 = CRC32_POLY.reverse_bits();

/// CRC-24/RFC2440 polynomial, normal form.
pub const CRC24_POLY: u32 = 0x86_4C_FB;

/// Table shared by CRC-32 and CRC-32/RFC1510.
pub static CRC32_TABLE: Table = slice(crc32_base());

/// CRC-24/RFC2440 table, in the byte-swapped register layout.
pub static CRC24_TABLE: Table = slice(crc24_base());

// ─────────────────────────────────────────────────────────────────────────────
// Generation
// ─────────────────────────────────────────────────────────────────────────────

const fn crc32_base() -> [u32; 256] {
  let mut table = [0u32; 256];
  let mut i = 0usize;
  while i < 256 {
    let mut crc = i as u32;
    let mut j = 0;
    while j < 8 {
      crc = if crc & 1 != 0 { (crc >> 1) ^ CRC32_POLY_REFLECTED } else { crc >> 1 };
      j += 1;
    }
    table[i] = crc;
    i += 1;
  }
  table
}

/// CRC-24 entries are computed MSB-first, then moved into the byte-swapped
/// layout (`bswap(crc << 8)`) so the reflected-style update rule applies.
const fn crc24_base() -> [u32; 256] {
  let mut table = [0u32; 256];
  let mut i = 0usize;
  while i < 256 {
    let mut crc = (i as u32) << 16;
    let mut j = 0;
    while j < 8 {
      crc <<= 1;
      if crc & 0x100_0000 != 0 {
        crc ^= CRC24_POLY | 0x100_0000;
      }
      j += 1;
    }
    table[i] = (crc << 8).swap_bytes();
    i += 1;
  }
  table
}

const fn slice(base: [u32; 256]) -> Table {
  let mut table = [0u32; 1024];
  let mut i = 0usize;
  while i < 256 {
    table[i] = base[i];
    i += 1;
  }

  let mut k = 1usize;
  while k < 4 {
    let mut i = 0usize;
    while i < 256 {
      let prev = table[256 * (k - 1) + i];
      table[256 * k + i] = (prev >> 8) ^ table[(prev & 0xFF) as usize];
      i += 1;
    }
    k += 1;
  }
  table
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn known_entries() {
    assert_eq!(CRC32_TABLE[0], 0);
    assert_eq!(CRC32_TABLE[1], 0x7707_3096);
    assert_eq!(CRC32_TABLE[255], 0x2D02_EF8D);
    assert_eq!(CRC32_TABLE[256 + 1], 0x191B_3141);

    assert_eq!(CRC24_TABLE[0], 0);
    assert_eq!(CRC24_TABLE[1], 0x00FB_4C86);
  }

  #[test]
  fn reflected_poly() {
    assert_eq!(CRC32_POLY_REFLECTED, 0xEDB8_8320);
  }

  #[test]
  fn crc24_entries_leave_top_byte_clear() {
    assert!(CRC24_TABLE.iter().all(|&t| t >> 24 == 0));
  }

  #[test]
  fn slices_follow_recurrence() {
    for table in [&CRC32_TABLE, &CRC24_TABLE] {
      for k in 1..4 {
        for i in 0..256 {
          let prev = table[256 * (k - 1) + i];
          assert_eq!(table[256 * k + i], (prev >> 8) ^ table[(prev & 0xFF) as usize]);
        }
      }
    }
  }

  #[test]
  fn base_slices_match_bitwise_reference() {
    use crate::reference::{crc24_bitwise, crc32_bitwise};
    for i in 0..=255u8 {
      let idx = i as usize;
      assert_eq!(CRC32_TABLE[idx], crc32_bitwise(CRC32_POLY_REFLECTED, 0, &[i]), "i={i}");
      assert_eq!(CRC24_TABLE[idx], (crc24_bitwise(CRC24_POLY, 0, &[i]) << 8).swap_bytes(), "i={i}");
    }
  }
}

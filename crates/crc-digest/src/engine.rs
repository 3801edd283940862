//! Portable update engines.
//!
//! Both engines work on any [`Table`] from [`crate::tables`]: the CRC-24 table
//! is stored in a byte-swapped layout so the same update rule serves both
//! families.
//!
//! | Engine | Bytes per lookup round | Use |
//! |--------|------------------------|-----|
//! | [`next`] / [`update_bytewise`] | 1 | tails, reference |
//! | [`next4`] / [`update_sliced`] | 4 | bulk |
//!
//! `update_sliced` consumes 16-byte blocks, then 4-byte words, then the
//! final 0..=3 bytes. Splitting the input differently never changes the
//! result: the register update is a homomorphism over concatenation.

// Table indices are `0..=255` plus a slice offset of at most 768.
#![allow(clippy::indexing_slicing)]

use crate::tables::Table;

/// Apply one byte (Sarwate).
#[inline(always)]
#[must_use]
pub const fn next(table: &Table, crc: u32, byte: u8) -> u32 {
  (crc >> 8) ^ table[((crc as u8) ^ byte) as usize]
}

/// Apply four bytes packed little-endian into `word`.
///
/// Equivalent to four calls to [`next`].
#[inline(always)]
#[must_use]
pub const fn next4(table: &Table, crc: u32, word: u32) -> u32 {
  let x = crc ^ word;
  table[768 + (x & 0xFF) as usize]
    ^ table[512 + ((x >> 8) & 0xFF) as usize]
    ^ table[256 + ((x >> 16) & 0xFF) as usize]
    ^ table[(x >> 24) as usize]
}

/// Byte-at-a-time update.
#[inline]
#[must_use]
pub fn update_bytewise(table: &Table, crc: u32, data: &[u8]) -> u32 {
  data.iter().fold(crc, |crc, &b| next(table, crc, b))
}

/// Slicing-by-4 update with 16-byte, 4-byte and 1-byte tiers.
#[inline]
#[must_use]
pub fn update_sliced(table: &Table, mut crc: u32, data: &[u8]) -> u32 {
  let (blocks, rest) = data.as_chunks::<16>();
  for block in blocks {
    let (words, _) = block.as_chunks::<4>();
    for word in words {
      crc = next4(table, crc, u32::from_le_bytes(*word));
    }
  }

  let (words, tail) = rest.as_chunks::<4>();
  for word in words {
    crc = next4(table, crc, u32::from_le_bytes(*word));
  }

  update_bytewise(table, crc, tail)
}

#[cfg(test)]
mod tests {
  extern crate std;

  use std::vec::Vec;

  use super::*;
  use crate::tables::{CRC24_TABLE, CRC32_TABLE};

  const CHECK: &[u8] = b"123456789";

  fn sample(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i as u8).wrapping_mul(31).wrapping_add(7)).collect()
  }

  #[test]
  fn next4_matches_four_nexts() {
    for table in [&CRC32_TABLE, &CRC24_TABLE] {
      for &(crc, word) in &[(0u32, 0u32), (0xFFFF_FFFF, 0x3433_3231), (0x00CE_04B7, 0xDEAD_BEEF), (0x1234_5678, 1)] {
        let bytes = word.to_le_bytes();
        let expected = bytes.iter().fold(crc, |c, &b| next(table, c, b));
        assert_eq!(next4(table, crc, word), expected, "crc={crc:#010X} word={word:#010X}");
      }
    }
  }

  #[test]
  fn engines_agree_on_short_lengths() {
    for len in 0..=20 {
      let data = sample(len);
      for (table, init) in [(&CRC32_TABLE, 0xFFFF_FFFF), (&CRC32_TABLE, 0), (&CRC24_TABLE, 0x00CE_04B7)] {
        assert_eq!(
          update_sliced(table, init, &data),
          update_bytewise(table, init, &data),
          "len={len} init={init:#010X}"
        );
      }
    }
  }

  #[test]
  fn engines_agree_on_tier_boundaries() {
    for len in [15, 16, 17, 19, 31, 32, 33, 63, 64, 65, 255, 256, 257, 1021] {
      let data = sample(len);
      assert_eq!(update_sliced(&CRC32_TABLE, !0, &data), update_bytewise(&CRC32_TABLE, !0, &data), "len={len}");
      assert_eq!(
        update_sliced(&CRC24_TABLE, 0x00CE_04B7, &data),
        update_bytewise(&CRC24_TABLE, 0x00CE_04B7, &data),
        "len={len}"
      );
    }
  }

  #[test]
  fn check_string() {
    assert_eq!(!update_sliced(&CRC32_TABLE, !0, CHECK), 0xCBF4_3926);
    assert_eq!(update_sliced(&CRC32_TABLE, 0, CHECK), 0x2DFD_2D88);
    assert_eq!(update_sliced(&CRC24_TABLE, 0x00CE_04B7, CHECK) & 0x00FF_FFFF, 0x0002_CF21);
  }

  #[test]
  fn crc24_register_top_byte_stays_clear() {
    let data = sample(4096);
    let mut crc = 0x00CE_04B7;
    for chunk in data.chunks(7) {
      crc = update_sliced(&CRC24_TABLE, crc, chunk);
      assert_eq!(crc >> 24, 0);
    }
  }

  /// The classic CRC-24 word step reads the fourth lookup index from the
  /// input word alone. With a clear top register byte the two forms agree.
  #[test]
  fn crc24_word_step_ignores_register_top_byte() {
    fn next4_input_high(table: &Table, crc: u32, word: u32) -> u32 {
      let x = crc ^ word;
      table[768 + (x & 0xFF) as usize]
        ^ table[512 + ((x >> 8) & 0xFF) as usize]
        ^ table[256 + ((x >> 16) & 0xFF) as usize]
        ^ table[(word >> 24) as usize]
    }

    let data = sample(1024);
    let mut crc = 0x00CE_04B7;
    for word in data.as_chunks::<4>().0 {
      let word = u32::from_le_bytes(*word);
      let expected = next4_input_high(&CRC24_TABLE, crc, word);
      crc = next4(&CRC24_TABLE, crc, word);
      assert_eq!(crc, expected);
    }
  }

  #[test]
  fn split_points_do_not_matter() {
    let data = sample(100);
    let whole = update_sliced(&CRC32_TABLE, !0, &data);
    for split in 0..=data.len() {
      let (a, b) = data.split_at(split);
      let crc = update_sliced(&CRC32_TABLE, !0, a);
      assert_eq!(update_sliced(&CRC32_TABLE, crc, b), whole, "split={split}");
    }
  }
}

//! x86_64 PCLMULQDQ kernels.
//!
//! Fold by four lanes while 64 bytes remain, merge to one lane, fold the
//! remaining whole lanes, then reduce 128 → 64 → 32 bits (Barrett).
//!
//! # Safety
//!
//! Callers must ensure SSE4.1 and PCLMULQDQ are available before executing
//! these kernels (the dispatcher does this).
#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]

use core::arch::x86_64::*;

use crate::{
  engine,
  fold::{CRC24_KEYS, CRC32_KEYS, FoldKeys, crc24_lift},
  tables::{CRC24_TABLE, CRC32_TABLE},
};

// ─────────────────────────────────────────────────────────────────────────────
// SIMD helpers
// ─────────────────────────────────────────────────────────────────────────────

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn load(block: &[u8; 16]) -> __m128i {
  _mm_loadu_si128(block.as_ptr().cast())
}

/// Reverse the bits within every byte via a nibble lookup.
#[inline]
#[target_feature(enable = "ssse3")]
unsafe fn bitrev_bytes(x: __m128i) -> __m128i {
  let lut = _mm_setr_epi8(0x0, 0x8, 0x4, 0xC, 0x2, 0xA, 0x6, 0xE, 0x1, 0x9, 0x5, 0xD, 0x3, 0xB, 0x7, 0xF);
  let mask = _mm_set1_epi8(0x0F);
  let lo = _mm_and_si128(x, mask);
  let hi = _mm_and_si128(_mm_srli_epi16(x, 4), mask);
  // Each shuffled byte is at most 0x0F, so the 16-bit shift never crosses bytes.
  _mm_or_si128(_mm_slli_epi16(_mm_shuffle_epi8(lut, lo), 4), _mm_shuffle_epi8(lut, hi))
}

#[inline]
#[target_feature(enable = "ssse3")]
unsafe fn lane<const BITREV: bool>(block: &[u8; 16]) -> __m128i {
  let x = load(block);
  if BITREV { bitrev_bytes(x) } else { x }
}

/// `b ^ a.lo * keys.lo ^ a.hi * keys.hi`
#[inline]
#[target_feature(enable = "pclmulqdq,sse2")]
unsafe fn reduce128(a: __m128i, b: __m128i, keys: __m128i) -> __m128i {
  let t1 = _mm_clmulepi64_si128(a, keys, 0x00);
  let t2 = _mm_clmulepi64_si128(a, keys, 0x11);
  _mm_xor_si128(_mm_xor_si128(b, t1), t2)
}

// ─────────────────────────────────────────────────────────────────────────────
// Fold + reduce
// ─────────────────────────────────────────────────────────────────────────────

/// Fold `head ++ rest` into the reflected 32-bit `state`.
#[inline]
#[target_feature(enable = "pclmulqdq,ssse3,sse4.1")]
unsafe fn fold_blocks<const BITREV: bool>(state: u32, head: &[[u8; 16]; 4], rest: &[[u8; 16]], keys: &FoldKeys) -> u32 {
  let [b0, b1, b2, b3] = head;
  let mut x0 = _mm_xor_si128(lane::<BITREV>(b0), _mm_cvtsi32_si128(state as i32));
  let mut x1 = lane::<BITREV>(b1);
  let mut x2 = lane::<BITREV>(b2);
  let mut x3 = lane::<BITREV>(b3);

  let k1k2 = _mm_set_epi64x(keys.k2 as i64, keys.k1 as i64);
  let (groups, singles) = rest.as_chunks::<4>();
  for [c0, c1, c2, c3] in groups {
    x0 = reduce128(x0, lane::<BITREV>(c0), k1k2);
    x1 = reduce128(x1, lane::<BITREV>(c1), k1k2);
    x2 = reduce128(x2, lane::<BITREV>(c2), k1k2);
    x3 = reduce128(x3, lane::<BITREV>(c3), k1k2);
  }

  let k3k4 = _mm_set_epi64x(keys.k4 as i64, keys.k3 as i64);
  let mut x = reduce128(x0, x1, k3k4);
  x = reduce128(x, x2, k3k4);
  x = reduce128(x, x3, k3k4);
  for block in singles {
    x = reduce128(x, lane::<BITREV>(block), k3k4);
  }

  // 128 → 64 bits.
  let low32 = _mm_set_epi32(0, 0, 0, !0);
  x = _mm_xor_si128(_mm_clmulepi64_si128(x, k3k4, 0x10), _mm_srli_si128(x, 8));
  x = _mm_xor_si128(
    _mm_clmulepi64_si128(_mm_and_si128(x, low32), _mm_set_epi64x(0, keys.k5 as i64), 0x00),
    _mm_srli_si128(x, 4),
  );

  // Barrett reduction, reflected: the result sits in bits 32..64.
  let pu = _mm_set_epi64x(keys.mu as i64, keys.poly as i64);
  let t1 = _mm_clmulepi64_si128(_mm_and_si128(x, low32), pu, 0x10);
  let t2 = _mm_clmulepi64_si128(_mm_and_si128(t1, low32), pu, 0x00);
  _mm_extract_epi32(_mm_xor_si128(x, t2), 1) as u32
}

// ─────────────────────────────────────────────────────────────────────────────
// Entry points
// ─────────────────────────────────────────────────────────────────────────────

/// CRC-32 register update.
///
/// # Safety
///
/// Caller must ensure the CPU supports `pclmulqdq` and `sse4.1`.
#[target_feature(enable = "pclmulqdq,ssse3,sse4.1")]
pub(crate) unsafe fn crc32_pclmul(crc: u32, data: &[u8]) -> u32 {
  let (blocks, tail) = data.as_chunks::<16>();
  let Some((head, rest)) = blocks.split_first_chunk::<4>() else {
    return engine::update_sliced(&CRC32_TABLE, crc, data);
  };
  let crc = fold_blocks::<false>(crc, head, rest, &CRC32_KEYS);
  engine::update_sliced(&CRC32_TABLE, crc, tail)
}

/// CRC-24/RFC2440 register update (byte-swapped layout in and out).
///
/// # Safety
///
/// Caller must ensure the CPU supports `pclmulqdq` and `sse4.1`.
#[target_feature(enable = "pclmulqdq,ssse3,sse4.1")]
pub(crate) unsafe fn crc24_pclmul(crc: u32, data: &[u8]) -> u32 {
  let (blocks, tail) = data.as_chunks::<16>();
  let Some((head, rest)) = blocks.split_first_chunk::<4>() else {
    return engine::update_sliced(&CRC24_TABLE, crc, data);
  };
  let state = fold_blocks::<true>(crc24_lift(crc), head, rest, &CRC24_KEYS);
  engine::update_sliced(&CRC24_TABLE, crc24_lift(state) & 0x00FF_FFFF, tail)
}

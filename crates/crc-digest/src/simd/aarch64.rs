//! aarch64 PMULL kernels.
//!
//! Same fold/reduce sequence as the x86_64 kernels, expressed with NEON
//! lanes: `vmull_p64` for the carry-less products, `vextq_u8` against zero
//! for byte shifts and `vrbitq_u8` for the CRC-24 input bit reversal.
//!
//! # Safety
//!
//! Callers must ensure NEON and PMULL are available before executing these
//! kernels (the dispatcher does this).
#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]

use core::{
  arch::aarch64::*,
  ops::{BitXor, BitXorAssign},
};

use crate::{
  engine,
  fold::{CRC24_KEYS, CRC32_KEYS, FoldKeys, crc24_lift},
  tables::{CRC24_TABLE, CRC32_TABLE},
};

// ─────────────────────────────────────────────────────────────────────────────
// SIMD helpers
// ─────────────────────────────────────────────────────────────────────────────

#[repr(transparent)]
#[derive(Copy, Clone)]
struct Simd(uint8x16_t);

impl BitXor for Simd {
  type Output = Self;

  #[inline]
  fn bitxor(self, other: Self) -> Self {
    // SAFETY: `veorq_u8` is available with NEON, which is baseline on aarch64.
    unsafe { Self(veorq_u8(self.0, other.0)) }
  }
}

impl BitXorAssign for Simd {
  #[inline]
  fn bitxor_assign(&mut self, other: Self) {
    *self = *self ^ other;
  }
}

impl Simd {
  #[inline]
  #[target_feature(enable = "neon")]
  unsafe fn new(high: u64, low: u64) -> Self {
    Self(vcombine_u8(vcreate_u8(low), vcreate_u8(high)))
  }

  #[inline]
  #[target_feature(enable = "neon")]
  unsafe fn load(block: &[u8; 16]) -> Self {
    Self(vld1q_u8(block.as_ptr()))
  }

  #[inline]
  #[target_feature(enable = "neon")]
  unsafe fn lane<const BITREV: bool>(block: &[u8; 16]) -> Self {
    let x = Self::load(block);
    if BITREV { Self(vrbitq_u8(x.0)) } else { x }
  }

  #[inline]
  #[target_feature(enable = "neon")]
  unsafe fn and(self, mask: Self) -> Self {
    Self(vandq_u8(self.0, mask.0))
  }

  #[inline]
  #[target_feature(enable = "neon")]
  unsafe fn shift_right_8(self) -> Self {
    Self(vextq_u8(self.0, vdupq_n_u8(0), 8))
  }

  #[inline]
  #[target_feature(enable = "neon")]
  unsafe fn shift_right_4(self) -> Self {
    Self(vextq_u8(self.0, vdupq_n_u8(0), 4))
  }

  #[inline]
  #[target_feature(enable = "neon")]
  unsafe fn lane_u32_1(self) -> u32 {
    vgetq_lane_u32(vreinterpretq_u32_u8(self.0), 1)
  }

  /// `self.lo * other.lo`
  #[inline]
  #[target_feature(enable = "aes")]
  unsafe fn clmul00(self, other: Self) -> Self {
    let a = vgetq_lane_p64(vreinterpretq_p64_u8(self.0), 0);
    let b = vgetq_lane_p64(vreinterpretq_p64_u8(other.0), 0);
    Self(vreinterpretq_u8_p128(vmull_p64(a, b)))
  }

  /// `self.lo * other.hi`
  #[inline]
  #[target_feature(enable = "aes")]
  unsafe fn clmul10(self, other: Self) -> Self {
    let a = vgetq_lane_p64(vreinterpretq_p64_u8(self.0), 0);
    let b = vgetq_lane_p64(vreinterpretq_p64_u8(other.0), 1);
    Self(vreinterpretq_u8_p128(vmull_p64(a, b)))
  }

  /// `self.hi * other.hi`
  #[inline]
  #[target_feature(enable = "aes")]
  unsafe fn clmul11(self, other: Self) -> Self {
    let a = vgetq_lane_p64(vreinterpretq_p64_u8(self.0), 1);
    let b = vgetq_lane_p64(vreinterpretq_p64_u8(other.0), 1);
    Self(vreinterpretq_u8_p128(vmull_p64(a, b)))
  }

  /// `data ^ self.lo * keys.lo ^ self.hi * keys.hi`
  #[inline]
  #[target_feature(enable = "aes", enable = "neon")]
  unsafe fn reduce128(self, data: Self, keys: Self) -> Self {
    data ^ self.clmul00(keys) ^ self.clmul11(keys)
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Fold + reduce
// ─────────────────────────────────────────────────────────────────────────────

/// Fold `head ++ rest` into the reflected 32-bit `state`.
#[inline]
#[target_feature(enable = "aes", enable = "neon")]
unsafe fn fold_blocks<const BITREV: bool>(state: u32, head: &[[u8; 16]; 4], rest: &[[u8; 16]], keys: &FoldKeys) -> u32 {
  let [b0, b1, b2, b3] = head;
  let mut x0 = Simd::lane::<BITREV>(b0);
  let mut x1 = Simd::lane::<BITREV>(b1);
  let mut x2 = Simd::lane::<BITREV>(b2);
  let mut x3 = Simd::lane::<BITREV>(b3);
  x0 ^= Simd::new(0, state as u64);

  let k1k2 = Simd::new(keys.k2, keys.k1);
  let (groups, singles) = rest.as_chunks::<4>();
  for [c0, c1, c2, c3] in groups {
    x0 = x0.reduce128(Simd::lane::<BITREV>(c0), k1k2);
    x1 = x1.reduce128(Simd::lane::<BITREV>(c1), k1k2);
    x2 = x2.reduce128(Simd::lane::<BITREV>(c2), k1k2);
    x3 = x3.reduce128(Simd::lane::<BITREV>(c3), k1k2);
  }

  let k3k4 = Simd::new(keys.k4, keys.k3);
  let mut x = x0.reduce128(x1, k3k4);
  x = x.reduce128(x2, k3k4);
  x = x.reduce128(x3, k3k4);
  for block in singles {
    x = x.reduce128(Simd::lane::<BITREV>(block), k3k4);
  }

  // 128 → 64 bits.
  let low32 = Simd::new(0, 0xFFFF_FFFF);
  x = x.clmul10(k3k4) ^ x.shift_right_8();
  x = x.and(low32).clmul00(Simd::new(0, keys.k5)) ^ x.shift_right_4();

  // Barrett reduction, reflected: the result sits in bits 32..64.
  let pu = Simd::new(keys.mu, keys.poly);
  let t1 = x.and(low32).clmul10(pu);
  let t2 = t1.and(low32).clmul00(pu);
  (x ^ t2).lane_u32_1()
}

// ─────────────────────────────────────────────────────────────────────────────
// Entry points
// ─────────────────────────────────────────────────────────────────────────────

/// CRC-32 register update.
///
/// # Safety
///
/// Caller must ensure the CPU supports NEON and PMULL (`aes`).
#[target_feature(enable = "aes", enable = "neon")]
pub(crate) unsafe fn crc32_pmull(crc: u32, data: &[u8]) -> u32 {
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
/// Caller must ensure the CPU supports NEON and PMULL (`aes`).
#[target_feature(enable = "aes", enable = "neon")]
pub(crate) unsafe fn crc24_pmull(crc: u32, data: &[u8]) -> u32 {
  let (blocks, tail) = data.as_chunks::<16>();
  let Some((head, rest)) = blocks.split_first_chunk::<4>() else {
    return engine::update_sliced(&CRC24_TABLE, crc, data);
  };
  let state = fold_blocks::<true>(crc24_lift(crc), head, rest, &CRC24_KEYS);
  engine::update_sliced(&CRC24_TABLE, crc24_lift(state) & 0x00FF_FFFF, tail)
}

#[cfg(all(test, not(miri), feature = "std"))]
mod tests {
  extern crate std;

  use std::vec::Vec;

  use super::*;

  fn available() -> bool {
    std::arch::is_aarch64_feature_detected!("neon")
      && std::arch::is_aarch64_feature_detected!("aes")
      && std::arch::is_aarch64_feature_detected!("pmull")
  }

  fn sample(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i as u32).wrapping_mul(2_654_435_761).rotate_left(7) as u8).collect()
  }

  const LENGTHS: &[usize] = &[0, 1, 15, 16, 63, 64, 65, 79, 80, 127, 128, 129, 191, 192, 255, 256, 1000, 4096, 4111];

  #[test]
  fn crc32_matches_portable() {
    if !available() {
      return;
    }
    for &len in LENGTHS {
      let data = sample(len);
      for init in [0xFFFF_FFFF, 0, 0xDEAD_BEEF] {
        // SAFETY: features checked above.
        let got = unsafe { crc32_pmull(init, &data) };
        assert_eq!(got, engine::update_sliced(&CRC32_TABLE, init, &data), "len={len} init={init:#010X}");
      }
    }
  }

  #[test]
  fn crc24_matches_portable() {
    if !available() {
      return;
    }
    for &len in LENGTHS {
      let data = sample(len);
      for init in [0x00CE_04B7, 0, 0x00AB_CDEF] {
        // SAFETY: features checked above.
        let got = unsafe { crc24_pmull(init, &data) };
        assert_eq!(got, engine::update_sliced(&CRC24_TABLE, init, &data), "len={len} init={init:#010X}");
      }
    }
  }
}

//! Carry-less multiply folding constants.
//!
//! The accelerated kernels fold 128-bit lanes of a *reflected* 32-bit CRC.
//! Every constant is derived at compile time from the full 33-bit generator
//! polynomial `P(x)` (explicit `x^32` term):
//!
//! | Key | Value | Use |
//! |-----|-------|-----|
//! | `k1`, `k2` | `x^(512+32)`, `x^(512-32)` mod P | fold 4 lanes across 64 bytes |
//! | `k3`, `k4` | `x^(128+32)`, `x^(128-32)` mod P | fold 1 lane across 16 bytes |
//! | `k5` | `x^64` mod P | 96 → 64 bit reduction |
//! | `poly`, `mu` | `P`, `⌊x^64 / P⌋` | Barrett reduction to 32 bits |
//!
//! Fold keys are stored bit-reflected and shifted left by one, which is the
//! layout the reflected `PCLMULQDQ`/`PMULL` sequence consumes.
//!
//! CRC-24/RFC2440 is not reflected and only 24 bits wide. It is folded as the
//! reflected 32-bit CRC with generator `x^8 · P24(x)` over bit-reversed input
//! bytes; the kernels convert the register on the way in and out.
#![cfg_attr(not(any(target_arch = "x86_64", target_arch = "aarch64")), allow(dead_code))]

use crate::tables::{CRC24_POLY, CRC32_POLY};

/// Folding and reduction constants for one generator polynomial.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct FoldKeys {
  pub k1: u64,
  pub k2: u64,
  pub k3: u64,
  pub k4: u64,
  pub k5: u64,
  pub poly: u64,
  pub mu: u64,
}

impl FoldKeys {
  /// Derive every constant from the 33-bit generator `poly_full`.
  pub const fn new(poly_full: u64) -> Self {
    Self {
      k1: fold_key(512 + 32, poly_full),
      k2: fold_key(512 - 32, poly_full),
      k3: fold_key(128 + 32, poly_full),
      k4: fold_key(128 - 32, poly_full),
      k5: fold_key(64, poly_full),
      poly: reflect_bits(poly_full, 33),
      mu: reflect_bits(gf2_div_128(1u128 << 64, poly_full as u128) as u64, 33),
    }
  }
}

/// CRC-32 (and CRC-32/RFC1510).
pub(crate) const CRC32_KEYS: FoldKeys = FoldKeys::new((1u64 << 32) | CRC32_POLY as u64);

/// CRC-24/RFC2440, lifted to 32 bits as `x^8 · P24(x)`.
pub(crate) const CRC24_KEYS: FoldKeys = FoldKeys::new(((1u64 << 24) | CRC24_POLY as u64) << 8);

// ─────────────────────────────────────────────────────────────────────────────
// CRC-24 register lifting
// ─────────────────────────────────────────────────────────────────────────────

/// Map a CRC-24 register (byte-swapped layout) to the reflected 32-bit state
/// the folding kernels run on, and back.
///
/// The byte-swapped layout is `bswap(R << 8)`; the reflected state is
/// `reverse_bits(R << 8)`. The two differ by reversing bits within each
/// byte, so the map is its own inverse.
#[inline(always)]
pub(crate) const fn crc24_lift(state: u32) -> u32 {
  let b = state.to_le_bytes();
  u32::from_le_bytes([b[0].reverse_bits(), b[1].reverse_bits(), b[2].reverse_bits(), b[3].reverse_bits()])
}

// ─────────────────────────────────────────────────────────────────────────────
// GF(2) arithmetic (const)
// ─────────────────────────────────────────────────────────────────────────────

/// `reflect32(x^n mod P) << 1`.
const fn fold_key(n: u32, poly_full: u64) -> u64 {
  reflect_bits(xpow_mod_32(n, poly_full), 32) << 1
}

/// Reflect (bit-reverse) the lower `width` bits of `value`.
const fn reflect_bits(value: u64, width: u32) -> u64 {
  let mut result = 0u64;
  let mut i = 0u32;
  while i < width {
    if (value >> i) & 1 != 0 {
      result |= 1 << (width - 1 - i);
    }
    i += 1;
  }
  result
}

/// Degree of a nonzero polynomial.
const fn deg_u128(x: u128) -> u32 {
  if x == 0 {
    return 0;
  }
  127 - x.leading_zeros()
}

/// Polynomial quotient `dividend / divisor` over GF(2).
const fn gf2_div_128(dividend: u128, divisor: u128) -> u128 {
  let mut dd = dividend;
  let mut q = 0u128;
  while dd != 0 && deg_u128(dd) >= deg_u128(divisor) {
    let shift = deg_u128(dd) - deg_u128(divisor);
    q ^= 1u128 << shift;
    dd ^= divisor << shift;
  }
  q
}

/// `a · b mod poly_full` for polynomials of degree below 32.
const fn gf2_mul_mod_32(a: u64, b: u64, poly_full: u64) -> u64 {
  let mut product = 0u64;
  let mut i = 0;
  while i < 32 {
    if (b >> i) & 1 != 0 {
      product ^= a << i;
    }
    i += 1;
  }

  let mut bit = 63u32;
  while bit >= 32 {
    if (product >> bit) & 1 != 0 {
      product ^= poly_full << (bit - 32);
    }
    bit -= 1;
  }
  product & 0xFFFF_FFFF
}

/// `x^n mod poly_full` by square-and-multiply.
const fn xpow_mod_32(n: u32, poly_full: u64) -> u64 {
  if n < 32 {
    return 1u64 << n;
  }

  let mut result = 1u64;
  let mut base = 2u64;
  let mut exp = n;
  while exp > 0 {
    if exp & 1 != 0 {
      result = gf2_mul_mod_32(result, base, poly_full);
    }
    base = gf2_mul_mod_32(base, base, poly_full);
    exp >>= 1;
  }
  result
}

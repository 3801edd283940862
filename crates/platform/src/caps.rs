//! CPU capability representation.
//!
//! [`Caps`] is a small bitset of the ISA extensions that CRC backends care
//! about. Each bit is architecture-specific; the API is uniform across
//! targets.
//!
//! # Bit Layout
//!
//! - Bits 0-15: x86_64 features
//! - Bits 16-31: aarch64 features

// ─────────────────────────────────────────────────────────────────────────────
// Core Capability Type
// ─────────────────────────────────────────────────────────────────────────────

/// CPU capabilities: a feature bitset.
///
/// Use [`has()`](Caps::has) to check that *every* required feature is
/// present. `Caps` is `Copy`, `Send`, and `Sync`.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Caps(pub(crate) u32);

impl Caps {
  /// Empty capability set (no features).
  pub const NONE: Self = Self(0);

  /// Create a capability set from raw bits.
  ///
  /// Only available with the `testing` feature or in test builds.
  #[cfg(any(test, feature = "testing"))]
  #[inline]
  #[must_use]
  pub const fn from_raw(bits: u32) -> Self {
    Self(bits)
  }

  /// Access the raw underlying bits.
  #[cfg(any(test, feature = "testing"))]
  #[inline]
  #[must_use]
  pub const fn as_raw(self) -> u32 {
    self.0
  }

  /// Check if all features in `required` are present.
  #[inline(always)]
  #[must_use]
  pub const fn has(self, required: Self) -> bool {
    (self.0 & required.0) == required.0
  }

  /// Union of two capability sets.
  #[inline]
  #[must_use]
  pub const fn union(self, other: Self) -> Self {
    Self(self.0 | other.0)
  }

  /// Intersection of two capability sets.
  #[inline]
  #[must_use]
  pub const fn intersection(self, other: Self) -> Self {
    Self(self.0 & other.0)
  }

  /// Capabilities in `self` that are not in `other`.
  #[inline]
  #[must_use]
  pub const fn difference(self, other: Self) -> Self {
    Self(self.0 & !other.0)
  }

  #[inline]
  #[must_use]
  pub const fn is_empty(self) -> bool {
    self.0 == 0
  }

  /// Count the number of features present.
  #[inline]
  #[must_use]
  pub const fn count(self) -> u32 {
    self.0.count_ones()
  }

  /// Create a capability set with a single bit set.
  ///
  /// Bits past 31 yield the empty set.
  #[inline]
  #[must_use]
  pub const fn bit(bit: u8) -> Self {
    match 1u32.checked_shl(bit as u32) {
      Some(b) => Self(b),
      None => Self::NONE,
    }
  }

  /// Check if a specific bit is set.
  #[inline]
  #[must_use]
  pub const fn has_bit(self, bit: u8) -> bool {
    let b = Self::bit(bit);
    !b.is_empty() && self.has(b)
  }

  /// Returns an iterator over the names of all set feature bits.
  pub fn feature_names(self) -> impl Iterator<Item = &'static str> {
    X86_FEATURES
      .iter()
      .chain(AARCH64_FEATURES.iter())
      .filter_map(move |(bit, name)| if self.has_bit(*bit) { Some(*name) } else { None })
  }
}

impl core::ops::BitOr for Caps {
  type Output = Self;

  #[inline]
  fn bitor(self, rhs: Self) -> Self::Output {
    self.union(rhs)
  }
}

impl core::ops::BitAnd for Caps {
  type Output = Self;

  #[inline]
  fn bitand(self, rhs: Self) -> Self::Output {
    self.intersection(rhs)
  }
}

impl core::ops::BitOrAssign for Caps {
  #[inline]
  fn bitor_assign(&mut self, rhs: Self) {
    *self = self.union(rhs);
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Architecture Identification
// ─────────────────────────────────────────────────────────────────────────────

/// Target architecture, as far as backend selection is concerned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Arch {
  X86_64,
  Aarch64,
  #[default]
  Other,
}

impl Arch {
  /// Get the architecture for the current compilation target.
  #[inline]
  #[must_use]
  pub const fn current() -> Self {
    if cfg!(target_arch = "x86_64") {
      Self::X86_64
    } else if cfg!(target_arch = "aarch64") {
      Self::Aarch64
    } else {
      Self::Other
    }
  }

  #[inline]
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::X86_64 => "x86_64",
      Self::Aarch64 => "aarch64",
      Self::Other => "other",
    }
  }
}

impl core::fmt::Display for Arch {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_str(self.name())
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// x86_64 Features (bits 0-15)
// ─────────────────────────────────────────────────────────────────────────────

/// x86_64 CPU features relevant to CRC folding.
pub mod x86 {
  use super::Caps;

  pub const SSE2: Caps = Caps::bit(0);
  pub const SSSE3: Caps = Caps::bit(1);
  pub const SSE41: Caps = Caps::bit(2);
  pub const PCLMULQDQ: Caps = Caps::bit(3);

  /// Requirements of the 128-bit PCLMULQDQ folding kernels.
  pub const PCLMUL_READY: Caps = SSE41.union(PCLMULQDQ);
}

// ─────────────────────────────────────────────────────────────────────────────
// aarch64 Features (bits 16-31)
// ─────────────────────────────────────────────────────────────────────────────

/// aarch64 CPU features relevant to CRC folding.
pub mod aarch64 {
  use super::Caps;

  pub const NEON: Caps = Caps::bit(16);
  pub const AES: Caps = Caps::bit(17);
  /// 64-bit polynomial multiply (`PMULL`/`PMULL2`).
  ///
  /// Only reported together with `AES`: Rust gates `vmull_p64` behind the
  /// `aes` target feature.
  pub const PMULL: Caps = Caps::bit(18);

  /// Requirements of the 128-bit PMULL folding kernels.
  pub const PMULL_READY: Caps = NEON.union(PMULL);
}

// ─────────────────────────────────────────────────────────────────────────────
// Feature names
// ─────────────────────────────────────────────────────────────────────────────

const X86_FEATURES: &[(u8, &str)] = &[(0, "sse2"), (1, "ssse3"), (2, "sse4.1"), (3, "pclmulqdq")];

const AARCH64_FEATURES: &[(u8, &str)] = &[(16, "neon"), (17, "aes"), (18, "pmull")];

impl core::fmt::Debug for Caps {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    write!(f, "Caps({}", Arch::current())?;

    let mut iter = self.feature_names().peekable();
    if iter.peek().is_none() {
      return f.write_str(", none)");
    }
    f.write_str(", [")?;
    let mut first = true;
    for name in iter {
      if !first {
        f.write_str(", ")?;
      }
      first = false;
      f.write_str(name)?;
    }
    f.write_str("])")
  }
}

impl core::fmt::Display for Caps {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    core::fmt::Debug::fmt(self, f)
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::{format, vec::Vec};

  use super::*;

  #[test]
  fn test_caps_basic() {
    let empty = Caps::NONE;
    assert!(empty.is_empty());
    assert_eq!(empty.count(), 0);
    assert!(empty.has(Caps::NONE));
  }

  #[test]
  fn test_has_requires_every_bit() {
    assert!(!x86::PCLMULQDQ.has(x86::PCLMUL_READY));
    assert!(!x86::SSE41.has(x86::PCLMUL_READY));
    assert!((x86::SSE41 | x86::PCLMULQDQ).has(x86::PCLMUL_READY));

    assert!(!aarch64::NEON.has(aarch64::PMULL_READY));
    assert!(!aarch64::PMULL.has(aarch64::PMULL_READY));
    assert!((aarch64::NEON | aarch64::PMULL | aarch64::AES).has(aarch64::PMULL_READY));
  }

  #[test]
  fn test_set_ops() {
    let a = x86::SSE2 | x86::SSE41;
    let b = x86::SSE41 | x86::PCLMULQDQ;
    assert_eq!(a & b, x86::SSE41);
    assert_eq!(a.union(b).count(), 3);
    assert_eq!(a.difference(b), x86::SSE2);

    let mut c = Caps::NONE;
    c |= aarch64::NEON;
    assert!(c.has_bit(16));
    assert!(!c.has_bit(17));
  }

  #[test]
  fn test_bit_out_of_range_is_empty() {
    assert!(Caps::bit(32).is_empty());
    assert!(Caps::bit(255).is_empty());
    assert!(!Caps::from_raw(u32::MAX).has_bit(40));
  }

  #[test]
  fn test_raw_round_trip() {
    let caps = x86::PCLMUL_READY;
    assert_eq!(Caps::from_raw(caps.as_raw()), caps);
  }

  #[test]
  fn test_feature_names() {
    let names: Vec<_> = (x86::SSE41 | aarch64::PMULL).feature_names().collect();
    assert_eq!(names, ["sse4.1", "pmull"]);
  }

  #[test]
  fn test_debug_format() {
    let s = format!("{:?}", Caps::NONE);
    assert!(s.ends_with(", none)"), "{s}");

    let s = format!("{}", x86::PCLMUL_READY);
    assert!(s.contains("[sse4.1, pclmulqdq]"), "{s}");
  }

  #[test]
  fn test_arch_name() {
    let arch = Arch::current();
    #[cfg(target_arch = "x86_64")]
    assert_eq!(arch, Arch::X86_64);
    #[cfg(target_arch = "aarch64")]
    assert_eq!(arch, Arch::Aarch64);
    assert_eq!(format!("{arch}"), arch.name());
  }
}

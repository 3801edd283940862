//! Backend selection.
//!
//! A context picks its backend once, at construction, from a capability
//! snapshot; every later write branches on the stored tag. Selection walks a
//! static candidate table in order and takes the first entry whose required
//! capabilities are all present, falling back to the portable engine.

use backend::dispatch::{Candidate, select_or};
use platform::Caps;

use crate::{
  config::{self, Force},
  engine,
  variant::Family,
};

/// The implementation a context writes through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Backend {
  /// Table-driven slicing-by-4 engine. Always available.
  Portable,
  /// SSE4.1 + PCLMULQDQ folding.
  #[cfg(target_arch = "x86_64")]
  Pclmul,
  /// NEON + PMULL folding.
  #[cfg(target_arch = "aarch64")]
  Pmull,
}

const PORTABLE_NAME: &str = "portable/slice4";

#[cfg(target_arch = "x86_64")]
const CANDIDATES: &[Candidate<Backend>] = backend::candidates![
  "x86_64/pclmul" => platform::caps::x86::PCLMUL_READY => Backend::Pclmul,
];

#[cfg(target_arch = "aarch64")]
const CANDIDATES: &[Candidate<Backend>] = backend::candidates![
  "aarch64/pmull" => platform::caps::aarch64::PMULL_READY => Backend::Pmull,
];

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
const CANDIDATES: &[Candidate<Backend>] = backend::candidates![];

impl Backend {
  /// Every backend compiled for this target, preferred first.
  pub const ALL: &'static [Self] = &[
    #[cfg(target_arch = "x86_64")]
    Self::Pclmul,
    #[cfg(target_arch = "aarch64")]
    Self::Pmull,
    Self::Portable,
  ];

  /// Stable backend name, e.g. `"x86_64/pclmul"` or `"portable/slice4"`.
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::Portable => PORTABLE_NAME,
      #[cfg(target_arch = "x86_64")]
      Self::Pclmul => "x86_64/pclmul",
      #[cfg(target_arch = "aarch64")]
      Self::Pmull => "aarch64/pmull",
    }
  }

  /// Capabilities this backend needs.
  #[must_use]
  pub const fn requires(self) -> Caps {
    match self {
      Self::Portable => Caps::NONE,
      #[cfg(target_arch = "x86_64")]
      Self::Pclmul => platform::caps::x86::PCLMUL_READY,
      #[cfg(target_arch = "aarch64")]
      Self::Pmull => platform::caps::aarch64::PMULL_READY,
    }
  }

  #[inline]
  #[must_use]
  pub const fn is_accelerated(self) -> bool {
    !matches!(self, Self::Portable)
  }

  /// Backend chosen for `caps` under the current force mode.
  ///
  /// `caps` must not claim features the CPU lacks; contexts only ever pass
  /// subsets of [`platform::caps`].
  #[must_use]
  pub(crate) fn select(caps: Caps) -> Self {
    match config::for_caps(caps).effective_force {
      Force::Portable => Self::Portable,
      Force::Auto | Force::Hardware => select_or(caps, CANDIDATES, PORTABLE_NAME, Self::Portable).func,
    }
  }

  /// Advance `crc` (register form) over `data`.
  #[inline]
  pub(crate) fn update(self, family: Family, crc: u32, data: &[u8]) -> u32 {
    match self {
      Self::Portable => engine::update_sliced(family.table(), crc, data),
      // SAFETY: `Pclmul` is only selected when the capability snapshot (a
      // subset of the detected CPU features) contains SSE4.1 and PCLMULQDQ.
      #[cfg(target_arch = "x86_64")]
      Self::Pclmul => unsafe {
        match family {
          Family::Crc32 => crate::simd::x86_64::crc32_pclmul(crc, data),
          Family::Crc24 => crate::simd::x86_64::crc24_pclmul(crc, data),
        }
      },
      // SAFETY: `Pmull` is only selected when the capability snapshot (a
      // subset of the detected CPU features) contains NEON and PMULL.
      #[cfg(target_arch = "aarch64")]
      Self::Pmull => unsafe {
        match family {
          Family::Crc32 => crate::simd::aarch64::crc32_pmull(crc, data),
          Family::Crc24 => crate::simd::aarch64::crc24_pmull(crc, data),
        }
      },
    }
  }
}

impl core::fmt::Display for Backend {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_str(self.name())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn no_caps_selects_portable() {
    assert_eq!(Backend::select(Caps::NONE), Backend::Portable);
  }

  #[test]
  fn portable_is_last_and_requires_nothing() {
    assert_eq!(Backend::ALL.last(), Some(&Backend::Portable));
    assert!(Backend::Portable.requires().is_empty());
    assert!(!Backend::Portable.is_accelerated());
  }

  #[test]
  fn candidate_names_match_backend_names() {
    for c in CANDIDATES {
      assert_eq!(c.name, c.func.name());
      assert_eq!(c.requires, c.func.requires());
      assert!(c.func.is_accelerated());
    }
  }

  #[cfg(target_arch = "x86_64")]
  #[test]
  fn pclmul_needs_every_required_bit() {
    use platform::caps::x86;
    assert_eq!(Backend::select(x86::PCLMULQDQ), Backend::Portable);
    assert_eq!(Backend::select(x86::SSE41), Backend::Portable);
  }

  #[cfg(target_arch = "aarch64")]
  #[test]
  fn pmull_needs_every_required_bit() {
    use platform::caps::aarch64;
    assert_eq!(Backend::select(aarch64::PMULL), Backend::Portable);
    assert_eq!(Backend::select(aarch64::NEON), Backend::Portable);
  }

  #[test]
  fn portable_update_matches_engine() {
    let data = b"123456789";
    assert_eq!(
      Backend::Portable.update(Family::Crc32, !0, data),
      engine::update_sliced(Family::Crc32.table(), !0, data)
    );
  }
}

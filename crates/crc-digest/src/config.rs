//! Runtime configuration (forced backend selection).
//!
//! The force mode comes from, in order of precedence:
//! 1. [`set_force`] (programmatic, process-wide)
//! 2. `CRC_DIGEST_FORCE` (read once, `std` only)
//! 3. [`Force::Auto`]
//!
//! Forced modes are always clamped to detected CPU capabilities.

use core::sync::atomic::{AtomicU8, Ordering};

use platform::Caps;

/// Environment variable holding the force mode.
pub const FORCE_ENV: &str = "CRC_DIGEST_FORCE";

/// Forced backend selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Force {
  /// Use the best backend the CPU supports.
  #[default]
  Auto,
  /// Force the portable slicing-by-4 implementation.
  Portable,
  /// Force the carry-less multiply backend (if available).
  ///
  /// - x86_64: SSE4.1 + PCLMULQDQ
  /// - aarch64: NEON + PMULL
  Hardware,
}

impl Force {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Auto => "auto",
      Self::Portable => "portable",
      Self::Hardware => "hardware",
    }
  }

  /// Parse a force mode, ignoring ASCII case and surrounding whitespace.
  ///
  /// Returns `None` for empty or unrecognized values.
  #[must_use]
  pub fn parse(value: &str) -> Option<Self> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("auto") {
      return Some(Self::Auto);
    }
    if value.eq_ignore_ascii_case("portable") || value.eq_ignore_ascii_case("scalar") || value.eq_ignore_ascii_case("table")
    {
      return Some(Self::Portable);
    }
    if value.eq_ignore_ascii_case("hardware")
      || value.eq_ignore_ascii_case("clmul")
      || value.eq_ignore_ascii_case("pclmul")
      || value.eq_ignore_ascii_case("pmull")
    {
      return Some(Self::Hardware);
    }
    None
  }

  const fn to_bits(self) -> u8 {
    match self {
      Self::Auto => 1,
      Self::Portable => 2,
      Self::Hardware => 3,
    }
  }

  const fn from_bits(bits: u8) -> Option<Self> {
    match bits {
      1 => Some(Self::Auto),
      2 => Some(Self::Portable),
      3 => Some(Self::Hardware),
      _ => None,
    }
  }
}

impl core::fmt::Display for Force {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Effective configuration (after applying overrides).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CrcConfig {
  /// Requested force mode (env/programmatic).
  pub requested_force: Force,
  /// Force mode clamped to the capabilities it was resolved against.
  pub effective_force: Force,
}

// 0 = no programmatic override.
static FORCE_OVERRIDE: AtomicU8 = AtomicU8::new(0);

/// Set (or with `None`, clear) the process-wide force mode.
///
/// Takes precedence over `CRC_DIGEST_FORCE`. Affects contexts created after
/// the call; existing contexts keep their backend.
pub fn set_force(force: Option<Force>) {
  FORCE_OVERRIDE.store(force.map_or(0, Force::to_bits), Ordering::Release);
}

#[cfg(feature = "std")]
fn env_force() -> Force {
  use std::sync::OnceLock;
  static ENV_FORCE: OnceLock<Force> = OnceLock::new();
  *ENV_FORCE.get_or_init(|| {
    std::env::var(FORCE_ENV)
      .ok()
      .and_then(|v| Force::parse(&v))
      .unwrap_or_default()
  })
}

#[cfg(not(feature = "std"))]
fn env_force() -> Force {
  Force::Auto
}

#[inline]
fn requested_force() -> Force {
  Force::from_bits(FORCE_OVERRIDE.load(Ordering::Acquire)).unwrap_or_else(env_force)
}

#[inline]
#[must_use]
#[allow(unused_variables)] // `caps` only used on x86_64/aarch64
fn clamp_force_to_caps(requested: Force, caps: Caps) -> Force {
  match requested {
    Force::Auto | Force::Portable => requested,
    Force::Hardware => {
      #[cfg(target_arch = "x86_64")]
      {
        if caps.has(platform::caps::x86::PCLMUL_READY) {
          return Force::Hardware;
        }
      }
      #[cfg(target_arch = "aarch64")]
      {
        if caps.has(platform::caps::aarch64::PMULL_READY) {
          return Force::Hardware;
        }
      }
      Force::Auto
    }
  }
}

/// Configuration resolved against an explicit capability set.
#[inline]
#[must_use]
pub fn for_caps(caps: Caps) -> CrcConfig {
  let requested_force = requested_force();
  CrcConfig {
    requested_force,
    effective_force: clamp_force_to_caps(requested_force, caps),
  }
}

/// Configuration resolved against the detected capabilities.
#[inline]
#[must_use]
pub fn get() -> CrcConfig {
  for_caps(platform::caps())
}

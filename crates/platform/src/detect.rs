//! Runtime CPU detection.
//!
//! Handles:
//!
//! - Compile-time detection (via `cfg!(target_feature = "...")`)
//! - Runtime detection (`is_x86_feature_detected!` / `is_aarch64_feature_detected!`, std only)
//! - Caching (via `OnceLock` with `std`, atomics without)
//! - User-supplied overrides for bare metal and testing
//! - Miri fallback (always returns no capabilities)

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::caps::Caps;

// ─────────────────────────────────────────────────────────────────────────────
// Override Support
// ─────────────────────────────────────────────────────────────────────────────
//
// The override takes precedence over detection. It is kept in atomics on
// every target so it can be set, replaced, and cleared any number of times.

static OVERRIDE_SET: AtomicBool = AtomicBool::new(false);
static OVERRIDE_BITS: AtomicU32 = AtomicU32::new(0);

pub fn set_caps_override(value: Option<Caps>) {
  match value {
    Some(caps) => {
      OVERRIDE_BITS.store(caps.0, Ordering::Release);
      OVERRIDE_SET.store(true, Ordering::Release);
    }
    None => OVERRIDE_SET.store(false, Ordering::Release),
  }
}

#[inline]
pub fn has_override() -> bool {
  OVERRIDE_SET.load(Ordering::Acquire)
}

#[inline]
fn get_override() -> Option<Caps> {
  if !OVERRIDE_SET.load(Ordering::Acquire) {
    return None;
  }
  Some(Caps(OVERRIDE_BITS.load(Ordering::Acquire)))
}

// ─────────────────────────────────────────────────────────────────────────────
// Cache (no_std)
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(not(feature = "std"))]
mod cache {
  use core::sync::atomic::{AtomicU8, AtomicU32, Ordering};

  use crate::caps::Caps;

  /// 0 = uninitialized, 1 = initializing, 2 = initialized
  static STATE: AtomicU8 = AtomicU8::new(0);
  static CACHED_BITS: AtomicU32 = AtomicU32::new(0);

  #[inline]
  pub fn get_or_init(f: fn() -> Caps) -> Caps {
    if STATE.load(Ordering::Acquire) == 2 {
      return Caps(CACHED_BITS.load(Ordering::Acquire));
    }

    match STATE.compare_exchange(0, 1, Ordering::AcqRel, Ordering::Acquire) {
      Ok(_) => {
        let caps = f();
        CACHED_BITS.store(caps.0, Ordering::Release);
        STATE.store(2, Ordering::Release);
        caps
      }
      Err(_) => {
        while STATE.load(Ordering::Acquire) == 1 {
          core::hint::spin_loop();
        }
        Caps(CACHED_BITS.load(Ordering::Acquire))
      }
    }
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Main API
// ─────────────────────────────────────────────────────────────────────────────

#[inline]
#[must_use]
pub fn caps() -> Caps {
  // Miri cannot interpret SIMD intrinsics.
  if cfg!(miri) {
    return Caps::NONE;
  }

  if let Some(caps) = get_override() {
    return caps;
  }

  #[cfg(feature = "std")]
  {
    use std::sync::OnceLock;
    static CACHED: OnceLock<Caps> = OnceLock::new();
    *CACHED.get_or_init(detect_uncached)
  }

  #[cfg(not(feature = "std"))]
  {
    cache::get_or_init(detect_uncached)
  }
}

/// Detect capabilities without caching or overrides.
#[inline]
#[must_use]
pub fn detect_uncached() -> Caps {
  let caps = compile_time();

  #[cfg(feature = "std")]
  let caps = caps.union(runtime());

  normalize(caps)
}

/// Drop bits whose prerequisites are missing.
#[inline]
const fn normalize(caps: Caps) -> Caps {
  use crate::caps::aarch64;

  // PMULL is only usable through the `aes` target feature.
  if caps.has(aarch64::PMULL) && !caps.has(aarch64::AES) {
    return caps.difference(aarch64::PMULL);
  }
  caps
}

// ─────────────────────────────────────────────────────────────────────────────
// Compile-time detection
// ─────────────────────────────────────────────────────────────────────────────

#[allow(unused_mut)]
const fn compile_time() -> Caps {
  let mut caps = Caps::NONE;

  #[cfg(target_arch = "x86_64")]
  {
    use crate::caps::x86;

    caps = caps.union(x86::SSE2);
    if cfg!(target_feature = "ssse3") {
      caps = caps.union(x86::SSSE3);
    }
    if cfg!(target_feature = "sse4.1") {
      caps = caps.union(x86::SSE41);
    }
    if cfg!(target_feature = "pclmulqdq") {
      caps = caps.union(x86::PCLMULQDQ);
    }
  }

  #[cfg(target_arch = "aarch64")]
  {
    use crate::caps::aarch64;

    if cfg!(target_feature = "neon") {
      caps = caps.union(aarch64::NEON);
    }
    if cfg!(target_feature = "aes") {
      caps = caps.union(aarch64::AES).union(aarch64::PMULL);
    }
  }

  caps
}

// ─────────────────────────────────────────────────────────────────────────────
// Runtime detection (std)
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(feature = "std")]
#[allow(unused_mut)]
fn runtime() -> Caps {
  let mut caps = Caps::NONE;

  #[cfg(target_arch = "x86_64")]
  {
    use crate::caps::x86;

    if std::arch::is_x86_feature_detected!("ssse3") {
      caps |= x86::SSSE3;
    }
    if std::arch::is_x86_feature_detected!("sse4.1") {
      caps |= x86::SSE41;
    }
    if std::arch::is_x86_feature_detected!("pclmulqdq") {
      caps |= x86::PCLMULQDQ;
    }
  }

  #[cfg(target_arch = "aarch64")]
  {
    use crate::caps::aarch64;

    if std::arch::is_aarch64_feature_detected!("neon") {
      caps |= aarch64::NEON;
    }
    if std::arch::is_aarch64_feature_detected!("aes") {
      caps |= aarch64::AES;
    }
    if std::arch::is_aarch64_feature_detected!("pmull") {
      caps |= aarch64::PMULL;
    }
  }

  caps
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

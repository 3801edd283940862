//! CPU capability detection for CRC backend selection.
//!
//! This crate answers one question for the rest of the workspace: which
//! carry-less multiply instruction sets can run on this machine? The answer
//! is a [`Caps`] bitset, detected once per process and immutable afterwards.
//!
//! # Main Entry Point
//!
//! ```ignore
//! use platform::caps::x86;
//!
//! if platform::caps().has(x86::PCLMUL_READY) {
//!     // SSE4.1 and PCLMULQDQ are both available
//! }
//! ```
//!
//! # Design
//!
//! 1. **Compile-time first**: features enabled with `-C target-feature` are folded in via `cfg!`.
//! 2. **Cached otherwise**: runtime detection is cached in `OnceLock` (std) or atomics (no_std).
//! 3. **Overridable**: bare-metal deployments and tests can pin the capability set.
//! 4. **Miri-safe**: under Miri, always reports no capabilities.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

// ─────────────────────────────────────────────────────────────────────────────
// Core modules
// ─────────────────────────────────────────────────────────────────────────────

pub mod caps;
mod detect;

// ─────────────────────────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────────────────────────

pub use caps::{Arch, Caps};
pub use detect::detect_uncached;

/// Get the process-wide CPU capabilities.
///
/// # Caching
///
/// - With `std`: detection runs once and is cached in a `OnceLock`.
/// - Without `std`: detection runs once and is cached in atomics.
///
/// # Override
///
/// If an override has been installed with [`init_with_caps`] or
/// [`set_caps_override`], that value is returned instead.
#[inline]
#[must_use]
pub fn caps() -> Caps {
  detect::caps()
}

/// Initialize with user-supplied capabilities.
///
/// Call this before the first [`caps()`] to bypass runtime detection, for
/// example on bare metal where the CPU is known at deployment.
///
/// ```ignore
/// use platform::{Caps, caps::aarch64};
///
/// platform::init_with_caps(aarch64::PMULL_READY);
/// ```
#[inline]
pub fn init_with_caps(caps: Caps) {
  detect::set_caps_override(Some(caps));
}

/// Set or clear the capabilities override.
///
/// When set, [`caps()`] returns the override instead of detecting. Pass
/// `None` to resume reporting detected capabilities.
///
/// ```ignore
/// platform::set_caps_override(Some(Caps::NONE));
/// // ... exercise the portable fallback ...
/// platform::set_caps_override(None);
/// ```
#[inline]
pub fn set_caps_override(value: Option<Caps>) {
  detect::set_caps_override(value);
}

/// Check if an override is currently set.
#[inline]
#[must_use]
pub fn has_override() -> bool {
  detect::has_override()
}

//! Candidate selection.
//!
//! - [`Candidate`]: an implementation with capability requirements
//! - [`Selected`]: the result of selection
//! - [`select`] / [`select_or`]: choose the first satisfiable candidate
//! - [`candidates!`](crate::candidates): list literal shorthand

use platform::Caps;

// ─────────────────────────────────────────────────────────────────────────────
// Core Types
// ─────────────────────────────────────────────────────────────────────────────

/// An implementation with capability requirements.
///
/// Candidates are ordered from best to worst.
#[derive(Clone, Copy, Debug)]
pub struct Candidate<F> {
  /// Human-readable name for diagnostics (e.g., "x86_64/pclmul").
  pub name: &'static str,
  /// Required CPU capabilities. Must be a subset of detected caps.
  pub requires: Caps,
  /// The implementation: a function pointer or a tag.
  pub func: F,
}

impl<F> Candidate<F> {
  #[inline]
  #[must_use]
  pub const fn new(name: &'static str, requires: Caps, func: F) -> Self {
    Self { name, requires, func }
  }
}

/// The result of selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selected<F> {
  /// Human-readable name of the selected implementation.
  pub name: &'static str,
  pub func: F,
}

impl<F> Selected<F> {
  #[inline]
  #[must_use]
  pub const fn new(name: &'static str, func: F) -> Self {
    Self { name, func }
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Selection
// ─────────────────────────────────────────────────────────────────────────────

/// Return the first candidate whose `requires` is satisfied by `caps`.
///
/// Returns `None` if no candidate matches.
#[inline]
#[must_use]
pub fn select<F: Copy>(caps: Caps, candidates: &[Candidate<F>]) -> Option<Selected<F>> {
  candidates
    .iter()
    .find(|c| caps.has(c.requires))
    .map(|c| Selected::new(c.name, c.func))
}

/// Like [`select`], falling back to `(name, func)` when nothing matches.
///
/// The fallback requires no capabilities, so selection is total.
#[inline]
#[must_use]
pub fn select_or<F: Copy>(caps: Caps, candidates: &[Candidate<F>], name: &'static str, func: F) -> Selected<F> {
  select(caps, candidates).unwrap_or(Selected::new(name, func))
}

/// Build a `&[Candidate<_>]` from `name => requires => func` rows.
///
/// An empty invocation yields an empty slice, which is useful on targets
/// without accelerated implementations.
#[macro_export]
macro_rules! candidates {
  () => {
    &[]
  };
  ($($name:expr => $requires:expr => $func:expr),+ $(,)?) => {
    &[$($crate::dispatch::Candidate::new($name, $requires, $func)),+]
  };
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use platform::caps::{aarch64, x86};

  use super::*;

  #[derive(Clone, Copy, Debug, PartialEq, Eq)]
  enum Kernel {
    Wide,
    Narrow,
    Portable,
  }

  const LIST: &[Candidate<Kernel>] = &[
    Candidate::new("wide", x86::PCLMUL_READY, Kernel::Wide),
    Candidate::new("narrow", aarch64::PMULL_READY, Kernel::Narrow),
  ];

  #[test]
  fn first_satisfied_candidate_wins() {
    let caps = x86::PCLMUL_READY | aarch64::PMULL_READY;
    assert_eq!(select(caps, LIST), Some(Selected::new("wide", Kernel::Wide)));
  }

  #[test]
  fn partial_requirements_do_not_match() {
    assert_eq!(select(x86::PCLMULQDQ, LIST), None);
    assert_eq!(select(x86::SSE41 | aarch64::NEON, LIST), None);
  }

  #[test]
  fn later_candidate_matches_when_earlier_cannot() {
    let caps = aarch64::NEON | aarch64::PMULL | aarch64::AES;
    assert_eq!(select(caps, LIST).map(|s| s.func), Some(Kernel::Narrow));
  }

  #[test]
  fn select_or_falls_back() {
    let s = select_or(Caps::NONE, LIST, "portable", Kernel::Portable);
    assert_eq!(s.name, "portable");
    assert_eq!(s.func, Kernel::Portable);
  }

  #[test]
  fn candidates_macro_builds_list() {
    let list: &[Candidate<Kernel>] = candidates![
      "wide" => x86::PCLMUL_READY => Kernel::Wide,
      "narrow" => aarch64::PMULL_READY => Kernel::Narrow,
    ];
    assert_eq!(list.len(), 2);
    assert_eq!(list[1].name, "narrow");

    let empty: &[Candidate<Kernel>] = candidates![];
    assert_eq!(select_or(x86::PCLMUL_READY, empty, "portable", Kernel::Portable).func, Kernel::Portable);
  }
}

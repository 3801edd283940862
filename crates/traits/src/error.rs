//! Error types for algorithm lookup.

use core::fmt;

/// No algorithm matches the requested identifier or name.
///
/// Returned by registry lookups. Intentionally opaque: the caller already
/// holds the key it asked for.
///
/// # Examples
///
/// ```
/// use traits::UnknownAlgorithm;
///
/// fn lookup(name: &str) -> Result<u32, UnknownAlgorithm> {
///   match name {
///     "CRC32" => Ok(302),
///     _ => Err(UnknownAlgorithm::new()),
///   }
/// }
///
/// assert!(lookup("SHA1").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub struct UnknownAlgorithm;

impl UnknownAlgorithm {
  /// Create a new lookup error.
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self
  }
}

impl Default for UnknownAlgorithm {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Display for UnknownAlgorithm {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("unknown digest algorithm")
  }
}

impl core::error::Error for UnknownAlgorithm {}

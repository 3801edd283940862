//! Finalized digest output.

use core::fmt;

/// A finalized CRC digest.
///
/// Holds the 4-byte stored buffer plus the algorithm's logical length (3 for
/// CRC-24, 4 otherwise). Reading is free and repeatable.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CrcDigest {
  stored: [u8; 4],
  len: u8,
}

impl CrcDigest {
  #[inline]
  #[must_use]
  pub(crate) const fn new(stored: [u8; 4], len: usize) -> Self {
    let len = if len > 4 { 4 } else { len as u8 };
    Self { stored, len }
  }

  /// Logical digest bytes.
  #[inline]
  #[must_use]
  pub fn as_bytes(&self) -> &[u8] {
    self.stored.get(..self.len as usize).unwrap_or(&self.stored)
  }

  /// The full stored buffer, including the zero pad byte for CRC-24.
  #[inline]
  #[must_use]
  pub const fn stored(&self) -> [u8; 4] {
    self.stored
  }

  /// Logical digest length in bytes.
  #[inline]
  #[must_use]
  pub const fn size(&self) -> usize {
    self.len as usize
  }

  /// The checksum as an integer: the logical bytes read big-endian.
  #[must_use]
  pub fn value(&self) -> u32 {
    self.as_bytes().iter().fold(0, |acc, &b| (acc << 8) | u32::from(b))
  }
}

impl AsRef<[u8]> for CrcDigest {
  #[inline]
  fn as_ref(&self) -> &[u8] {
    self.as_bytes()
  }
}

impl fmt::LowerHex for CrcDigest {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for b in self.as_bytes() {
      write!(f, "{b:02x}")?;
    }
    Ok(())
  }
}

impl fmt::UpperHex for CrcDigest {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for b in self.as_bytes() {
      write!(f, "{b:02X}")?;
    }
    Ok(())
  }
}

impl fmt::Display for CrcDigest {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::LowerHex::fmt(self, f)
  }
}

impl fmt::Debug for CrcDigest {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "CrcDigest({self:x})")
  }
}

//! Digest-framework trait.
//!
//! Shaped like [`crate::Checksum`], except that finalization consumes the
//! context and yields a fixed-size byte buffer. The buffer can be read any
//! number of times.

use core::fmt::Debug;

/// An algorithm that a digest framework can register and drive.
pub trait Digest: Clone + Default {
  /// Display name used for registration and lookup (e.g. `"CRC32"`).
  const NAME: &'static str;

  /// Output size in bytes.
  const OUTPUT_SIZE: usize;

  /// Finalized output. `as_ref()` yields exactly `OUTPUT_SIZE` bytes.
  type Output: AsRef<[u8]> + Copy + Eq + Debug;

  /// Create a new context in its initial state.
  #[must_use]
  fn new() -> Self;

  /// Feed more input.
  fn update(&mut self, data: &[u8]);

  /// Feed multiple non-contiguous buffers in order.
  #[inline]
  fn update_vectored(&mut self, bufs: &[&[u8]]) {
    for buf in bufs {
      self.update(buf);
    }
  }

  /// Feed `std::io::IoSlice` buffers in order.
  #[cfg(feature = "std")]
  #[inline]
  fn update_io_slices(&mut self, bufs: &[std::io::IoSlice<'_>]) {
    for buf in bufs {
      self.update(buf);
    }
  }

  /// Apply the output transform and produce the digest.
  #[must_use]
  fn finalize(self) -> Self::Output;

  /// Reset the context to its initial state.
  fn reset(&mut self);

  /// Compute the digest of data in one shot.
  #[inline]
  #[must_use]
  fn digest(data: &[u8]) -> Self::Output {
    let mut h = Self::new();
    h.update(data);
    h.finalize()
  }

  /// Compute the digest of multiple buffers in one shot.
  #[inline]
  #[must_use]
  fn digest_vectored(bufs: &[&[u8]]) -> Self::Output {
    let mut h = Self::new();
    h.update_vectored(bufs);
    h.finalize()
  }
}

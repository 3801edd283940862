//! Running CRC state.
//!
//! [`Core`] is the state shared by every context type: the register, the
//! backend tag chosen at construction and the algorithm's descriptor.
//! [`CrcContext`] wraps it for callers that pick the algorithm at run time.

use core::fmt;

use platform::Caps;
use traits::UnknownAlgorithm;

use crate::{
  dispatch::Backend,
  output::CrcDigest,
  variant::{Algorithm, Descriptor},
};

// ─────────────────────────────────────────────────────────────────────────────
// Core
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone, PartialEq, Eq)]
pub(crate) struct Core {
  register: u32,
  backend: Backend,
  descriptor: &'static Descriptor,
}

impl Core {
  #[inline]
  #[must_use]
  pub(crate) fn new(descriptor: &'static Descriptor) -> Self {
    Self::with_backend(descriptor, Backend::select(platform::caps()))
  }

  /// Select the backend from `caps`, restricted to what the CPU supports.
  #[inline]
  #[must_use]
  pub(crate) fn with_caps(descriptor: &'static Descriptor, caps: Caps) -> Self {
    Self::with_backend(descriptor, Backend::select(caps.intersection(platform::caps())))
  }

  #[inline]
  #[must_use]
  pub(crate) fn resume(descriptor: &'static Descriptor, value: u32) -> Self {
    let mut core = Self::new(descriptor);
    core.register = descriptor.resume(value);
    core
  }

  #[inline]
  const fn with_backend(descriptor: &'static Descriptor, backend: Backend) -> Self {
    Self {
      register: descriptor.initial_register(),
      backend,
      descriptor,
    }
  }

  #[inline]
  pub(crate) fn update(&mut self, data: &[u8]) {
    if data.is_empty() {
      return;
    }
    self.register = self.backend.update(self.descriptor.family, self.register, data);
  }

  #[inline]
  #[must_use]
  pub(crate) const fn value(&self) -> u32 {
    self.descriptor.value(self.register)
  }

  #[inline]
  #[must_use]
  pub(crate) const fn digest(&self) -> CrcDigest {
    CrcDigest::new(self.descriptor.encode(self.register), self.descriptor.output_len)
  }

  /// Restore the initial register. The backend is kept.
  #[inline]
  pub(crate) const fn reset(&mut self) {
    self.register = self.descriptor.initial_register();
  }

  #[inline]
  #[must_use]
  pub(crate) const fn backend(&self) -> Backend {
    self.backend
  }

  #[inline]
  #[must_use]
  pub(crate) const fn descriptor(&self) -> &'static Descriptor {
    self.descriptor
  }

  pub(crate) fn fmt_as(&self, name: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct(name)
      .field("algorithm", &self.descriptor.algorithm)
      .field("value", &format_args!("{:#010x}", self.value()))
      .field("backend", &self.backend.name())
      .finish()
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// CrcContext
// ─────────────────────────────────────────────────────────────────────────────

/// A CRC context whose algorithm is chosen at run time.
///
/// Follows the same lifecycle as the typed contexts: construct, write any
/// number of times, then [`finalize`](Self::finalize) once.
///
/// ```
/// use crc_digest::{Algorithm, CrcContext};
///
/// let mut ctx = CrcContext::from_name("CRC24RFC2440").unwrap();
/// ctx.update(b"123456789");
/// assert_eq!(ctx.finalize().as_bytes(), &[0x21, 0xCF, 0x02]);
///
/// assert_eq!(CrcContext::new(Algorithm::Crc32).algorithm(), Algorithm::Crc32);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct CrcContext {
  core: Core,
}

impl CrcContext {
  /// Create a context, selecting the best backend for this CPU.
  #[inline]
  #[must_use]
  pub fn new(algorithm: Algorithm) -> Self {
    Self {
      core: Core::new(algorithm.descriptor()),
    }
  }

  /// Create a context whose backend is selected from `caps`.
  ///
  /// `caps` can only remove capabilities: it is intersected with the
  /// detected set before selection.
  #[inline]
  #[must_use]
  pub fn with_caps(algorithm: Algorithm, caps: Caps) -> Self {
    Self {
      core: Core::with_caps(algorithm.descriptor(), caps),
    }
  }

  /// Continue from a checksum value previously produced by this algorithm.
  #[inline]
  #[must_use]
  pub fn resume(algorithm: Algorithm, value: u32) -> Self {
    Self {
      core: Core::resume(algorithm.descriptor(), value),
    }
  }

  /// Create a context by framework identifier.
  pub fn from_id(id: u32) -> Result<Self, UnknownAlgorithm> {
    Algorithm::from_id(id).map(Self::new)
  }

  /// Create a context by display name (ASCII case-insensitive).
  pub fn from_name(name: &str) -> Result<Self, UnknownAlgorithm> {
    Algorithm::from_name(name).map(Self::new)
  }

  #[inline]
  #[must_use]
  pub const fn algorithm(&self) -> Algorithm {
    self.core.descriptor().algorithm
  }

  #[inline]
  #[must_use]
  pub const fn descriptor(&self) -> &'static Descriptor {
    self.core.descriptor()
  }

  /// Backend selected when this context was created.
  #[inline]
  #[must_use]
  pub const fn backend(&self) -> Backend {
    self.core.backend()
  }

  /// Feed bytes. An empty slice is a no-op.
  #[inline]
  pub fn update(&mut self, data: &[u8]) {
    self.core.update(data);
  }

  /// Feed several buffers in order.
  #[inline]
  pub fn update_vectored(&mut self, bufs: &[&[u8]]) {
    for buf in bufs {
      self.core.update(buf);
    }
  }

  /// Checksum of everything written so far, without finalizing.
  #[inline]
  #[must_use]
  pub const fn value(&self) -> u32 {
    self.core.value()
  }

  /// Finish the computation.
  #[inline]
  #[must_use]
  pub const fn finalize(self) -> CrcDigest {
    self.core.digest()
  }

  #[inline]
  pub const fn reset(&mut self) {
    self.core.reset();
  }
}

impl fmt::Debug for CrcContext {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.core.fmt_as("CrcContext", f)
  }
}

#[cfg(feature = "std")]
impl std::io::Write for CrcContext {
  #[inline]
  fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
    self.update(buf);
    Ok(buf.len())
  }

  #[inline]
  fn flush(&mut self) -> std::io::Result<()> {
    Ok(())
  }
}

//! Internal macros for CRC variant generation.

/// Generate a typed CRC context with inherent API, `Checksum`, `Digest` and
/// `std::io::Write` implementations.
///
/// # Arguments
///
/// - `$name`: The type name (e.g., `Crc32`)
/// - `$descriptor`: The static [`Descriptor`](crate::Descriptor) it computes
macro_rules! define_crc_digest {
  (
    $(#[$outer:meta])*
    $vis:vis struct $name:ident {
      descriptor: $descriptor:expr,
    }
  ) => {
    $(#[$outer])*
    #[derive(Clone, PartialEq, Eq)]
    $vis struct $name {
      core: $crate::context::Core,
    }

    impl $name {
      /// Create a context, selecting the best backend for this CPU.
      #[inline]
      #[must_use]
      pub fn new() -> Self {
        Self { core: $crate::context::Core::new(&$descriptor) }
      }

      /// Create a context whose backend is selected from `caps`.
      ///
      /// `caps` can only remove capabilities: it is intersected with the
      /// detected set before selection.
      #[inline]
      #[must_use]
      pub fn with_caps(caps: platform::Caps) -> Self {
        Self { core: $crate::context::Core::with_caps(&$descriptor, caps) }
      }

      /// Continue from a checksum previously returned by [`value`](Self::value).
      #[inline]
      #[must_use]
      pub fn resume(value: u32) -> Self {
        Self { core: $crate::context::Core::resume(&$descriptor, value) }
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

      /// Finish the computation. The context cannot be written afterwards.
      #[inline]
      #[must_use]
      pub const fn finalize(self) -> $crate::CrcDigest {
        self.core.digest()
      }

      /// Restore the initial value, keeping the selected backend.
      #[inline]
      pub const fn reset(&mut self) {
        self.core.reset();
      }

      /// Backend selected when this context was created.
      #[inline]
      #[must_use]
      pub const fn backend(&self) -> $crate::Backend {
        self.core.backend()
      }

      #[inline]
      #[must_use]
      pub const fn descriptor() -> &'static $crate::Descriptor {
        &$descriptor
      }

      /// One-shot checksum.
      #[inline]
      #[must_use]
      pub fn checksum(data: &[u8]) -> u32 {
        let mut ctx = Self::new();
        ctx.update(data);
        ctx.value()
      }

      /// One-shot digest.
      #[inline]
      #[must_use]
      pub fn digest(data: &[u8]) -> $crate::CrcDigest {
        let mut ctx = Self::new();
        ctx.update(data);
        ctx.finalize()
      }
    }

    impl Default for $name {
      #[inline]
      fn default() -> Self {
        Self::new()
      }
    }

    impl core::fmt::Debug for $name {
      fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.core.fmt_as(stringify!($name), f)
      }
    }

    impl traits::Checksum for $name {
      const OUTPUT_SIZE: usize = $descriptor.output_len;
      type Output = u32;

      #[inline]
      fn new() -> Self {
        Self::new()
      }

      #[inline]
      fn with_initial(initial: u32) -> Self {
        Self::resume(initial)
      }

      #[inline]
      fn update(&mut self, data: &[u8]) {
        self.core.update(data);
      }

      #[inline]
      fn finalize(&self) -> u32 {
        self.core.value()
      }

      #[inline]
      fn reset(&mut self) {
        self.core.reset();
      }
    }

    impl traits::Digest for $name {
      const NAME: &'static str = $descriptor.name;
      const OUTPUT_SIZE: usize = $descriptor.output_len;
      type Output = $crate::CrcDigest;

      #[inline]
      fn new() -> Self {
        Self::new()
      }

      #[inline]
      fn update(&mut self, data: &[u8]) {
        self.core.update(data);
      }

      #[inline]
      fn finalize(self) -> $crate::CrcDigest {
        self.core.digest()
      }

      #[inline]
      fn reset(&mut self) {
        self.core.reset();
      }
    }

    #[cfg(feature = "std")]
    impl std::io::Write for $name {
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
  };
}

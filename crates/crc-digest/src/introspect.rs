//! Backend selection introspection.
//!
//! ```
//! use crc_digest::{Algorithm, DispatchInfo, introspect};
//!
//! let info = DispatchInfo::current();
//! println!("{info}");
//! println!("CRC-24 backend: {}", introspect::selected_backend(Algorithm::Crc24Rfc2440));
//! ```

use core::fmt;

use platform::{Arch, Caps};

use crate::{
  config::{self, CrcConfig},
  dispatch::Backend,
  variant::Algorithm,
};

/// Detected capabilities, force mode and the backend a new context would use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DispatchInfo {
  caps: Caps,
  config: CrcConfig,
  backend: Backend,
}

impl DispatchInfo {
  /// Snapshot for the current process.
  #[must_use]
  pub fn current() -> Self {
    let caps = platform::caps();
    Self {
      caps,
      config: config::for_caps(caps),
      backend: Backend::select(caps),
    }
  }

  #[inline]
  #[must_use]
  pub const fn caps(&self) -> Caps {
    self.caps
  }

  #[inline]
  #[must_use]
  pub const fn arch(&self) -> Arch {
    Arch::current()
  }

  #[inline]
  #[must_use]
  pub const fn config(&self) -> CrcConfig {
    self.config
  }

  #[inline]
  #[must_use]
  pub const fn backend(&self) -> Backend {
    self.backend
  }
}

impl fmt::Display for DispatchInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} force={}", self.caps, self.config.requested_force)?;
    if self.config.effective_force != self.config.requested_force {
      write!(f, " (effective {})", self.config.effective_force)?;
    }
    write!(f, " backend={}", self.backend)
  }
}

/// Backend a context for `algorithm` created now would use.
///
/// Both CRC families share one candidate table, so this currently depends
/// only on the capabilities and force mode.
#[must_use]
pub fn selected_backend(algorithm: Algorithm) -> Backend {
  let _ = algorithm;
  Backend::select(platform::caps())
}

#[cfg(test)]
mod tests {
  extern crate std;

  use std::string::ToString;

  use super::*;

  #[test]
  fn display_mentions_backend_and_force() {
    let info = DispatchInfo::current();
    let text = info.to_string();
    assert!(text.contains(info.backend().name()), "{text}");
    assert!(text.contains("force="), "{text}");
  }

  #[test]
  fn selected_backend_matches_new_context() {
    for algorithm in Algorithm::ALL {
      assert_eq!(selected_backend(algorithm), crate::CrcContext::new(algorithm).backend());
    }
  }
}

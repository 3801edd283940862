//! Programmatic force mode.
//!
//! Runs as a single test because the force mode is process-wide.

use crc_digest::{
  Algorithm, Backend, Crc32, CrcContext, DispatchInfo,
  config::{self, Force},
};

#[test]
fn force_mode_controls_new_contexts() {
  config::set_force(Some(Force::Auto));
  let auto = CrcContext::new(Algorithm::Crc32).backend();

  config::set_force(Some(Force::Portable));
  let cfg = config::get();
  assert_eq!(cfg.requested_force, Force::Portable);
  assert_eq!(cfg.effective_force, Force::Portable);
  assert_eq!(Crc32::new().backend(), Backend::Portable);
  assert_eq!(DispatchInfo::current().backend(), Backend::Portable);
  assert!(DispatchInfo::current().to_string().contains("force=portable"));
  assert_eq!(Crc32::checksum(b"123456789"), 0xCBF4_3926);

  // Hardware is clamped: without an accelerated backend it behaves like auto.
  config::set_force(Some(Force::Hardware));
  let cfg = config::get();
  assert_eq!(cfg.requested_force, Force::Hardware);
  if auto.is_accelerated() {
    assert_eq!(cfg.effective_force, Force::Hardware);
  } else {
    assert_eq!(cfg.effective_force, Force::Auto);
  }
  assert_eq!(Crc32::new().backend(), auto);

  // Existing contexts keep their backend.
  let ctx = CrcContext::new(Algorithm::Crc24Rfc2440);
  config::set_force(Some(Force::Portable));
  assert_eq!(ctx.backend(), auto);

  config::set_force(Some(Force::Auto));
  assert_eq!(CrcContext::new(Algorithm::Crc32).backend(), auto);
  config::set_force(None);
}

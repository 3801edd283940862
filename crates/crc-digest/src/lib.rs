//! CRC-32, CRC-32/RFC1510 and CRC-24/RFC2440 digests.
//!
//! Each algorithm is exposed two ways:
//!
//! | Type | Picks the algorithm | Trait views |
//! |------|---------------------|-------------|
//! | [`Crc32`], [`Crc32Rfc1510`], [`Crc24Rfc2440`] | At compile time | [`Checksum`], [`Digest`] |
//! | [`CrcContext`] | At run time ([`Algorithm`]) | none |
//!
//! # Quick Start
//!
//! ```rust
//! use crc_digest::{Algorithm, Crc24Rfc2440, Crc32, CrcContext};
//!
//! // Typed context: init, write, final, read.
//! let mut ctx = Crc32::new();
//! ctx.update(b"1234");
//! ctx.update(b"56789");
//! let digest = ctx.finalize();
//! assert_eq!(digest.as_bytes(), &[0xCB, 0xF4, 0x39, 0x26]);
//! assert_eq!(digest.value(), 0xCBF43926);
//!
//! // One-shot.
//! assert_eq!(Crc24Rfc2440::checksum(b"123456789"), 0x21CF02);
//!
//! // Run-time selection by framework identifier.
//! let mut ctx = CrcContext::new(Algorithm::from_id(303).unwrap());
//! ctx.update(b"123456789");
//! assert_eq!(ctx.finalize().value(), 0x2DFD2D88);
//! ```
//!
//! # Backends
//!
//! A context selects its backend once, when it is created: carry-less
//! multiply folding (x86_64 PCLMULQDQ, aarch64 PMULL) when the CPU supports
//! it, otherwise the portable slicing-by-4 engine. All backends produce
//! identical results. See [`config`] for forcing a backend and
//! [`introspect`] for reporting the selection.
//!
//! # Fallibility Discipline
//!
//! This crate denies `unwrap`, `expect`, and indexing in non-test code.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

// Internal macros must be declared before modules that use them.
#[macro_use]
mod macros;

mod context;
mod digests;
mod dispatch;
mod engine;
mod fold;
mod output;
mod reference;
mod simd;
mod tables;
mod variant;

pub mod config;
pub mod introspect;


#[cfg(all(test, not(miri), feature = "alloc"))]
mod proptests;

pub use context::CrcContext;
pub use digests::{Crc24Rfc2440, Crc32, Crc32Rfc1510};
pub use dispatch::Backend;
pub use introspect::DispatchInfo;
pub use output::CrcDigest;
pub use platform::Caps;
pub use variant::{Algorithm, ByteOrder, Descriptor, Finish};
// Re-export traits for convenience
pub use traits::{Checksum, Digest, UnknownAlgorithm};

#[doc(hidden)]
pub mod __internal {
  //! Table-level entry points for benches and fuzz targets.
  pub use crate::{
    engine::{next, next4, update_bytewise, update_sliced},
    reference::{crc24_bitwise, crc32_bitwise},
    tables::{CRC24_POLY, CRC24_TABLE, CRC32_POLY, CRC32_POLY_REFLECTED, CRC32_TABLE, Table},
  };
}

//! Capability traits for the crc-digest workspace.
//!
//! Algorithms in this workspace expose two views of the same state:
//!
//! | Trait | Output | Finalize |
//! |-------|--------|----------|
//! | [`Checksum`] | Integer (`u32`) | `&self`, idempotent |
//! | [`Digest`] | Fixed-size byte buffer | `self`, consumes the context |
//!
//! The digest view is the one a digest framework drives: it follows an
//! init / write / final / read lifecycle and makes writing after finalization
//! a compile error instead of a runtime state check.
//!
//! # Error Types
//!
//! - [`UnknownAlgorithm`] - Lookup by identifier or name found no algorithm
//!
//! # Fallibility Discipline
//!
//! This crate denies `unwrap`, `expect`, and indexing in non-test code.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod checksum;
mod digest;
pub mod error;

pub use checksum::Checksum;
pub use digest::Digest;
pub use error::UnknownAlgorithm;

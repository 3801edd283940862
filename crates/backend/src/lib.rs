//! Backend selection primitives.
//!
//! Algorithm crates describe their implementations as an ordered list of
//! [`Candidate`]s, each naming the capability set it requires. Selection
//! walks the list once and returns the first candidate whose requirements
//! are all present:
//!
//! ```ignore
//! use backend::{candidates, dispatch::select_or};
//! use platform::caps::x86;
//!
//! let selected = select_or(
//!     platform::caps(),
//!     candidates![
//!         "x86_64/pclmul" => x86::PCLMUL_READY => Kernel::Pclmul,
//!     ],
//!     "portable",
//!     Kernel::Portable,
//! );
//! ```
//!
//! The result is a plain `Copy` value, so callers decide where to keep it:
//! in a process-wide cache, or inside each context.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod dispatch;

pub use dispatch::{Candidate, Selected, select, select_or};
// Re-export platform types for convenience.
pub use platform;

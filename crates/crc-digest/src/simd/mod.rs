//! Carry-less multiply folding kernels.
//!
//! Each kernel has the fixed shape `unsafe fn(u32, &[u8]) -> u32`: it takes a
//! raw register in the same layout the portable engine uses and returns the
//! updated register. Inputs shorter than four 16-byte lanes, and the final
//! 0..=15 bytes of longer inputs, go through the slicing engine.
//!
//! Constants come from [`crate::fold`].

#[cfg(target_arch = "x86_64")]
pub(crate) mod x86_64;

#[cfg(target_arch = "aarch64")]
pub(crate) mod aarch64;

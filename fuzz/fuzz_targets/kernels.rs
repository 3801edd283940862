//! Cross-kernel fuzz target.
//!
//! Tests that the bitwise reference, the byte-wise and slicing engines, and
//! every accelerated backend the CPU supports agree; and that contexts
//! restricted to arbitrary capability subsets agree with the default one.

#![no_main]

use arbitrary::Arbitrary;
use crc_digest::{Algorithm, CrcContext, kernel_test};
use libfuzzer_sys::fuzz_target;
use platform::Caps;

#[derive(Arbitrary, Debug)]
struct Input {
  data: Vec<u8>,
  caps: u32,
}

fuzz_target!(|input: Input| {
  let caps = Caps::from_raw(input.caps);
  for algorithm in Algorithm::ALL {
    let expected = match kernel_test::verify_kernels(algorithm, &input.data) {
      Ok(value) => value,
      Err(msg) => panic!("{msg}"),
    };

    let mut ctx = CrcContext::with_caps(algorithm, caps);
    ctx.update(&input.data);
    assert_eq!(ctx.value(), expected, "{algorithm} caps={caps} backend={}", ctx.backend());
  }
});

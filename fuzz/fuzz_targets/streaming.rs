//! Fuzz target for the streaming digest API.
//!
//! Tests that arbitrary sequences of update calls, resumes and resets
//! produce the same result as a one-shot computation.

#![no_main]

use arbitrary::Arbitrary;
use crc_digest::{Algorithm, CrcContext};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  data: Vec<u8>,
  /// Chunk sizes for streaming updates
  chunk_sizes: Vec<usize>,
  split_point: usize,
}

fuzz_target!(|input: Input| {
  for algorithm in Algorithm::ALL {
    check_streaming(algorithm, &input.data, &input.chunk_sizes);
    check_resume(algorithm, &input.data, input.split_point);
  }
});

fn check_streaming(algorithm: Algorithm, data: &[u8], chunk_sizes: &[usize]) {
  let mut oneshot = CrcContext::new(algorithm);
  oneshot.update(data);
  let expected = oneshot.finalize();

  let mut ctx = CrcContext::new(algorithm);
  let mut rest = data;
  let mut chunk_idx = 0;
  while !rest.is_empty() {
    let chunk_size = if chunk_sizes.is_empty() {
      1
    } else {
      (chunk_sizes[chunk_idx % chunk_sizes.len()] % 256).max(1)
    };
    let (part, tail) = rest.split_at(chunk_size.min(rest.len()));
    ctx.update(part);
    rest = tail;
    chunk_idx += 1;
  }

  let digest = ctx.finalize();
  assert_eq!(digest, expected, "{algorithm} streaming mismatch");
  assert_eq!(digest.as_bytes().len(), algorithm.output_len());
}

fn check_resume(algorithm: Algorithm, data: &[u8], split_point: usize) {
  let split = split_point % (data.len() + 1);
  let (a, b) = data.split_at(split);

  let mut oneshot = CrcContext::new(algorithm);
  oneshot.update(data);

  let mut first = CrcContext::new(algorithm);
  first.update(a);
  let mut resumed = CrcContext::resume(algorithm, first.value());
  resumed.update(b);
  assert_eq!(resumed.value(), oneshot.value(), "{algorithm} resume mismatch");

  first.reset();
  first.update(data);
  assert_eq!(first.finalize(), oneshot.finalize(), "{algorithm} reset mismatch");
}

//! Backend equivalence.
//!
//! Every backend the CPU supports must agree with the portable engine on
//! every input length class: shorter than one fold block, exact multiples of
//! the 16- and 64-byte strides, and with 1..=15 byte tails.
//!
//! Runs as a single test because it installs a process-wide capability
//! override.

use crc_digest::{Algorithm, Backend, Caps, CrcContext, DispatchInfo};

fn gen_bytes(len: usize, seed: u64) -> Vec<u8> {
  let mut out = vec![0u8; len];
  let mut x = seed;
  for b in &mut out {
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    *b = (x as u8).wrapping_add((x >> 8) as u8);
  }
  out
}

fn lengths() -> Vec<usize> {
  let mut lengths: Vec<usize> = (0..=160).collect();
  for base in [192, 256, 512, 1024, 4096] {
    for delta in [0, 1, 4, 15, 16, 17, 48, 63] {
      lengths.push(base + delta);
    }
  }
  lengths.push(65_536 + 3);
  lengths
}

fn run(ctx: &CrcContext, data: &[u8], chunk: usize) -> u32 {
  let mut ctx = ctx.clone();
  for part in data.chunks(chunk.max(1)) {
    ctx.update(part);
  }
  ctx.value()
}

#[test]
fn backends_are_observationally_identical() {
  let detected = platform::caps();
  let data = gen_bytes(65_536 + 3, 0x0123_4567_89AB_CDEF);

  for algorithm in Algorithm::ALL {
    let portable = CrcContext::with_caps(algorithm, Caps::NONE);
    assert_eq!(portable.backend(), Backend::Portable);

    let best = CrcContext::new(algorithm);
    if best.backend().is_accelerated() {
      assert!(detected.has(best.backend().requires()));
    }

    for len in lengths() {
      let input = &data[..len];
      let expected = run(&portable, input, len);
      assert_eq!(run(&best, input, len), expected, "{algorithm} {} len={len}", best.backend());
      // Chunked writes split the accelerated path into many short calls.
      assert_eq!(run(&best, input, 67), expected, "{algorithm} {} len={len} chunk=67", best.backend());
    }
  }

  // With no capabilities, every new context is portable.
  platform::set_caps_override(Some(Caps::NONE));
  assert!(platform::has_override());
  assert_eq!(DispatchInfo::current().backend(), Backend::Portable);
  for algorithm in Algorithm::ALL {
    let ctx = CrcContext::new(algorithm);
    assert_eq!(ctx.backend(), Backend::Portable, "{algorithm}");
    assert_eq!(run(&ctx, b"123456789", 9), algorithm.descriptor().check, "{algorithm}");
  }

  // Supplied capabilities are clamped to what the CPU has.
  platform::set_caps_override(None);
  let all_bits = Backend::ALL.iter().fold(Caps::NONE, |acc, b| acc | b.requires());
  for algorithm in Algorithm::ALL {
    let ctx = CrcContext::with_caps(algorithm, all_bits);
    assert!(detected.has(ctx.backend().requires()), "{algorithm} {}", ctx.backend());
  }
}

extern crate std;

use std::vec::Vec;

use proptest::prelude::*;

use crate::{
  Algorithm, Crc24Rfc2440, Crc32, Crc32Rfc1510, CrcContext, engine, kernel_test,
  reference::{crc24_bitwise, crc32_bitwise},
  tables::{CRC24_POLY, CRC24_TABLE, CRC32_POLY_REFLECTED, CRC32_TABLE},
};

fn algorithm() -> impl Strategy<Value = Algorithm> {
  prop_oneof![
    Just(Algorithm::Crc32),
    Just(Algorithm::Crc32Rfc1510),
    Just(Algorithm::Crc24Rfc2440),
  ]
}

proptest! {
  #[test]
  fn crc32_matches_reference(data in proptest::collection::vec(any::<u8>(), 0..=4096)) {
    prop_assert_eq!(Crc32::checksum(&data), !crc32_bitwise(CRC32_POLY_REFLECTED, !0, &data));
    prop_assert_eq!(Crc32Rfc1510::checksum(&data), crc32_bitwise(CRC32_POLY_REFLECTED, 0, &data));
  }

  #[test]
  fn crc24_matches_reference(data in proptest::collection::vec(any::<u8>(), 0..=4096)) {
    prop_assert_eq!(Crc24Rfc2440::checksum(&data), crc24_bitwise(CRC24_POLY, 0x00B7_04CE, &data));
  }

  #[test]
  fn engines_agree(data in proptest::collection::vec(any::<u8>(), 0..=1024), init in any::<u32>()) {
    prop_assert_eq!(
      engine::update_sliced(&CRC32_TABLE, init, &data),
      engine::update_bytewise(&CRC32_TABLE, init, &data)
    );
    let init24 = init & 0x00FF_FFFF;
    prop_assert_eq!(
      engine::update_sliced(&CRC24_TABLE, init24, &data),
      engine::update_bytewise(&CRC24_TABLE, init24, &data)
    );
  }

  #[test]
  fn chunking_is_invisible(
    alg in algorithm(),
    data in proptest::collection::vec(any::<u8>(), 0..=4096),
    split in any::<usize>(),
    chunk in 1usize..=257
  ) {
    let split = split % (data.len() + 1);
    let (a, b) = data.split_at(split);

    let mut oneshot = CrcContext::new(alg);
    oneshot.update(&data);

    let mut streamed = CrcContext::new(alg);
    for part in a.chunks(chunk) {
      streamed.update(part);
    }
    for part in b.chunks(chunk) {
      streamed.update(part);
    }
    prop_assert_eq!(streamed.value(), oneshot.value());

    let mut resumed = CrcContext::new(alg);
    resumed.update(a);
    let mut resumed = CrcContext::resume(alg, resumed.value());
    resumed.update(b);
    prop_assert_eq!(resumed.finalize(), oneshot.finalize());
  }

  #[test]
  fn vectored_matches_contiguous(
    alg in algorithm(),
    parts in proptest::collection::vec(proptest::collection::vec(any::<u8>(), 0..=96), 0..=8)
  ) {
    let bufs: Vec<&[u8]> = parts.iter().map(Vec::as_slice).collect();
    let data: Vec<u8> = parts.concat();

    let mut vectored = CrcContext::new(alg);
    vectored.update_vectored(&bufs);
    let mut contiguous = CrcContext::new(alg);
    contiguous.update(&data);
    prop_assert_eq!(vectored.finalize(), contiguous.finalize());
  }

  #[test]
  fn all_kernels_agree(alg in algorithm(), data in proptest::collection::vec(any::<u8>(), 0..=2048)) {
    prop_assert!(kernel_test::verify_kernels(alg, &data).is_ok());
  }

  #[test]
  fn digest_bytes_encode_value(alg in algorithm(), data in proptest::collection::vec(any::<u8>(), 0..=512)) {
    let mut ctx = CrcContext::new(alg);
    ctx.update(&data);
    let value = ctx.value();
    let digest = ctx.finalize();
    prop_assert_eq!(digest.value(), value);
    prop_assert_eq!(digest.as_bytes().len(), alg.output_len());
    if alg == Algorithm::Crc24Rfc2440 {
      prop_assert_eq!(digest.stored()[3], 0);
    }
  }
}

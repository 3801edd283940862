//! Differential fuzz target against the `crc` crate.
//!
//! Tests that every algorithm matches the `crc` crate's definition of the
//! same CRC on arbitrary input.

#![no_main]

use crc::{CRC_24_OPENPGP, CRC_32_ISO_HDLC, Crc};
use crc_digest::{Crc24Rfc2440, Crc32, Crc32Rfc1510};
use libfuzzer_sys::fuzz_target;

const CRC_32_RFC1510: crc::Algorithm<u32> = crc::Algorithm {
  width: 32,
  poly: 0x04c1_1db7,
  init: 0x0000_0000,
  refin: true,
  refout: true,
  xorout: 0x0000_0000,
  check: 0x2dfd_2d88,
  residue: 0x0000_0000,
};

static REF_CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);
static REF_CRC32_RFC1510: Crc<u32> = Crc::<u32>::new(&CRC_32_RFC1510);
static REF_CRC24: Crc<u32> = Crc::<u32>::new(&CRC_24_OPENPGP);

fuzz_target!(|data: &[u8]| {
  assert_eq!(Crc32::checksum(data), REF_CRC32.checksum(data), "CRC32 mismatch");
  assert_eq!(
    Crc32Rfc1510::checksum(data),
    REF_CRC32_RFC1510.checksum(data),
    "CRC32RFC1510 mismatch"
  );
  assert_eq!(Crc24Rfc2440::checksum(data), REF_CRC24.checksum(data), "CRC24RFC2440 mismatch");
  assert_eq!(
    Crc24Rfc2440::digest(data).as_bytes(),
    &REF_CRC24.checksum(data).to_be_bytes()[1..],
    "CRC24RFC2440 byte order mismatch"
  );
});

//! Algorithm registry and per-variant descriptors.
//!
//! Each algorithm is a small bundle of constants over one of two register
//! families: the reflected CRC-32 family (shared by CRC-32 and
//! CRC-32/RFC1510) and the byte-swapped CRC-24 family.

use core::{fmt, str::FromStr};

use traits::UnknownAlgorithm;

use crate::tables::{CRC24_POLY, CRC24_TABLE, CRC32_POLY, CRC32_TABLE, Table};

// ─────────────────────────────────────────────────────────────────────────────
// Register families
// ─────────────────────────────────────────────────────────────────────────────

/// Table and kernel family a register belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Family {
  Crc32,
  Crc24,
}

impl Family {
  #[inline]
  #[must_use]
  pub(crate) fn table(self) -> &'static Table {
    match self {
      Self::Crc32 => &CRC32_TABLE,
      Self::Crc24 => &CRC24_TABLE,
    }
  }
}

/// Transform applied to the register at finalization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Finish {
  /// Bitwise complement (CRC-32).
  Complement,
  /// Register is the checksum (CRC-32/RFC1510).
  Identity,
  /// Low 24 bits of the byte-swapped register (CRC-24/RFC2440).
  Mask24,
}

/// Order in which the register is written into the stored output buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ByteOrder {
  BigEndian,
  LittleEndian,
}

// ─────────────────────────────────────────────────────────────────────────────
// Algorithm
// ─────────────────────────────────────────────────────────────────────────────

/// A supported CRC algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
  /// CRC-32 (ISO-HDLC, as used by zip and Ethernet).
  Crc32,
  /// CRC-32 without pre- or post-conditioning, as specified by RFC 1510.
  Crc32Rfc1510,
  /// CRC-24 as specified by RFC 2440 (OpenPGP ASCII armor).
  Crc24Rfc2440,
}

impl Algorithm {
  /// Every algorithm, in identifier order.
  pub const ALL: [Self; 3] = [Self::Crc32, Self::Crc32Rfc1510, Self::Crc24Rfc2440];

  /// Static descriptor for this algorithm.
  #[inline]
  #[must_use]
  pub const fn descriptor(self) -> &'static Descriptor {
    match self {
      Self::Crc32 => &CRC32,
      Self::Crc32Rfc1510 => &CRC32_RFC1510,
      Self::Crc24Rfc2440 => &CRC24_RFC2440,
    }
  }

  #[inline]
  #[must_use]
  pub const fn id(self) -> u32 {
    self.descriptor().id
  }

  #[inline]
  #[must_use]
  pub const fn name(self) -> &'static str {
    self.descriptor().name
  }

  /// Logical digest length in bytes.
  #[inline]
  #[must_use]
  pub const fn output_len(self) -> usize {
    self.descriptor().output_len
  }

  /// Look an algorithm up by its framework identifier.
  pub fn from_id(id: u32) -> Result<Self, UnknownAlgorithm> {
    Self::ALL
      .into_iter()
      .find(|a| a.id() == id)
      .ok_or(UnknownAlgorithm::new())
  }

  /// Look an algorithm up by display name, ignoring ASCII case.
  ///
  /// Hyphenated catalogue spellings (`"CRC-32"`, `"CRC-24/RFC2440"`) are
  /// accepted as well.
  pub fn from_name(name: &str) -> Result<Self, UnknownAlgorithm> {
    let name = name.trim();
    for algorithm in Self::ALL {
      if name.eq_ignore_ascii_case(algorithm.name()) || name.eq_ignore_ascii_case(algorithm.descriptor().alias) {
        return Ok(algorithm);
      }
    }
    Err(UnknownAlgorithm::new())
  }
}

impl fmt::Display for Algorithm {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl FromStr for Algorithm {
  type Err = UnknownAlgorithm;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::from_name(s)
  }
}

impl TryFrom<u32> for Algorithm {
  type Error = UnknownAlgorithm;

  fn try_from(id: u32) -> Result<Self, Self::Error> {
    Self::from_id(id)
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Descriptor
// ─────────────────────────────────────────────────────────────────────────────

/// Everything a digest framework needs to know about one algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Descriptor {
  pub algorithm: Algorithm,
  /// Framework algorithm identifier.
  pub id: u32,
  /// Display name.
  pub name: &'static str,
  /// Catalogue spelling accepted by [`Algorithm::from_name`].
  pub alias: &'static str,
  /// Register width in bits.
  pub width: u8,
  /// Generator polynomial, normal (MSB-first) form without the top bit.
  pub poly: u32,
  /// Whether input and output bits are reflected.
  pub reflected: bool,
  /// Initial register value in the algorithm's conventional (catalogue) form.
  pub init: u32,
  /// Logical digest length in bytes.
  pub output_len: usize,
  /// Size of the stored output buffer in bytes.
  pub stored_len: usize,
  pub finish: Finish,
  pub byte_order: ByteOrder,
  pub fips_allowed: bool,
  /// Checksum of `b"123456789"`.
  pub check: u32,
  pub(crate) family: Family,
}

impl Descriptor {
  /// Register value a fresh context starts from.
  #[inline]
  #[must_use]
  pub(crate) const fn initial_register(&self) -> u32 {
    self.resume(self.init ^ self.xorout())
  }

  /// Register value that continues from a finalized checksum `value`.
  #[inline]
  #[must_use]
  pub(crate) const fn resume(&self, value: u32) -> u32 {
    match self.finish {
      Finish::Complement => !value,
      Finish::Identity => value,
      Finish::Mask24 => ((value & 0x00FF_FFFF) << 8).swap_bytes(),
    }
  }

  /// Checksum value of a register.
  #[inline]
  #[must_use]
  pub(crate) const fn value(&self, register: u32) -> u32 {
    match self.finish {
      Finish::Complement => !register,
      Finish::Identity => register,
      Finish::Mask24 => (register & 0x00FF_FFFF).swap_bytes() >> 8,
    }
  }

  /// Stored output buffer for a register.
  #[inline]
  #[must_use]
  pub(crate) const fn encode(&self, register: u32) -> [u8; 4] {
    let word = match self.finish {
      Finish::Complement => !register,
      Finish::Identity => register,
      Finish::Mask24 => register & 0x00FF_FFFF,
    };
    match self.byte_order {
      ByteOrder::BigEndian => word.to_be_bytes(),
      ByteOrder::LittleEndian => word.to_le_bytes(),
    }
  }

  /// Final XOR in catalogue terms.
  #[inline]
  const fn xorout(&self) -> u32 {
    match self.finish {
      Finish::Complement => 0xFFFF_FFFF,
      Finish::Identity | Finish::Mask24 => 0,
    }
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Static descriptors
// ─────────────────────────────────────────────────────────────────────────────

pub(crate) const CRC32: Descriptor = Descriptor {
  algorithm: Algorithm::Crc32,
  id: 302,
  name: "CRC32",
  alias: "CRC-32",
  width: 32,
  poly: CRC32_POLY,
  reflected: true,
  init: 0xFFFF_FFFF,
  output_len: 4,
  stored_len: 4,
  finish: Finish::Complement,
  byte_order: ByteOrder::BigEndian,
  fips_allowed: true,
  check: 0xCBF4_3926,
  family: Family::Crc32,
};

pub(crate) const CRC32_RFC1510: Descriptor = Descriptor {
  algorithm: Algorithm::Crc32Rfc1510,
  id: 303,
  name: "CRC32RFC1510",
  alias: "CRC-32/RFC1510",
  width: 32,
  poly: CRC32_POLY,
  reflected: true,
  init: 0,
  output_len: 4,
  stored_len: 4,
  finish: Finish::Identity,
  byte_order: ByteOrder::BigEndian,
  fips_allowed: true,
  check: 0x2DFD_2D88,
  family: Family::Crc32,
};

pub(crate) const CRC24_RFC2440: Descriptor = Descriptor {
  algorithm: Algorithm::Crc24Rfc2440,
  id: 304,
  name: "CRC24RFC2440",
  alias: "CRC-24/RFC2440",
  width: 24,
  poly: CRC24_POLY,
  reflected: false,
  init: 0x00B7_04CE,
  output_len: 3,
  stored_len: 4,
  finish: Finish::Mask24,
  byte_order: ByteOrder::LittleEndian,
  fips_allowed: true,
  check: 0x0021_CF02,
  family: Family::Crc24,
};

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn ids_and_names_round_trip() {
    for algorithm in Algorithm::ALL {
      assert_eq!(Algorithm::from_id(algorithm.id()), Ok(algorithm));
      assert_eq!(Algorithm::from_name(algorithm.name()), Ok(algorithm));
      assert_eq!(algorithm.descriptor().algorithm, algorithm);
    }
  }

  #[test]
  fn framework_identifiers() {
    assert_eq!(Algorithm::Crc32.id(), 302);
    assert_eq!(Algorithm::Crc32Rfc1510.id(), 303);
    assert_eq!(Algorithm::Crc24Rfc2440.id(), 304);
  }

  #[test]
  fn name_lookup_ignores_case_and_accepts_aliases() {
    assert_eq!(Algorithm::from_name("crc32"), Ok(Algorithm::Crc32));
    assert_eq!("Crc32Rfc1510".parse::<Algorithm>(), Ok(Algorithm::Crc32Rfc1510));
    assert_eq!(Algorithm::from_name("crc-24/rfc2440"), Ok(Algorithm::Crc24Rfc2440));
    assert_eq!(Algorithm::from_name(" CRC-32 "), Ok(Algorithm::Crc32));
  }

  #[test]
  fn unknown_lookups_fail() {
    assert!(Algorithm::from_id(0).is_err());
    assert!(Algorithm::from_id(305).is_err());
    assert!(Algorithm::from_name("").is_err());
    assert!(Algorithm::from_name("CRC32C").is_err());
    assert!(Algorithm::try_from(301).is_err());
  }

  #[test]
  fn initial_registers() {
    assert_eq!(CRC32.initial_register(), 0xFFFF_FFFF);
    assert_eq!(CRC32_RFC1510.initial_register(), 0);
    assert_eq!(CRC24_RFC2440.initial_register(), 0x00CE_04B7);
  }

  #[test]
  fn crc24_register_mapping() {
    // Register after "123456789".
    let register = 0x0002_CF21;
    assert_eq!(CRC24_RFC2440.value(register), 0x0021_CF02);
    assert_eq!(CRC24_RFC2440.resume(0x0021_CF02), register);
    assert_eq!(CRC24_RFC2440.encode(register), [0x21, 0xCF, 0x02, 0x00]);
  }

  #[test]
  fn resume_inverts_value() {
    for d in [&CRC32, &CRC32_RFC1510, &CRC24_RFC2440] {
      for v in [0, 1, 0x00AB_CDEF, d.check] {
        let v = if d.width == 24 { v & 0x00FF_FFFF } else { v };
        assert_eq!(d.value(d.resume(v)), v, "{}", d.name);
      }
    }
  }

  #[test]
  fn encode_is_big_endian_value_for_crc32_family() {
    assert_eq!(CRC32.encode(!0xCBF4_3926), [0xCB, 0xF4, 0x39, 0x26]);
    assert_eq!(CRC32_RFC1510.encode(0x2DFD_2D88), [0x2D, 0xFD, 0x2D, 0x88]);
  }

  #[test]
  fn output_lengths() {
    assert_eq!(Algorithm::Crc32.output_len(), 4);
    assert_eq!(Algorithm::Crc32Rfc1510.output_len(), 4);
    assert_eq!(Algorithm::Crc24Rfc2440.output_len(), 3);
    for a in Algorithm::ALL {
      assert_eq!(a.descriptor().stored_len, 4);
    }
  }
}

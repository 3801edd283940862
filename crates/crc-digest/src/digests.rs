//! Typed CRC contexts.

use crate::variant::{CRC24_RFC2440, CRC32, CRC32_RFC1510};

define_crc_digest! {
  /// CRC-32 (ISO-HDLC).
  ///
  /// # Properties
  ///
  /// - **Polynomial**: 0x04C11DB7 (reflected: 0xEDB88320)
  /// - **Initial value**: 0xFFFFFFFF
  /// - **Final XOR**: 0xFFFFFFFF
  /// - **Reflect input/output**: Yes
  /// - **Output**: 4 bytes, big-endian
  ///
  /// # Examples
  ///
  /// ```rust
  /// use crc_digest::Crc32;
  ///
  /// let mut ctx = Crc32::new();
  /// ctx.update(b"12345");
  /// ctx.update(b"6789");
  /// assert_eq!(ctx.finalize().as_bytes(), &[0xCB, 0xF4, 0x39, 0x26]);
  /// assert_eq!(Crc32::checksum(b"123456789"), 0xCBF43926);
  /// ```
  pub struct Crc32 {
    descriptor: CRC32,
  }
}

define_crc_digest! {
  /// CRC-32 as used by RFC 1510 (Kerberos v5).
  ///
  /// Same polynomial and table as [`Crc32`], without pre- or
  /// post-conditioning.
  ///
  /// # Properties
  ///
  /// - **Polynomial**: 0x04C11DB7 (reflected: 0xEDB88320)
  /// - **Initial value**: 0x00000000
  /// - **Final XOR**: 0x00000000
  /// - **Output**: 4 bytes, big-endian
  ///
  /// ```rust
  /// use crc_digest::Crc32Rfc1510;
  ///
  /// assert_eq!(Crc32Rfc1510::checksum(b"123456789"), 0x2DFD2D88);
  /// ```
  pub struct Crc32Rfc1510 {
    descriptor: CRC32_RFC1510,
  }
}

define_crc_digest! {
  /// CRC-24 as used by RFC 2440 (OpenPGP ASCII armor).
  ///
  /// # Properties
  ///
  /// - **Polynomial**: 0x864CFB (normal)
  /// - **Initial value**: 0xB704CE
  /// - **Reflect input/output**: No
  /// - **Output**: 3 bytes, big-endian CRC (stored as a 4-byte little-endian
  ///   register with a zero pad byte)
  ///
  /// ```rust
  /// use crc_digest::Crc24Rfc2440;
  ///
  /// let digest = Crc24Rfc2440::digest(b"123456789");
  /// assert_eq!(digest.as_bytes(), &[0x21, 0xCF, 0x02]);
  /// assert_eq!(digest.stored(), [0x21, 0xCF, 0x02, 0x00]);
  /// ```
  pub struct Crc24Rfc2440 {
    descriptor: CRC24_RFC2440,
  }
}

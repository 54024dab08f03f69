//! Fixed 10-byte pub header, sentinel name, and the CRC-32 checksum.

use crate::number::{decode_number, encode_number_into, SHORT_MAX};

/// Size of the header preceding the first record.
pub const HEADER_SIZE: usize = 10;

/// Byte range holding the checksum.
pub const CHECKSUM_RANGE: std::ops::Range<usize> = 3..7;

/// Name of the record that closes a catalog.
pub const SENTINEL: &str = "eof";

/// True if `name` is the end-of-file sentinel (ASCII case-insensitive).
pub fn is_sentinel(name: &str) -> bool {
    name.eq_ignore_ascii_case(SENTINEL)
}

/// Parsed header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub magic: [u8; 3],
    /// Bytes 3-4 and 5-6 decoded as two 2-byte numbers.
    pub checksum: [u32; 2],
    pub count: u32,
    pub version: u8,
}

impl Header {
    /// Parse a header from the first 10 bytes of `buf`.
    pub fn parse(buf: &[u8]) -> Option<Self> {
        if buf.len() < HEADER_SIZE {
            return None;
        }
        let mut magic = [0u8; 3];
        magic.copy_from_slice(&buf[0..3]);
        Some(Header {
            magic,
            checksum: [decode_number(&buf[3..5]), decode_number(&buf[5..7])],
            count: decode_number(&buf[7..9]),
            version: buf[9],
        })
    }

    /// The checksum halves recombined into the value that was encoded.
    pub fn checksum_value(&self) -> u32 {
        self.checksum[0].wrapping_add(self.checksum[1].wrapping_mul(SHORT_MAX))
    }
}

/// Compute IEEE CRC-32.
pub fn crc32_ieee(data: &[u8]) -> u32 {
    let mut crc: u32 = 0xFFFF_FFFF;
    for &b in data {
        let mut x = (crc ^ (b as u32)) & 0xFF;
        for _ in 0..8 {
            let lsb = x & 1;
            x >>= 1;
            if lsb != 0 {
                x ^= 0xEDB88320;
            }
        }
        crc = (crc >> 8) ^ x;
    }
    crc ^ 0xFFFF_FFFF
}

/// Write the checksum of `buf` over its own checksum bytes.
///
/// The CRC covers the whole buffer as it stands, checksum bytes included,
/// so the caller must have written the placeholder first. The 4-byte
/// encoding wraps CRCs above `INT_MAX`.
pub(crate) fn patch_checksum(buf: &mut [u8]) {
    let crc = crc32_ieee(buf);
    encode_number_into(crc, &mut buf[CHECKSUM_RANGE]);
}

/// Recompute the checksum the writer would have produced for `buf`.
///
/// Decoding never calls this. Returns `None` if `buf` has no full header.
pub fn verify_checksum(buf: &[u8]) -> Option<bool> {
    if buf.len() < HEADER_SIZE {
        return None;
    }
    let mut copy = buf.to_vec();
    encode_number_into(0, &mut copy[CHECKSUM_RANGE]);
    patch_checksum(&mut copy);
    Some(copy[CHECKSUM_RANGE] == buf[CHECKSUM_RANGE])
}

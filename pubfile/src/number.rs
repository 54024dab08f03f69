//! Fixed-width base-253 numbers used by every header and payload field.
//!
//! Each stored byte holds one digit plus one, least significant digit first,
//! so an encoded number never contains `0x00`.

/// Exclusive upper bound of a 1-byte number.
pub const CHAR_MAX: u32 = 253;
/// Exclusive upper bound of a 2-byte number.
pub const SHORT_MAX: u32 = CHAR_MAX * CHAR_MAX;
/// Exclusive upper bound of a 3-byte number.
pub const THREE_MAX: u32 = CHAR_MAX * CHAR_MAX * CHAR_MAX;
/// Exclusive upper bound of a 4-byte number.
pub const INT_MAX: u32 = CHAR_MAX * CHAR_MAX * CHAR_MAX * CHAR_MAX;

/// Exclusive upper bound of a number stored in `width` bytes (1..=4).
pub fn limit(width: usize) -> u64 {
    (CHAR_MAX as u64).pow(width as u32)
}

/// Decode a little-endian base-253 number.
///
/// `254` reads as digit 0 and `0` reads as digit 253; both remaps happen
/// before the digit is taken, in that order.
pub fn decode_number(bytes: &[u8]) -> u32 {
    let mut result: u32 = 0;
    let mut multiplier: u32 = 1;
    for &raw in bytes {
        let mut b = raw;
        if b == 254 {
            b = 1;
        }
        if b == 0 {
            b = 254;
        }
        let digit = u32::from(b) - 1;
        result = result.wrapping_add(digit.wrapping_mul(multiplier));
        multiplier = multiplier.wrapping_mul(CHAR_MAX);
    }
    result
}

/// Encode `value` into `out`, one digit per byte.
///
/// Digits beyond `out.len()` are discarded, so values at or above
/// `limit(out.len())` wrap modulo that limit. Callers that must not wrap
/// check the limit first (see [`crate::writer::Overflow`]).
pub fn encode_number_into(mut value: u32, out: &mut [u8]) {
    for slot in out.iter_mut() {
        let digit = value % CHAR_MAX;
        let mut b = (digit + 1) as u8;
        if b == 0 {
            b = 254;
        }
        *slot = b;
        value /= CHAR_MAX;
    }
}

/// Encode `value` as `width` bytes.
pub fn encode_number(value: u32, width: usize) -> Vec<u8> {
    let mut out = vec![0u8; width];
    encode_number_into(value, &mut out);
    out
}

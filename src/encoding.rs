//! Binary encoding of dates.
//!
//! A date is stored as the zig-zag LEB128 varint of its day count: small
//! positive and negative values both take few bytes, and any `i64` fits in
//! [`MAX_VARINT_LEN`] bytes.

use crate::Date;

/// Maximum length in bytes of an encoded date.
pub const MAX_VARINT_LEN: usize = 10;

/// Error decoding a date from bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("encoded date truncated")]
    Truncated,
    #[error("encoded date overflows 64 bits")]
    Overflow,
    #[error("extra data after date")]
    TrailingData,
}

const fn zigzag(n: i64) -> u64 {
    ((n << 1) ^ (n >> 63)) as u64
}

const fn unzigzag(u: u64) -> i64 {
    ((u >> 1) as i64) ^ -((u & 1) as i64)
}

/// Decodes an unsigned varint from the front of `buf`, returning it and the
/// number of bytes read.
fn read_uvarint(buf: &[u8]) -> Result<(u64, usize), DecodeError> {
    let mut value = 0u64;
    let mut shift = 0;
    for (i, &b) in buf.iter().enumerate() {
        if i == MAX_VARINT_LEN {
            return Err(DecodeError::Overflow);
        }
        if b < 0x80 {
            // the tenth byte carries only the top bit
            if i == MAX_VARINT_LEN - 1 && b > 1 {
                return Err(DecodeError::Overflow);
            }
            return Ok((value | (u64::from(b) << shift), i + 1));
        }
        value |= u64::from(b & 0x7f) << shift;
        shift += 7;
    }
    Err(DecodeError::Truncated)
}

impl Date {
    /// Returns the binary encoding of the date.
    pub fn to_bytes(self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(MAX_VARINT_LEN);
        self.append_bytes(&mut buf);
        buf
    }

    /// Appends the binary encoding of the date to `buf`.
    pub fn append_bytes(self, buf: &mut Vec<u8>) {
        let mut u = zigzag(self.days());
        while u >= 0x80 {
            buf.push(u as u8 | 0x80);
            u >>= 7;
        }
        buf.push(u as u8);
    }

    /// Decodes a date from exactly the bytes of one encoding.
    ///
    /// # Errors
    /// Returns [`DecodeError`] if `buf` is empty or ends mid-varint, if the
    /// varint does not fit 64 bits, or if bytes follow it.
    pub fn from_bytes(buf: &[u8]) -> Result<Self, DecodeError> {
        let (u, n) = read_uvarint(buf)?;
        if n != buf.len() {
            return Err(DecodeError::TrailingData);
        }
        Ok(Self::from_days(unzigzag(u)))
    }
}

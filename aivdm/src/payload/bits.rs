use super::armor::{self, sextet};
use crate::{constants::MAX_FILL_BITS, DecodeError};

/// Read-only bit-addressed view over an armored payload.
///
/// No copy of the payload is made: every read decodes the 6-bit groups it
/// touches on the fly. Bit 0 is the most significant bit of the first
/// character. The trailing fill bits are not part of the stream.
#[derive(Debug, Clone, Copy)]
pub struct BitStream<'a> {
    payload: &'a [u8],
    len: usize,
}

impl<'a> BitStream<'a> {
    /// Validate the armoring and build the view.
    pub fn new(payload: &'a [u8], fill_bits: u8) -> Result<Self, DecodeError> {
        armor::validate(payload)?;
        let total = payload.len() * 6;
        if fill_bits > MAX_FILL_BITS || usize::from(fill_bits) > total {
            return Err(DecodeError::malformed(
                "fill bits out of range",
                &String::from_utf8_lossy(payload),
            ));
        }
        Ok(Self {
            payload,
            len: total - usize::from(fill_bits),
        })
    }

    /// Number of addressable bits
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if `length` bits starting at `offset` lie inside the stream.
    pub fn contains(&self, offset: usize, length: usize) -> bool {
        offset
            .checked_add(length)
            .is_some_and(|end| end <= self.len)
    }

    /// Read `length` bits at `offset` as an unsigned integer.
    ///
    /// Panics if `length` is more than 64.
    pub fn read_uint(&self, offset: usize, length: usize) -> Result<u64, DecodeError> {
        assert!(length <= 64, "cannot read {} bits into a u64", length);
        if !self.contains(offset, length) {
            return Err(DecodeError::Truncated {
                message_type: self.message_type().unwrap_or(0),
                field: "bits",
                offset,
                needed: length,
                available: self.len,
                header: None,
            });
        }
        let mut value = 0u64;
        for bit in offset..offset + length {
            let group = sextet(self.payload[bit / 6]);
            let b = (group >> (5 - bit % 6)) & 1;
            value = (value << 1) | u64::from(b);
        }
        Ok(value)
    }

    /// Read `length` bits at `offset` as two's complement, sign-extended
    /// from the top bit of the field.
    pub fn read_int(&self, offset: usize, length: usize) -> Result<i64, DecodeError> {
        let raw = self.read_uint(offset, length)?;
        Ok(sign_extend(raw, length))
    }

    pub fn read_bool(&self, offset: usize) -> Result<bool, DecodeError> {
        Ok(self.read_uint(offset, 1)? == 1)
    }

    /// The 6-bit message type at the start of the stream, if present
    pub fn message_type(&self) -> Option<u8> {
        if self.contains(0, 6) {
            let group = sextet(self.payload[0]);
            Some(group)
        } else {
            None
        }
    }
}

pub(crate) const fn sign_extend(raw: u64, length: usize) -> i64 {
    if length == 0 {
        return 0;
    }
    let shift = 64 - length as u32;
    ((raw << shift) as i64) >> shift
}

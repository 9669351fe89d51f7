use super::BitStream;
use crate::DecodeError;

/// Decode `chars` 6-bit characters starting at `offset`.
///
/// Values 0-31 map to `'@'..='_'` and 32-63 to `' '..='?'`. Trailing `'@'`
/// padding and spaces are removed.
pub fn decode_text(bits: &BitStream<'_>, offset: usize, chars: usize) -> Result<String, DecodeError> {
    let mut text = String::with_capacity(chars);
    for i in 0..chars {
        let value = bits.read_uint(offset + i * 6, 6)? as u8;
        text.push(sixbit_char(value));
    }
    let trimmed = text.trim_end_matches(['@', ' ']).len();
    text.truncate(trimmed);
    Ok(text)
}

const fn sixbit_char(value: u8) -> char {
    if value < 32 {
        (value + 64) as char
    } else {
        value as char
    }
}

use crate::DecodeError;

/// Map one payload character to its 6-bit value.
///
/// `'0'..='W'` carry 0-39 and `` '`'..='w' `` carry 40-63; anything else is
/// not part of the armoring alphabet.
pub const fn armor_value(ch: u8) -> Option<u8> {
    match ch {
        b'0'..=b'W' => Some(ch - b'0'),
        b'`'..=b'w' => Some(ch - b'8'),
        _ => None,
    }
}

/// Same mapping for input already checked by [`validate`].
pub(crate) const fn sextet(ch: u8) -> u8 {
    let value = ch.wrapping_sub(b'0');
    if value > 40 {
        value - 8
    } else {
        value
    }
}

/// Reject the whole payload on the first character outside the alphabet.
pub(crate) fn validate(payload: &[u8]) -> Result<(), DecodeError> {
    match payload.iter().position(|ch| armor_value(*ch).is_none()) {
        Some(position) => Err(DecodeError::InvalidArmor {
            character: char::from(payload[position]),
            position,
        }),
        None => Ok(()),
    }
}

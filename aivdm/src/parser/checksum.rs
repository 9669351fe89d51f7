use crate::{error::excerpt, DecodeError};

/// NMEA 0183 checksum calculator: XOR of every byte between the start
/// delimiter (`!` or `$`) and the `*`, supporting both streaming and
/// single-shot validation
#[derive(Default)]
pub(crate) struct NmeaChecksumCalc {
    ck: u8,
}

impl NmeaChecksumCalc {
    pub(crate) const fn new() -> Self {
        Self { ck: 0 }
    }

    /// Update checksum with new bytes
    pub(crate) const fn update(&mut self, bytes: &[u8]) {
        let mut i = 0;
        while i < bytes.len() {
            self.update_byte(bytes[i]);
            i += 1;
        }
    }

    /// Update checksum with a single byte
    pub(crate) const fn update_byte(&mut self, byte: u8) {
        self.ck ^= byte;
    }

    /// Get the current checksum result
    pub(crate) const fn result(self) -> u8 {
        self.ck
    }

    /// Validate against the checksum received on the wire
    pub(crate) fn validate_result(self, received: u8, sentence: &str) -> Result<(), DecodeError> {
        if self.is_valid(received) {
            Ok(())
        } else {
            Err(DecodeError::ChecksumMismatch {
                expect: received,
                got: self.result(),
                sentence: excerpt(sentence),
            })
        }
    }

    /// Single-shot validation of a sentence body (without delimiters)
    pub(crate) fn validate_body(body: &[u8], received: u8, sentence: &str) -> Result<(), DecodeError> {
        let mut calc = Self::new();
        calc.update(body);
        calc.validate_result(received, sentence)
    }

    const fn is_valid(&self, received: u8) -> bool {
        self.ck == received
    }
}

/// Parse the two hex digits after `*`, either case
pub(crate) fn parse_hex_checksum(digits: &[u8]) -> Option<u8> {
    if digits.len() != 2 {
        return None;
    }
    let hi = (digits[0] as char).to_digit(16)?;
    let lo = (digits[1] as char).to_digit(16)?;
    Some(((hi << 4) | lo) as u8)
}

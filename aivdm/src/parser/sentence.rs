use super::checksum::{parse_hex_checksum, NmeaChecksumCalc};
use crate::{
    constants::{
        MAX_FILL_BITS, MAX_FRAGMENTS, NMEA_ADDRESS_LEN, NMEA_CHECKSUM_CHAR,
        NMEA_ENCAPSULATION_CHAR, NMEA_SYNC_CHAR, TAG_BLOCK_CHAR,
    },
    DecodeError,
};

/// One framed `!xxVDM` / `!xxVDO` sentence, borrowing from the input line.
///
/// The checksum has already been verified when a `RawSentence` exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSentence<'a> {
    /// The sentence from the start delimiter to the checksum, without any
    /// TAG block or line terminator
    pub line: &'a str,
    /// Two-character talker ID, `AI` for a mobile station
    pub talker: &'a str,
    pub(crate) own_vessel: bool,
    pub fragment_count: u8,
    /// 1-based
    pub fragment_index: u8,
    pub sequence_id: Option<u8>,
    pub channel: Option<char>,
    pub payload: &'a str,
    pub fill_bits: u8,
    pub checksum: u8,
}

impl<'a> RawSentence<'a> {
    /// Frame one line of input.
    ///
    /// The checksum is verified before anything else is looked at, so a
    /// corrupted sentence is always reported as [`DecodeError::ChecksumMismatch`].
    pub fn parse(line: &'a str) -> Result<Self, DecodeError> {
        let line = strip_tag_block(line.trim_end_matches(['\r', '\n']))?;

        match line.as_bytes().first() {
            Some(&NMEA_ENCAPSULATION_CHAR) | Some(&NMEA_SYNC_CHAR) => {},
            _ => return Err(DecodeError::malformed("missing start delimiter", line)),
        }
        let star = line
            .rfind(char::from(NMEA_CHECKSUM_CHAR))
            .ok_or_else(|| DecodeError::malformed("missing checksum", line))?;
        let checksum = parse_hex_checksum(&line.as_bytes()[star + 1..])
            .ok_or_else(|| DecodeError::malformed("checksum is not two hex digits", line))?;
        let body = &line[1..star];
        NmeaChecksumCalc::validate_body(body.as_bytes(), checksum, line)?;

        let fields: Vec<&str> = body.split(',').collect();
        let [address, count, index, sequence_id, channel, payload, fill_bits] = fields[..] else {
            return Err(DecodeError::malformed("wrong field count", line));
        };

        if address.len() != NMEA_ADDRESS_LEN || !address.is_ascii() {
            return Err(DecodeError::malformed("bad address field", line));
        }
        let (talker, formatter) = address.split_at(2);
        let own_vessel = match formatter {
            "VDM" => false,
            "VDO" => true,
            _ => return Err(DecodeError::malformed("not a VDM/VDO sentence", line)),
        };

        let fragment_count = digit(count)
            .filter(|n| (1..=MAX_FRAGMENTS).contains(n))
            .ok_or_else(|| DecodeError::malformed("bad fragment count", line))?;
        let fragment_index = digit(index)
            .filter(|n| (1..=fragment_count).contains(n))
            .ok_or_else(|| DecodeError::malformed("bad fragment index", line))?;
        let sequence_id = match sequence_id {
            "" => None,
            id => Some(digit(id).ok_or_else(|| DecodeError::malformed("bad sequence id", line))?),
        };
        let channel = {
            let mut chars = channel.chars();
            match (chars.next(), chars.next()) {
                (None, _) => None,
                (Some(ch), None) if ch.is_ascii_alphanumeric() => Some(ch),
                _ => return Err(DecodeError::malformed("bad channel", line)),
            }
        };
        if payload.is_empty() {
            return Err(DecodeError::malformed("empty payload", line));
        }
        let fill_bits = digit(fill_bits)
            .filter(|n| *n <= MAX_FILL_BITS)
            .ok_or_else(|| DecodeError::malformed("bad fill bits", line))?;

        Ok(Self {
            line,
            talker,
            own_vessel,
            fragment_count,
            fragment_index,
            sequence_id,
            channel,
            payload,
            fill_bits,
            checksum,
        })
    }

    /// `true` for a message that fits one sentence and needs no reassembly
    pub fn is_single(&self) -> bool {
        self.fragment_count == 1
    }

    /// `true` for `VDO` sentences, reporting the receiving station itself
    pub fn own_vessel(&self) -> bool {
        self.own_vessel
    }
}

/// Drop a leading `\...\` TAG block.
fn strip_tag_block(line: &str) -> Result<&str, DecodeError> {
    let tag = char::from(TAG_BLOCK_CHAR);
    match line.strip_prefix(tag) {
        None => Ok(line),
        Some(rest) => match rest.find(tag) {
            Some(end) => Ok(&rest[end + 1..]),
            None => Err(DecodeError::malformed("unterminated TAG block", line)),
        },
    }
}

fn digit(field: &str) -> Option<u8> {
    match field.as_bytes() {
        [d @ b'0'..=b'9'] => Some(d - b'0'),
        _ => None,
    }
}

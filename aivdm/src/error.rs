use std::fmt;

use crate::{constants::SENTENCE_EXCERPT_LEN, messages::MessageHeader};

/// Coarse classification of a [`DecodeError`], used to pick a log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// The sentence itself is unusable (checksum, framing, lost fragments).
    Frame,
    /// The payload content is corrupt.
    Armor,
    /// Well-formed message of a kind this crate does not decode.
    Semantic,
}

/// Errors produced while framing sentences and decoding messages
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// The trailing `*hh` checksum does not match the XOR of the sentence body
    ChecksumMismatch {
        expect: u8,
        got: u8,
        sentence: String,
    },
    /// Wrong field count, bad delimiter or a field that does not parse
    Malformed {
        reason: &'static str,
        sentence: String,
    },
    /// A payload character outside the 6-bit armoring alphabet
    InvalidArmor { character: char, position: usize },
    /// The bitstream ended before `field` could be read
    Truncated {
        message_type: u8,
        field: &'static str,
        offset: usize,
        needed: usize,
        available: usize,
        /// Common fields decoded before the truncation point, if any
        header: Option<MessageHeader>,
    },
    /// A multi-sentence message did not fully arrive within the TTL
    IncompleteSequence {
        channel: Option<char>,
        sequence_id: Option<u8>,
        received: u8,
        expected: u8,
    },
    /// A message type without a decoder
    Unsupported(u8),
}

impl DecodeError {
    pub(crate) fn malformed(reason: &'static str, sentence: &str) -> Self {
        DecodeError::Malformed {
            reason,
            sentence: excerpt(sentence),
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            DecodeError::ChecksumMismatch { .. }
            | DecodeError::Malformed { .. }
            | DecodeError::IncompleteSequence { .. } => Severity::Frame,
            DecodeError::InvalidArmor { .. } | DecodeError::Truncated { .. } => Severity::Armor,
            DecodeError::Unsupported(_) => Severity::Semantic,
        }
    }

    /// Returns `true` for [`DecodeError::Unsupported`], which callers usually
    /// skip rather than report.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, DecodeError::Unsupported(_))
    }
}

/// Cut a sentence down to something reasonable to carry inside an error.
pub(crate) fn excerpt(sentence: &str) -> String {
    match sentence.char_indices().nth(SENTENCE_EXCERPT_LEN) {
        Some((idx, _)) => format!("{}...", &sentence[..idx]),
        None => sentence.to_string(),
    }
}

fn fmt_channel(channel: Option<char>) -> char {
    channel.unwrap_or('-')
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::ChecksumMismatch {
                expect,
                got,
                sentence,
            } => write!(
                f,
                "Not valid sentence checksum, expect {:02X}, got {:02X}: {}",
                expect, got, sentence
            ),
            DecodeError::Malformed { reason, sentence } => {
                write!(f, "Malformed sentence ({}): {}", reason, sentence)
            },
            DecodeError::InvalidArmor {
                character,
                position,
            } => write!(
                f,
                "Invalid armored character {:?} at payload position {}",
                character, position
            ),
            DecodeError::Truncated {
                message_type,
                field,
                offset,
                needed,
                available,
                ..
            } => write!(
                f,
                "Truncated message type {}: field {} needs bits {}..{}, payload has {}",
                message_type,
                field,
                offset,
                offset + needed,
                available
            ),
            DecodeError::IncompleteSequence {
                channel,
                sequence_id,
                received,
                expected,
            } => write!(
                f,
                "Incomplete sequence {} on channel {}: received {} of {} fragments",
                sequence_id.map_or_else(|| "-".to_string(), |id| id.to_string()),
                fmt_channel(*channel),
                received,
                expected
            ),
            DecodeError::Unsupported(message_type) => {
                write!(f, "Unsupported message type {}", message_type)
            },
        }
    }
}

impl std::error::Error for DecodeError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTimeError {
    NotAvailable,
    InvalidDate,
    InvalidTime,
}

impl fmt::Display for DateTimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateTimeError::NotAvailable => f.write_str("ETA component not available"),
            DateTimeError::InvalidDate => f.write_str("invalid date"),
            DateTimeError::InvalidTime => f.write_str("invalid time"),
        }
    }
}

impl std::error::Error for DateTimeError {}

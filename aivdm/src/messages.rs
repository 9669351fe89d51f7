//! Decoded AIS messages.
//!
//! Every supported message is a fixed table of [`FieldSpec`] entries read in
//! ITU-R M.1371 order. Each entry carries its own "not available" code, so
//! the bit layout and the sentinel check live side by side.

pub mod class_b;
pub mod lookup;
pub mod position_report;
pub mod static_voyage;
pub mod types;

pub use class_b::ClassBPositionReport;
pub use position_report::PositionReport;
pub use static_voyage::StaticVoyageData;
pub use types::*;

use crate::{constants::MESSAGE_TYPE_BITS, payload::BitStream, DecodeError};

const MESSAGE_TYPE: FieldSpec = FieldSpec::unsigned("message_type", 0, MESSAGE_TYPE_BITS);
const REPEAT_INDICATOR: FieldSpec = FieldSpec::unsigned("repeat_indicator", 6, 2);
const MMSI: FieldSpec = FieldSpec::unsigned("mmsi", 8, 30);

/// Fields every AIS message starts with
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageHeader {
    /// 0-63
    pub message_type: u8,
    /// How many times the message has been repeated, 0-3
    pub repeat_indicator: u8,
    /// Maritime Mobile Service Identity of the transmitting station
    pub mmsi: u32,
}

/// A decoded AIS message, one variant per supported message type
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum AisMessage {
    /// Types 1, 2 and 3
    PositionReport(PositionReport),
    /// Type 5
    StaticVoyageData(StaticVoyageData),
    /// Type 18
    ClassBPositionReport(ClassBPositionReport),
}

impl AisMessage {
    pub fn header(&self) -> &MessageHeader {
        match self {
            AisMessage::PositionReport(msg) => &msg.header,
            AisMessage::StaticVoyageData(msg) => &msg.header,
            AisMessage::ClassBPositionReport(msg) => &msg.header,
        }
    }

    pub fn message_type(&self) -> u8 {
        self.header().message_type
    }

    pub fn mmsi(&self) -> u32 {
        self.header().mmsi
    }

    /// Reported position, when the message carries one and both axes are available
    pub fn position(&self) -> Option<Position> {
        match self {
            AisMessage::PositionReport(msg) => msg.position(),
            AisMessage::ClassBPositionReport(msg) => msg.position(),
            AisMessage::StaticVoyageData(_) => None,
        }
    }
}

/// Route a bitstream to the decoder for its message type.
///
/// Types without a decoder come back as [`DecodeError::Unsupported`].
pub fn match_message(bits: &BitStream<'_>) -> Result<AisMessage, DecodeError> {
    let reader = FieldReader::new(bits);
    let message_type = reader.uint(&MESSAGE_TYPE)? as u8;
    match message_type {
        1..=3 => PositionReport::decode(reader).map(AisMessage::PositionReport),
        5 => StaticVoyageData::decode(reader).map(AisMessage::StaticVoyageData),
        18 => ClassBPositionReport::decode(reader).map(AisMessage::ClassBPositionReport),
        other => Err(DecodeError::Unsupported(other)),
    }
}

/// One entry of a message layout: where a field lives, how to interpret it
/// and which raw value means "not available".
#[derive(Debug, Clone, Copy)]
pub(crate) struct FieldSpec {
    pub(crate) name: &'static str,
    pub(crate) offset: usize,
    pub(crate) len: usize,
    pub(crate) signed: bool,
    pub(crate) divisor: f64,
    /// Raw (pre sign-extension, pre scaling) sentinel
    pub(crate) not_available: Option<u64>,
}

impl FieldSpec {
    pub(crate) const fn unsigned(name: &'static str, offset: usize, len: usize) -> Self {
        Self {
            name,
            offset,
            len,
            signed: false,
            divisor: 1.0,
            not_available: None,
        }
    }

    pub(crate) const fn signed(name: &'static str, offset: usize, len: usize) -> Self {
        Self {
            signed: true,
            ..Self::unsigned(name, offset, len)
        }
    }

    pub(crate) const fn divisor(self, divisor: f64) -> Self {
        Self { divisor, ..self }
    }

    pub(crate) const fn not_available(self, raw: u64) -> Self {
        Self {
            not_available: Some(raw),
            ..self
        }
    }
}

/// Reads [`FieldSpec`]s out of a bitstream and turns short payloads into
/// [`DecodeError::Truncated`] carrying whatever header was already decoded.
pub(crate) struct FieldReader<'a, 'b> {
    bits: &'b BitStream<'a>,
    header: Option<MessageHeader>,
}

impl<'a, 'b> FieldReader<'a, 'b> {
    pub(crate) fn new(bits: &'b BitStream<'a>) -> Self {
        Self { bits, header: None }
    }

    /// Decode type, repeat indicator and MMSI, remembering them for later errors.
    pub(crate) fn header(&mut self) -> Result<MessageHeader, DecodeError> {
        let header = MessageHeader {
            message_type: self.uint(&MESSAGE_TYPE)? as u8,
            repeat_indicator: self.uint(&REPEAT_INDICATOR)? as u8,
            mmsi: self.uint(&MMSI)? as u32,
        };
        self.header = Some(header);
        Ok(header)
    }

    fn check(&self, spec: &FieldSpec) -> Result<(), DecodeError> {
        if self.bits.contains(spec.offset, spec.len) {
            Ok(())
        } else {
            Err(DecodeError::Truncated {
                message_type: self.bits.message_type().unwrap_or(0),
                field: spec.name,
                offset: spec.offset,
                needed: spec.len,
                available: self.bits.len(),
                header: self.header,
            })
        }
    }

    fn raw(&self, spec: &FieldSpec) -> Result<u64, DecodeError> {
        self.check(spec)?;
        self.bits.read_uint(spec.offset, spec.len)
    }

    pub(crate) fn uint(&self, spec: &FieldSpec) -> Result<u64, DecodeError> {
        self.raw(spec)
    }

    pub(crate) fn flag(&self, spec: &FieldSpec) -> Result<bool, DecodeError> {
        Ok(self.raw(spec)? != 0)
    }

    /// Raw value with the sentinel mapped to `None`, sign-extended for signed fields.
    pub(crate) fn int_opt(&self, spec: &FieldSpec) -> Result<Option<i64>, DecodeError> {
        let raw = self.raw(spec)?;
        if spec.not_available == Some(raw) {
            return Ok(None);
        }
        let value = if spec.signed {
            crate::payload::bits::sign_extend(raw, spec.len)
        } else {
            raw as i64
        };
        Ok(Some(value))
    }

    /// Sentinel check first, then scaling.
    pub(crate) fn scaled(&self, spec: &FieldSpec) -> Result<Option<f64>, DecodeError> {
        Ok(self.int_opt(spec)?.map(|value| value as f64 / spec.divisor))
    }

    pub(crate) fn text(&self, spec: &FieldSpec) -> Result<String, DecodeError> {
        self.check(spec)?;
        crate::payload::decode_text(self.bits, spec.offset, spec.len / 6)
    }
}

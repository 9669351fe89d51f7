use super::{
    Dimensions, Eta, FieldReader, FieldSpec, MessageHeader, PositionFixType, ShipType,
};
use crate::DecodeError;

const AIS_VERSION: FieldSpec = FieldSpec::unsigned("ais_version", 38, 2);
const IMO_NUMBER: FieldSpec = FieldSpec::unsigned("imo_number", 40, 30).not_available(0);
const CALL_SIGN: FieldSpec = FieldSpec::unsigned("call_sign", 70, 42);
const VESSEL_NAME: FieldSpec = FieldSpec::unsigned("vessel_name", 112, 120);
const VESSEL_TYPE: FieldSpec = FieldSpec::unsigned("vessel_type", 232, 8);
const TO_BOW: FieldSpec = FieldSpec::unsigned("dimension_to_bow", 240, 9);
const TO_STERN: FieldSpec = FieldSpec::unsigned("dimension_to_stern", 249, 9);
const TO_PORT: FieldSpec = FieldSpec::unsigned("dimension_to_port", 258, 6);
const TO_STARBOARD: FieldSpec = FieldSpec::unsigned("dimension_to_starboard", 264, 6);
const EPFD: FieldSpec = FieldSpec::unsigned("epfd", 270, 4);
const ETA_MONTH: FieldSpec = FieldSpec::unsigned("eta_month", 274, 4);
const ETA_DAY: FieldSpec = FieldSpec::unsigned("eta_day", 278, 5);
const ETA_HOUR: FieldSpec = FieldSpec::unsigned("eta_hour", 283, 5);
const ETA_MINUTE: FieldSpec = FieldSpec::unsigned("eta_minute", 288, 6);
const DRAUGHT: FieldSpec = FieldSpec::unsigned("draught", 294, 8)
    .divisor(10.0)
    .not_available(0);
const DESTINATION: FieldSpec = FieldSpec::unsigned("destination", 302, 120);
const DTE: FieldSpec = FieldSpec::unsigned("dte", 422, 1);

/// Static and voyage related data (message type 5), always sent as two sentences
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct StaticVoyageData {
    pub header: MessageHeader,
    /// 0 means ITU-R M.1371-1, 1-3 are later editions
    pub ais_version: u8,
    pub imo_number: Option<u32>,
    pub call_sign: String,
    pub vessel_name: String,
    pub vessel_type: Option<ShipType>,
    pub dimensions: Dimensions,
    pub position_fix_type: Option<PositionFixType>,
    pub eta: Option<Eta>,
    /// Meters
    pub draught: Option<f64>,
    pub destination: String,
    /// Data terminal equipment ready
    pub dte_ready: bool,
}

impl StaticVoyageData {
    pub(crate) fn decode(mut reader: FieldReader<'_, '_>) -> Result<Self, DecodeError> {
        let header = reader.header()?;
        let ais_version = reader.uint(&AIS_VERSION)? as u8;
        let imo_number = reader.int_opt(&IMO_NUMBER)?.map(|imo| imo as u32);
        let call_sign = reader.text(&CALL_SIGN)?;
        let vessel_name = reader.text(&VESSEL_NAME)?;
        let vessel_type = ShipType::from_code(reader.uint(&VESSEL_TYPE)? as u8);
        let dimensions = Dimensions {
            to_bow: reader.uint(&TO_BOW)? as u16,
            to_stern: reader.uint(&TO_STERN)? as u16,
            to_port: reader.uint(&TO_PORT)? as u8,
            to_starboard: reader.uint(&TO_STARBOARD)? as u8,
        };
        let position_fix_type = PositionFixType::from_code(reader.uint(&EPFD)? as u8);
        let eta = Eta::from_raw(
            reader.uint(&ETA_MONTH)? as u8,
            reader.uint(&ETA_DAY)? as u8,
            reader.uint(&ETA_HOUR)? as u8,
            reader.uint(&ETA_MINUTE)? as u8,
        );
        let draught = reader.scaled(&DRAUGHT)?;
        let destination = reader.text(&DESTINATION)?;
        // 0 = ready
        let dte_ready = !reader.flag(&DTE)?;

        Ok(Self {
            header,
            ais_version,
            imo_number,
            call_sign,
            vessel_name,
            vessel_type,
            dimensions,
            position_fix_type,
            eta,
            draught,
            destination,
            dte_ready,
        })
    }
}

use super::{
    position_report::{
        course, heading, latitude, longitude, COORDINATE_DIVISOR, COURSE_NOT_AVAILABLE,
        HEADING_NOT_AVAILABLE, LATITUDE_NOT_AVAILABLE, LONGITUDE_NOT_AVAILABLE,
        SPEED_NOT_AVAILABLE,
    },
    ClassBFlags, FieldReader, FieldSpec, MessageHeader, Position, TimeStamp,
};
use crate::DecodeError;

const SPEED_OVER_GROUND: FieldSpec = FieldSpec::unsigned("speed_over_ground", 46, 10)
    .divisor(10.0)
    .not_available(SPEED_NOT_AVAILABLE);
const POSITION_ACCURACY: FieldSpec = FieldSpec::unsigned("position_accuracy", 56, 1);
const LONGITUDE: FieldSpec = FieldSpec::signed("longitude", 57, 28)
    .divisor(COORDINATE_DIVISOR)
    .not_available(LONGITUDE_NOT_AVAILABLE);
const LATITUDE: FieldSpec = FieldSpec::signed("latitude", 85, 27)
    .divisor(COORDINATE_DIVISOR)
    .not_available(LATITUDE_NOT_AVAILABLE);
const COURSE_OVER_GROUND: FieldSpec = FieldSpec::unsigned("course_over_ground", 112, 12)
    .divisor(10.0)
    .not_available(COURSE_NOT_AVAILABLE);
const TRUE_HEADING: FieldSpec =
    FieldSpec::unsigned("true_heading", 124, 9).not_available(HEADING_NOT_AVAILABLE);
const TIMESTAMP: FieldSpec = FieldSpec::unsigned("timestamp", 133, 6);
const FLAGS: FieldSpec = FieldSpec::unsigned("flags", 141, 6);
const RAIM: FieldSpec = FieldSpec::unsigned("raim", 147, 1);

/// Standard Class B CS position report (message type 18)
///
/// The trailing 20-bit radio status is not decoded, so payloads that stop
/// after the RAIM flag are accepted.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ClassBPositionReport {
    pub header: MessageHeader,
    pub speed_over_ground: Option<f64>,
    pub position_accuracy: bool,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub course_over_ground: Option<f64>,
    pub true_heading: Option<u16>,
    pub timestamp: TimeStamp,
    pub flags: ClassBFlags,
    pub raim_flag: bool,
}

impl ClassBPositionReport {
    pub(crate) fn decode(mut reader: FieldReader<'_, '_>) -> Result<Self, DecodeError> {
        let header = reader.header()?;
        Ok(Self {
            header,
            speed_over_ground: reader.scaled(&SPEED_OVER_GROUND)?,
            position_accuracy: reader.flag(&POSITION_ACCURACY)?,
            longitude: longitude(reader.scaled(&LONGITUDE)?),
            latitude: latitude(reader.scaled(&LATITUDE)?),
            course_over_ground: course(reader.scaled(&COURSE_OVER_GROUND)?),
            true_heading: heading(reader.int_opt(&TRUE_HEADING)?),
            timestamp: TimeStamp::from_code(reader.uint(&TIMESTAMP)? as u8),
            flags: ClassBFlags::from_bits_truncate(reader.uint(&FLAGS)? as u8),
            raim_flag: reader.flag(&RAIM)?,
        })
    }

    pub fn position(&self) -> Option<Position> {
        Some(Position {
            lon: self.longitude?,
            lat: self.latitude?,
        })
    }

    /// Carrier-sense (`true`) or SOTDMA (`false`) unit
    pub fn is_cs_unit(&self) -> bool {
        self.flags.contains(ClassBFlags::CS_UNIT)
    }
}

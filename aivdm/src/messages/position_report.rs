use super::{
    FieldReader, FieldSpec, ManeuverIndicator, MessageHeader, NavigationStatus, Position,
    RateOfTurn, TimeStamp,
};
use crate::DecodeError;

/// Coordinates are in 1/10000 minute
pub(crate) const COORDINATE_DIVISOR: f64 = 600_000.0;
/// 181 degrees
pub(crate) const LONGITUDE_NOT_AVAILABLE: u64 = 0x679_1AC0;
/// 91 degrees
pub(crate) const LATITUDE_NOT_AVAILABLE: u64 = 0x341_2140;
pub(crate) const SPEED_NOT_AVAILABLE: u64 = 1023;
pub(crate) const COURSE_NOT_AVAILABLE: u64 = 3600;
pub(crate) const HEADING_NOT_AVAILABLE: u64 = 511;
const RATE_OF_TURN_NOT_AVAILABLE: u64 = 0x80;

const NAVIGATION_STATUS: FieldSpec = FieldSpec::unsigned("navigation_status", 38, 4);
const RATE_OF_TURN: FieldSpec =
    FieldSpec::signed("rate_of_turn", 42, 8).not_available(RATE_OF_TURN_NOT_AVAILABLE);
const SPEED_OVER_GROUND: FieldSpec = FieldSpec::unsigned("speed_over_ground", 50, 10)
    .divisor(10.0)
    .not_available(SPEED_NOT_AVAILABLE);
const POSITION_ACCURACY: FieldSpec = FieldSpec::unsigned("position_accuracy", 60, 1);
const LONGITUDE: FieldSpec = FieldSpec::signed("longitude", 61, 28)
    .divisor(COORDINATE_DIVISOR)
    .not_available(LONGITUDE_NOT_AVAILABLE);
const LATITUDE: FieldSpec = FieldSpec::signed("latitude", 89, 27)
    .divisor(COORDINATE_DIVISOR)
    .not_available(LATITUDE_NOT_AVAILABLE);
const COURSE_OVER_GROUND: FieldSpec = FieldSpec::unsigned("course_over_ground", 116, 12)
    .divisor(10.0)
    .not_available(COURSE_NOT_AVAILABLE);
const TRUE_HEADING: FieldSpec =
    FieldSpec::unsigned("true_heading", 128, 9).not_available(HEADING_NOT_AVAILABLE);
const TIMESTAMP: FieldSpec = FieldSpec::unsigned("timestamp", 137, 6);
const MANEUVER_INDICATOR: FieldSpec = FieldSpec::unsigned("maneuver_indicator", 143, 2);
const RAIM: FieldSpec = FieldSpec::unsigned("raim", 148, 1);

/// Class A position report (message types 1, 2 and 3)
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct PositionReport {
    pub header: MessageHeader,
    pub navigation_status: NavigationStatus,
    pub rate_of_turn: Option<RateOfTurn>,
    /// Knots, 102.2 means 102.2 knots or more
    pub speed_over_ground: Option<f64>,
    /// `true` for DGPS-quality fixes (better than 10 m)
    pub position_accuracy: bool,
    /// Degrees, east positive
    pub longitude: Option<f64>,
    /// Degrees, north positive
    pub latitude: Option<f64>,
    /// Degrees relative to true north
    pub course_over_ground: Option<f64>,
    /// Degrees, 0-359
    pub true_heading: Option<u16>,
    pub timestamp: TimeStamp,
    pub maneuver_indicator: Option<ManeuverIndicator>,
    pub raim_flag: bool,
}

impl PositionReport {
    pub(crate) fn decode(mut reader: FieldReader<'_, '_>) -> Result<Self, DecodeError> {
        let header = reader.header()?;
        Ok(Self {
            header,
            navigation_status: NavigationStatus::from_bits(
                reader.uint(&NAVIGATION_STATUS)? as u8,
            ),
            rate_of_turn: reader
                .int_opt(&RATE_OF_TURN)?
                .map(|raw| RateOfTurn::from_raw(raw as i8)),
            speed_over_ground: reader.scaled(&SPEED_OVER_GROUND)?,
            position_accuracy: reader.flag(&POSITION_ACCURACY)?,
            longitude: longitude(reader.scaled(&LONGITUDE)?),
            latitude: latitude(reader.scaled(&LATITUDE)?),
            course_over_ground: course(reader.scaled(&COURSE_OVER_GROUND)?),
            true_heading: heading(reader.int_opt(&TRUE_HEADING)?),
            timestamp: TimeStamp::from_code(reader.uint(&TIMESTAMP)? as u8),
            maneuver_indicator: ManeuverIndicator::from_code(
                reader.uint(&MANEUVER_INDICATOR)? as u8,
            ),
            raim_flag: reader.flag(&RAIM)?,
        })
    }

    pub fn position(&self) -> Option<Position> {
        Some(Position {
            lon: self.longitude?,
            lat: self.latitude?,
        })
    }
}

// Values that are representable but physically impossible read as "not available".

pub(crate) fn longitude(value: Option<f64>) -> Option<f64> {
    value.filter(|lon| (-180.0..=180.0).contains(lon))
}

pub(crate) fn latitude(value: Option<f64>) -> Option<f64> {
    value.filter(|lat| (-90.0..=90.0).contains(lat))
}

pub(crate) fn course(value: Option<f64>) -> Option<f64> {
    value.filter(|cog| (0.0..360.0).contains(cog))
}

pub(crate) fn heading(value: Option<i64>) -> Option<u16> {
    value.filter(|hdg| (0..360).contains(hdg)).map(|hdg| hdg as u16)
}

use bitflags::bitflags;
use chrono::prelude::*;

use super::lookup;
use crate::error::DateTimeError;

/// Represents a world position, can be constructed from position reports of either class.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    /// Longitude in degrees, east positive
    pub lon: f64,

    /// Latitude in degrees, north positive
    pub lat: f64,
}

/// Navigational status of a Class A station (4 bits)
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationStatus {
    UnderWayUsingEngine = 0,
    AtAnchor = 1,
    NotUnderCommand = 2,
    RestrictedManoeuverability = 3,
    ConstrainedByDraught = 4,
    Moored = 5,
    Aground = 6,
    EngagedInFishing = 7,
    UnderWaySailing = 8,
    ReservedHsc = 9,
    ReservedWig = 10,
    PowerDrivenTowingAstern = 11,
    PowerDrivenPushingAhead = 12,
    Reserved = 13,
    AisSartActive = 14,
    NotDefined = 15,
}

impl NavigationStatus {
    /// Only the low 4 bits are significant.
    pub const fn from_bits(code: u8) -> Self {
        match code & 0x0f {
            0 => Self::UnderWayUsingEngine,
            1 => Self::AtAnchor,
            2 => Self::NotUnderCommand,
            3 => Self::RestrictedManoeuverability,
            4 => Self::ConstrainedByDraught,
            5 => Self::Moored,
            6 => Self::Aground,
            7 => Self::EngagedInFishing,
            8 => Self::UnderWaySailing,
            9 => Self::ReservedHsc,
            10 => Self::ReservedWig,
            11 => Self::PowerDrivenTowingAstern,
            12 => Self::PowerDrivenPushingAhead,
            13 => Self::Reserved,
            14 => Self::AisSartActive,
            _ => Self::NotDefined,
        }
    }

    pub const fn code(self) -> u8 {
        self as u8
    }

    pub fn description(self) -> &'static str {
        lookup::NAVIGATION_STATUS[self as usize]
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManeuverIndicator {
    NoSpecialManeuver,
    SpecialManeuver,
}

impl ManeuverIndicator {
    /// 0 is "not available", 3 is not defined.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::NoSpecialManeuver),
            2 => Some(Self::SpecialManeuver),
            _ => None,
        }
    }
}

/// UTC second of the report, or why there is none
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeStamp {
    Second(u8),
    NotAvailable,
    ManualInput,
    DeadReckoning,
    Inoperative,
}

impl TimeStamp {
    pub const fn from_code(code: u8) -> Self {
        match code {
            0..=59 => Self::Second(code),
            60 => Self::NotAvailable,
            61 => Self::ManualInput,
            62 => Self::DeadReckoning,
            _ => Self::Inoperative,
        }
    }

    pub const fn seconds(self) -> Option<u8> {
        match self {
            Self::Second(s) => Some(s),
            _ => None,
        }
    }
}

/// Rate of turn as reported by a Class A station
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RateOfTurn {
    /// Degrees per minute from a turn indicator, positive to starboard
    Indicated(f64),
    /// More than 5 degrees per 30 s to starboard, no turn indicator
    TurningRight,
    /// More than 5 degrees per 30 s to port, no turn indicator
    TurningLeft,
}

impl RateOfTurn {
    /// `ROT_AIS = 4.733 * sqrt(ROT)`, the raw -128 sentinel is handled by the caller.
    pub fn from_raw(raw: i8) -> Self {
        match raw {
            127 => Self::TurningRight,
            -127 => Self::TurningLeft,
            _ => {
                let rate = (f64::from(raw) / 4.733).powi(2);
                Self::Indicated(if raw < 0 { -rate } else { rate })
            },
        }
    }

    pub fn degrees_per_minute(self) -> Option<f64> {
        match self {
            Self::Indicated(rate) => Some(rate),
            _ => None,
        }
    }
}

/// Electronic position fixing device
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PositionFixType {
    Gps,
    Glonass,
    CombinedGpsGlonass,
    LoranC,
    Chayka,
    IntegratedNavigationSystem,
    Surveyed,
    Galileo,
    InternalGnss,
    Reserved(u8),
}

impl PositionFixType {
    /// 0 means undefined.
    pub const fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0 => return None,
            1 => Self::Gps,
            2 => Self::Glonass,
            3 => Self::CombinedGpsGlonass,
            4 => Self::LoranC,
            5 => Self::Chayka,
            6 => Self::IntegratedNavigationSystem,
            7 => Self::Surveyed,
            8 => Self::Galileo,
            15 => Self::InternalGnss,
            other => Self::Reserved(other),
        })
    }

    pub const fn code(self) -> u8 {
        match self {
            Self::Gps => 1,
            Self::Glonass => 2,
            Self::CombinedGpsGlonass => 3,
            Self::LoranC => 4,
            Self::Chayka => 5,
            Self::IntegratedNavigationSystem => 6,
            Self::Surveyed => 7,
            Self::Galileo => 8,
            Self::InternalGnss => 15,
            Self::Reserved(code) => code,
        }
    }
}

/// Type of ship and cargo, codes 1-255 (0 is "not available")
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShipType(pub u8);

impl ShipType {
    pub const fn from_code(code: u8) -> Option<Self> {
        if code == 0 {
            None
        } else {
            Some(Self(code))
        }
    }

    pub const fn code(self) -> u8 {
        self.0
    }

    pub fn name(self) -> std::borrow::Cow<'static, str> {
        lookup::ship_type_name(self.0)
    }

    pub const fn is_passenger(self) -> bool {
        matches!(self.0, 60..=69)
    }

    pub const fn is_cargo(self) -> bool {
        matches!(self.0, 70..=79)
    }

    pub const fn is_tanker(self) -> bool {
        matches!(self.0, 80..=89)
    }

    /// Hazard category A-D carried in the second digit of the 2x, 4x and 6x-8x ranges
    pub const fn hazard_category(self) -> Option<char> {
        match self.0 {
            20..=29 | 40..=49 | 60..=89 => match self.0 % 10 {
                1 => Some('A'),
                2 => Some('B'),
                3 => Some('C'),
                4 => Some('D'),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Distances from the reference point of the reported position, in meters
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    /// 511 means 511 m or more
    pub to_bow: u16,
    /// 511 means 511 m or more
    pub to_stern: u16,
    /// 63 means 63 m or more
    pub to_port: u8,
    /// 63 means 63 m or more
    pub to_starboard: u8,
}

impl Dimensions {
    pub fn length(&self) -> Option<u16> {
        match self.to_bow + self.to_stern {
            0 => None,
            length => Some(length),
        }
    }

    pub fn beam(&self) -> Option<u16> {
        match u16::from(self.to_port) + u16::from(self.to_starboard) {
            0 => None,
            beam => Some(beam),
        }
    }
}

/// Estimated time of arrival, UTC, without a year
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Eta {
    pub month: Option<u8>,
    pub day: Option<u8>,
    pub hour: Option<u8>,
    pub minute: Option<u8>,
}

impl Eta {
    /// Interpret the raw 4/5/5/6 bit fields.
    ///
    /// Returns `None` when nothing is available, including the all-zero
    /// pattern some transmitters send instead of the proper defaults.
    pub fn from_raw(month: u8, day: u8, hour: u8, minute: u8) -> Option<Self> {
        if (month, day, hour, minute) == (0, 0, 0, 0) {
            return None;
        }
        let eta = Self {
            month: (1..=12).contains(&month).then_some(month),
            day: (1..=31).contains(&day).then_some(day),
            hour: (hour < 24).then_some(hour),
            minute: (minute < 60).then_some(minute),
        };
        if eta == Self::NOT_AVAILABLE {
            None
        } else {
            Some(eta)
        }
    }

    const NOT_AVAILABLE: Self = Self {
        month: None,
        day: None,
        hour: None,
        minute: None,
    };

    /// Place the ETA in `year`.
    pub fn to_datetime(&self, year: i32) -> Result<DateTime<Utc>, DateTimeError> {
        let (Some(month), Some(day), Some(hour), Some(minute)) =
            (self.month, self.day, self.hour, self.minute)
        else {
            return Err(DateTimeError::NotAvailable);
        };
        let date = NaiveDate::from_ymd_opt(year, u32::from(month), u32::from(day))
            .ok_or(DateTimeError::InvalidDate)?;
        let time = NaiveTime::from_hms_opt(u32::from(hour), u32::from(minute), 0)
            .ok_or(DateTimeError::InvalidTime)?;
        Ok(DateTime::from_naive_utc_and_offset(
            NaiveDateTime::new(date, time),
            Utc,
        ))
    }
}

bitflags! {
    /// Class B capability and mode flags (type 18, bits 141-146)
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClassBFlags: u8 {
        /// Carrier-sense unit (set) rather than SOTDMA
        const CS_UNIT = 0b10_0000;
        /// Equipped with an integrated display for messages 12 and 14
        const DISPLAY = 0b01_0000;
        /// Equipped with DSC
        const DSC = 0b00_1000;
        /// Can use the whole marine band
        const BAND = 0b00_0100;
        /// Accepts channel management via message 22
        const MESSAGE_22 = 0b00_0010;
        /// Station is in assigned mode
        const ASSIGNED = 0b00_0001;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_status_codes_round_trip() {
        for code in 0..16 {
            assert_eq!(NavigationStatus::from_bits(code).code(), code);
        }
        assert_eq!(
            NavigationStatus::from_bits(5).description(),
            "Moored"
        );
    }

    #[test]
    fn rate_of_turn() {
        assert_eq!(RateOfTurn::from_raw(0), RateOfTurn::Indicated(0.0));
        assert_eq!(RateOfTurn::from_raw(127), RateOfTurn::TurningRight);
        assert_eq!(RateOfTurn::from_raw(-127), RateOfTurn::TurningLeft);
        let right = RateOfTurn::from_raw(10).degrees_per_minute().unwrap();
        let left = RateOfTurn::from_raw(-10).degrees_per_minute().unwrap();
        assert!((right - 4.464).abs() < 1e-3);
        assert_eq!(left, -right);
        // 126 is the largest indicated rate, about 708 deg/min
        let max = RateOfTurn::from_raw(126).degrees_per_minute().unwrap();
        assert!((max - 708.7).abs() < 0.1);
    }

    #[test]
    fn time_stamp() {
        assert_eq!(TimeStamp::from_code(0).seconds(), Some(0));
        assert_eq!(TimeStamp::from_code(59).seconds(), Some(59));
        assert_eq!(TimeStamp::from_code(60), TimeStamp::NotAvailable);
        assert_eq!(TimeStamp::from_code(61), TimeStamp::ManualInput);
        assert_eq!(TimeStamp::from_code(62), TimeStamp::DeadReckoning);
        assert_eq!(TimeStamp::from_code(63), TimeStamp::Inoperative);
        assert_eq!(TimeStamp::from_code(63).seconds(), None);
    }

    #[test]
    fn maneuver_indicator() {
        assert_eq!(ManeuverIndicator::from_code(0), None);
        assert_eq!(
            ManeuverIndicator::from_code(2),
            Some(ManeuverIndicator::SpecialManeuver)
        );
        assert_eq!(ManeuverIndicator::from_code(3), None);
    }

    #[test]
    fn position_fix_type() {
        assert_eq!(PositionFixType::from_code(0), None);
        assert_eq!(PositionFixType::from_code(1), Some(PositionFixType::Gps));
        assert_eq!(
            PositionFixType::from_code(11),
            Some(PositionFixType::Reserved(11))
        );
        for code in 1..16 {
            assert_eq!(PositionFixType::from_code(code).unwrap().code(), code);
        }
    }

    #[test]
    fn ship_type_categories() {
        assert_eq!(ShipType::from_code(0), None);
        let tanker = ShipType(82);
        assert!(tanker.is_tanker());
        assert_eq!(tanker.hazard_category(), Some('B'));
        assert_eq!(ShipType(70).hazard_category(), None);
        assert_eq!(ShipType(31).hazard_category(), None);
        assert!(ShipType(60).is_passenger());
        assert!(ShipType(79).is_cargo());
    }

    #[test]
    fn dimensions() {
        let dims = Dimensions {
            to_bow: 225,
            to_stern: 70,
            to_port: 1,
            to_starboard: 31,
        };
        assert_eq!(dims.length(), Some(295));
        assert_eq!(dims.beam(), Some(32));
        assert_eq!(Dimensions::default().length(), None);
        assert_eq!(Dimensions::default().beam(), None);
    }

    #[test]
    fn eta_not_available() {
        assert_eq!(Eta::from_raw(0, 0, 0, 0), None);
        assert_eq!(Eta::from_raw(0, 0, 24, 60), None);
        let partial = Eta::from_raw(5, 15, 24, 60).unwrap();
        assert_eq!(partial.hour, None);
        assert_eq!(partial.to_datetime(2024), Err(DateTimeError::NotAvailable));
    }

    #[test]
    fn eta_to_datetime() {
        let eta = Eta::from_raw(5, 15, 14, 0).unwrap();
        let dt = eta.to_datetime(2024).unwrap();
        assert_eq!(dt.month(), 5);
        assert_eq!(dt.day(), 15);
        assert_eq!(dt.hour(), 14);
        assert_eq!(dt.minute(), 0);

        let feb30 = Eta::from_raw(2, 30, 0, 0).unwrap();
        assert_eq!(feb30.to_datetime(2024), Err(DateTimeError::InvalidDate));
    }

    #[test]
    fn class_b_flags_from_bits() {
        let flags = ClassBFlags::from_bits_truncate(0b101110);
        assert!(flags.contains(ClassBFlags::CS_UNIT));
        assert!(!flags.contains(ClassBFlags::DISPLAY));
        assert!(flags.contains(ClassBFlags::DSC | ClassBFlags::BAND | ClassBFlags::MESSAGE_22));
        assert!(!flags.contains(ClassBFlags::ASSIGNED));
    }
}

//! Human-readable names for coded fields.
//!
//! Codes without a defined meaning come back as `"Unknown (<code>)"`.

use std::borrow::Cow;

pub(crate) static NAVIGATION_STATUS: [&str; 16] = [
    "Under way using engine",
    "At anchor",
    "Not under command",
    "Restricted manoeuverability",
    "Constrained by her draught",
    "Moored",
    "Aground",
    "Engaged in fishing",
    "Under way sailing",
    "Reserved for HSC",
    "Reserved for WIG",
    "Power-driven vessel towing astern",
    "Power-driven vessel pushing ahead or towing alongside",
    "Reserved",
    "AIS-SART is active",
    "Not defined",
];

static POSITION_FIX_TYPE: [&str; 9] = [
    "Undefined",
    "GPS",
    "GLONASS",
    "Combined GPS/GLONASS",
    "Loran-C",
    "Chayka",
    "Integrated navigation system",
    "Surveyed",
    "Galileo",
];

fn unknown(code: u8) -> Cow<'static, str> {
    Cow::Owned(format!("Unknown ({})", code))
}

pub fn navigation_status_name(code: u8) -> Cow<'static, str> {
    match NAVIGATION_STATUS.get(usize::from(code)) {
        Some(name) => Cow::Borrowed(*name),
        None => unknown(code),
    }
}

/// Name of an EPFD code (type 5 and 19 `epfd` field)
pub fn position_fix_type_name(code: u8) -> Cow<'static, str> {
    match code {
        15 => Cow::Borrowed("Internal GNSS"),
        _ => match POSITION_FIX_TYPE.get(usize::from(code)) {
            Some(name) => Cow::Borrowed(*name),
            None => unknown(code),
        },
    }
}

/// Name of a ship and cargo type code.
///
/// The second digit of the 20-29, 40-49 and 60-89 ranges only selects a
/// hazard category, so those codes share their range's name.
pub fn ship_type_name(code: u8) -> Cow<'static, str> {
    let name = match code {
        0 => "Not available",
        20..=29 => "Wing in ground (WIG)",
        30 => "Fishing",
        31 => "Towing",
        32 => "Towing: length exceeds 200m or breadth exceeds 25m",
        33 => "Dredging or underwater ops",
        34 => "Diving ops",
        35 => "Military ops",
        36 => "Sailing",
        37 => "Pleasure Craft",
        40..=49 => "High speed craft (HSC)",
        50 => "Pilot Vessel",
        51 => "Search and Rescue vessel",
        52 => "Tug",
        53 => "Port Tender",
        54 => "Anti-pollution equipment",
        55 => "Law Enforcement",
        56 | 57 => "Spare - Local Vessel",
        58 => "Medical Transport",
        59 => "Noncombatant ship according to RR Resolution No. 18",
        60..=69 => "Passenger",
        70..=79 => "Cargo",
        80..=89 => "Tanker",
        90..=99 => "Other Type",
        1..=19 | 38 | 39 => "Reserved",
        _ => return unknown(code),
    };
    Cow::Borrowed(name)
}

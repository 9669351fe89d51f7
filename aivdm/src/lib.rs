//! # aivdm
//!
//! Decoder for AIS (Automatic Identification System) messages carried in
//! NMEA 0183 `!AIVDM` / `!AIVDO` sentences, producing typed vessel position
//! and identity records.
//!
//! Supported messages are the Class A position reports (types 1, 2 and 3),
//! static and voyage related data (type 5) and the standard Class B position
//! report (type 18). Other message types are recognized and reported as
//! [`DecodeError::Unsupported`].
//!
//! Decoding Sentences
//! ==================
//!
//! A [`Decoder`] takes one sentence at a time. Multi-sentence messages are
//! collected internally and returned once their last fragment arrives:
//! ```
//! use aivdm::{AisMessage, Decoder};
//!
//! let decoder = Decoder::new();
//! let msg = decoder
//!     .decode("!AIVDM,1,1,,A,15RTgt0PAso;90TKcjM8h6g208CQ,0*4A")
//!     .unwrap()
//!     .unwrap();
//! match msg {
//!     AisMessage::PositionReport(report) => {
//!         assert_eq!(report.header.mmsi, 371798000);
//!         assert_eq!(report.speed_over_ground, Some(12.3));
//!     },
//!     _ => unreachable!(),
//! }
//!
//! // First half of a type 5 message: nothing to return yet
//! let first = "!AIVDM,2,1,1,A,55?MbV02;H;s<HtKR20EHE:0@T4@Dn2222222216L961O5Gf0NSQEp6ClRp8,0*1C";
//! assert!(decoder.decode(first).unwrap().is_none());
//! let msg = decoder.decode("!AIVDM,2,2,1,A,88888888880,2*25").unwrap().unwrap();
//! assert_eq!(msg.message_type(), 5);
//! ```
//!
//! Fields whose raw value is the "not available" code are `None`, never the
//! code itself.
//!
//! Parsing Streams
//! ===============
//!
//! Raw bytes from a serial port or a network feed go through a [`Parser`].
//! `consume()` copies the data into an internal buffer and returns an
//! iterator over the messages completed by it. For example:
//! ```
//! use aivdm::Parser;
//!
//! let mut parser = Parser::default();
//! let my_raw_data = b"!AIVDM,1,1,,B,B5NLCa000>fdwUlSKF2awoUkP06,0*4D\r\n"; // From your feed
//! for result in parser.consume(my_raw_data) {
//!     match result {
//!         Ok(msg) => {
//!             // We've received an AisMessage, we can handle it
//!             assert_eq!(msg.mmsi(), 367465380);
//!         },
//!         Err(err) if err.is_unsupported() => {
//!             // A message type without a decoder
//!         },
//!         Err(_) => {
//!             // Received a corrupt sentence
//!         },
//!     }
//! }
//! ```
//!
//! Logging
//! =======
//!
//! Dropped sentences and evicted sequences are logged through the [`log`]
//! facade. No logger is installed by this crate.
//!
//! Features
//! ========
//!
//! - `serde`: `Serialize` / `Deserialize` for all message types.

mod constants;
mod error;
pub mod messages;
mod parser;
pub mod payload;

pub use crate::{
    constants::{DEFAULT_REASSEMBLY_TTL_SECS, MAX_LINE_LEN},
    error::{DateTimeError, DecodeError, Severity},
    messages::{
        lookup::{navigation_status_name, position_fix_type_name, ship_type_name},
        match_message, AisMessage, ClassBFlags, ClassBPositionReport, Dimensions, Eta,
        ManeuverIndicator, MessageHeader, NavigationStatus, Position, PositionFixType,
        PositionReport, RateOfTurn, ShipType, StaticVoyageData, TimeStamp,
    },
    parser::{
        decode_payload, ArmoredPayload, Clock, Decoder, DecoderBuilder, Parser, ParserIter,
        RawSentence, Reassembler, ReassemblerConfig, SequenceKey, SystemClock,
    },
    payload::{armor_value, decode_text, BitStream},
};

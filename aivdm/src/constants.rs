pub const NMEA_ENCAPSULATION_CHAR: u8 = b'!'; // '!'
pub const NMEA_SYNC_CHAR: u8 = b'$'; // '$'
pub const NMEA_CHECKSUM_CHAR: u8 = b'*';
pub const NMEA_END_CHAR_1: u8 = 0x0d; // '\r' (<CR>)
pub const NMEA_END_CHAR_2: u8 = 0x0a; // '\n' (<LF>)
pub(crate) const TAG_BLOCK_CHAR: u8 = b'\\';

/// Sentence address is the talker (2) + formatter (3), e.g. `AIVDM`
pub(crate) const NMEA_ADDRESS_LEN: usize = 5;

/// Longest line the streaming parser buffers before giving up on it.
/// NMEA caps sentences at 82 chars, but TAG blocks push real feeds well past that.
pub const MAX_LINE_LEN: usize = 512;

pub(crate) const SENTENCE_EXCERPT_LEN: usize = 96;

pub(crate) const MAX_FILL_BITS: u8 = 5;
/// Fragment count is a single digit on the wire
pub(crate) const MAX_FRAGMENTS: u8 = 9;

pub const DEFAULT_REASSEMBLY_TTL_SECS: u64 = 10;
pub(crate) const DEFAULT_REASSEMBLY_SHARDS: usize = 16;

pub(crate) const MESSAGE_TYPE_BITS: usize = 6;

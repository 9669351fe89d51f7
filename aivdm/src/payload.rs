//! 6-bit armored payloads and the bitstream view over them.

pub(crate) mod armor;
pub(crate) mod bits;
pub(crate) mod text;

pub use armor::armor_value;
pub use bits::BitStream;
pub use text::decode_text;

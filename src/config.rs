//! Encoder configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How many bits the packer writes for each code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LengthMode {
    /// Width of the numeric value with leading zeros dropped; value 0 is a
    /// single 0 bit. Codes such as "010" are written as "10", so the output
    /// is not decodable in general, but it is bit-for-bit compatible with
    /// payloads produced from value-only code tables.
    #[default]
    ValueWidth,
    /// Full path length stored in the table, leading zeros included.
    Stored,
}

/// Options for [`crate::encode_with`] and [`crate::HuffmanCodec`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EncoderConfig {
    pub length_mode: LengthMode,
}

impl EncoderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_length_mode(mut self, length_mode: LengthMode) -> Self {
        self.length_mode = length_mode;
        self
    }
}

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::code_table::CodeTable;

/// Packed output of [`crate::encode`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EncodedPayload {
    /// The table the input was packed with.
    pub codes: CodeTable,
    /// Packed bits, MSB first.
    pub data: Vec<u8>,
    /// Unused low-order bits in the last byte of `data`, 0 to 7.
    pub padding: u8,
}

impl EncodedPayload {
    /// Number of meaningful bits in `data`.
    pub fn bit_len(&self) -> usize {
        (self.data.len() * 8).saturating_sub(usize::from(self.padding))
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

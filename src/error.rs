//! Error types for tree construction, table extraction and packing.

use thiserror::Error;

/// Result type alias for Huffman operations.
pub type Result<T> = core::result::Result<T, HuffmanError>;

/// Errors raised while building a tree, deriving its code table or packing input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HuffmanError {
    /// The frequency table cannot form a binary prefix code.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// A leaf path could not be turned into a 32-bit numeric code.
    #[error("malformed tree: code for symbol {symbol:#04x} is {depth} bits, limit is 32")]
    MalformedTree { symbol: u8, depth: usize },

    /// An input byte has no entry in the code table.
    #[error("symbol {0:#04x} not found in code table")]
    UnknownSymbol(u8),
}

impl HuffmanError {
    /// Create an invalid input error.
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        HuffmanError::InvalidInput {
            reason: reason.into(),
        }
    }
}

//! # huffpack
//!
//! Deterministic Huffman coding over bytes: build a tree from symbol
//! frequencies, derive a code table from it, and pack input MSB-first into
//! bytes with explicit padding accounting.
//!
//! ## Quick Start
//!
//! ```rust
//! use huffpack::{build, encode, extract, FrequencyTable};
//!
//! let freqs = FrequencyTable::from([(b'A', 3), (b'B', 2), (b'C', 1), (b'D', 1)]);
//! let tree = build(&freqs)?;
//! let codes = extract(&tree)?;
//!
//! let payload = encode(&codes, b"ABBCCDAB")?;
//! assert_eq!(payload.data, vec![86, 221, 0]);
//! assert_eq!(payload.padding, 7);
//! # Ok::<(), huffpack::HuffmanError>(())
//! ```
//!
//! Trees are reproducible: at equal weight a leaf sorts before an internal
//! node, leaves order by symbol and internal nodes by merge order. The code
//! is not canonical.

#![forbid(unsafe_code)]

pub mod code_table;
pub mod config;
pub mod error;
pub mod frequency;
pub mod huffman_codec;
pub mod hufftree;
pub mod payload;

// Internal modules - not part of public API
mod bit_writer;
mod min_heap;

pub use code_table::{extract, Code, CodeTable};
pub use config::{EncoderConfig, LengthMode};
pub use error::{HuffmanError, Result};
pub use frequency::FrequencyTable;
pub use huffman_codec::{encode, encode_with, HuffmanCodec};
pub use hufftree::{build, HuffNode, HuffmanTree};
pub use payload::EncodedPayload;

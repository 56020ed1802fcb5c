use tracing::debug;

use crate::bit_writer::BitWriter;
use crate::code_table::CodeTable;
use crate::config::{EncoderConfig, LengthMode};
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::hufftree::HuffmanTree;
use crate::payload::EncodedPayload;

/// Pack `data` with `codes` using the default [`EncoderConfig`].
pub fn encode(codes: &CodeTable, data: &[u8]) -> Result<EncodedPayload> {
    encode_with(codes, data, &EncoderConfig::default())
}

/// Pack `data` with `codes`, MSB first.
///
/// Fails with [`HuffmanError::UnknownSymbol`] on the first byte that has no
/// code; nothing is returned for the bytes before it.
pub fn encode_with(codes: &CodeTable, data: &[u8], config: &EncoderConfig) -> Result<EncodedPayload> {
    let mut writer = BitWriter::with_capacity(data.len());
    for &byte in data {
        let code = codes.get(byte).ok_or(HuffmanError::UnknownSymbol(byte))?;
        let bit_length = match config.length_mode {
            LengthMode::ValueWidth => code.value_width(),
            LengthMode::Stored => code.len(),
        };
        writer.push_bits(code.value(), bit_length);
    }

    let bits = writer.bit_count();
    let (packed, padding) = writer.finish();
    debug!(
        input = data.len(),
        bits,
        bytes = packed.len(),
        padding,
        mode = ?config.length_mode,
        "encoded payload"
    );

    Ok(EncodedPayload {
        codes: codes.clone(),
        data: packed,
        padding,
    })
}

/// A tree and its code table, ready to pack input.
#[derive(Debug, Clone)]
pub struct HuffmanCodec {
    tree: HuffmanTree,
    table: CodeTable,
    config: EncoderConfig,
}

impl HuffmanCodec {
    pub fn new(tree: HuffmanTree) -> Result<Self> {
        let table = tree.generate_table()?;
        Ok(HuffmanCodec {
            tree,
            table,
            config: EncoderConfig::default(),
        })
    }

    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self> {
        Self::new(HuffmanTree::from_frequencies(frequencies)?)
    }

    /// Build a codec from the byte counts of `data`.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::new(HuffmanTree::from_bytes(data)?)
    }

    pub fn with_config(mut self, config: EncoderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    pub fn table(&self) -> &CodeTable {
        &self.table
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    pub fn encode(&self, data: &[u8]) -> Result<EncodedPayload> {
        encode_with(&self.table, data, &self.config)
    }
}

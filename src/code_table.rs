//! Symbol to code mapping derived from a [`HuffmanTree`].
//!
//! Each code keeps both its numeric value (the path read as a binary number,
//! first step most significant) and the path length. The value on its own
//! cannot tell "010" from "10"; the length is what resolves that.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{HuffmanError, Result};
use crate::hufftree::{HuffNode, HuffmanTree};

/// Longest path that still fits the 32-bit numeric code.
pub const MAX_CODE_BITS: usize = 32;

/// One codeword: left steps are 0 bits, right steps are 1 bits.
///
/// Always holds `len <= MAX_CODE_BITS` and a `value` that fits in `len` bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawCode", into = "RawCode"))]
pub struct Code {
    value: u32,
    len: u8,
}

impl Code {
    /// Fails with [`HuffmanError::InvalidInput`] if `len` exceeds
    /// [`MAX_CODE_BITS`] or `value` needs more than `len` bits.
    pub fn new(value: u32, len: u8) -> Result<Self> {
        if usize::from(len) > MAX_CODE_BITS {
            return Err(HuffmanError::invalid_input(format!(
                "code length {} exceeds {} bits",
                len, MAX_CODE_BITS
            )));
        }
        if u64::from(value) >> len != 0 {
            return Err(HuffmanError::invalid_input(format!(
                "code value {} does not fit in {} bits",
                value, len
            )));
        }
        Ok(Code { value, len })
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Path length in bits, leading zeros included.
    pub fn len(&self) -> u8 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bits needed to write `value` with leading zeros stripped. Value 0
    /// still takes one bit.
    pub fn value_width(&self) -> u8 {
        // at most 32, fits in u8
        (u32::BITS - self.value.leading_zeros()).max(1) as u8
    }

    /// The full path as a string of '0' and '1'.
    pub fn bit_string(&self) -> String {
        (0..self.len)
            .rev()
            .map(|shift| {
                if (u64::from(self.value) >> shift) & 1 == 1 {
                    '1'
                } else {
                    '0'
                }
            })
            .collect()
    }
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct RawCode {
    value: u32,
    len: u8,
}

#[cfg(feature = "serde")]
impl TryFrom<RawCode> for Code {
    type Error = HuffmanError;

    fn try_from(raw: RawCode) -> Result<Self> {
        Code::new(raw.value, raw.len)
    }
}

#[cfg(feature = "serde")]
impl From<Code> for RawCode {
    fn from(code: Code) -> Self {
        RawCode {
            value: code.value,
            len: code.len,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct CodeTable {
    codes: BTreeMap<u8, Code>,
}

impl CodeTable {
    pub fn get(&self, symbol: u8) -> Option<Code> {
        self.codes.get(&symbol).copied()
    }

    /// Numeric value of the code for `symbol`.
    pub fn value(&self, symbol: u8) -> Option<u32> {
        self.codes.get(&symbol).map(|code| code.value)
    }

    pub fn contains(&self, symbol: u8) -> bool {
        self.codes.contains_key(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Iterate `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        self.codes.iter().map(|(&symbol, &code)| (symbol, code))
    }
}

impl FromIterator<(u8, Code)> for CodeTable {
    fn from_iter<I: IntoIterator<Item = (u8, Code)>>(iter: I) -> Self {
        CodeTable {
            codes: iter.into_iter().collect(),
        }
    }
}

/// Walk `tree` depth first and assign every leaf its path code.
///
/// Fails with [`HuffmanError::MalformedTree`] if a leaf sits deeper than
/// [`MAX_CODE_BITS`].
pub fn extract(tree: &HuffmanTree) -> Result<CodeTable> {
    let mut codes = BTreeMap::new();
    let mut stack: Vec<(&HuffNode, u32, usize)> = vec![(tree.root(), 0, 0)];

    while let Some((node, code, depth)) = stack.pop() {
        match node {
            HuffNode::Leaf { symbol, .. } => {
                if depth > MAX_CODE_BITS {
                    return Err(HuffmanError::MalformedTree {
                        symbol: *symbol,
                        depth,
                    });
                }
                // depth <= 32 here, and the path value has exactly depth bits
                let len = depth as u8;
                codes.insert(*symbol, Code { value: code, len });
            }
            HuffNode::Internal { left, right, .. } => {
                // High bits fall off past 32 levels; such leaves are
                // rejected above before their value is stored.
                let shifted = code << 1;
                stack.push((right.as_ref(), shifted | 1, depth + 1));
                stack.push((left.as_ref(), shifted, depth + 1));
            }
        }
    }

    debug!(
        symbols = codes.len(),
        max_len = codes.values().map(|c| c.len).max().unwrap_or(0),
        "code table extracted"
    );
    Ok(CodeTable { codes })
}

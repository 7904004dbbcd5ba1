//! Code table generation.
//!
//! Walking the tree from the root, a step to the left appends a `0` bit and
//! a step to the right appends a `1` bit. Codes are only assigned at leaves,
//! so the resulting set is prefix-free.

use crate::frequency::FrequencyTable;
use crate::tree::{HuffmanTree, SYMBOL_COUNT, Symbol, TreeNode};
use oxihuff_core::BitWriter;
use oxihuff_core::error::Result;
use std::fmt;
use std::io::Write;

/// Longest code a `Code` can hold.
pub const MAX_CODE_LENGTH: u8 = 128;

/// A root-to-leaf path as a right-aligned bit pattern and its length.
///
/// The first step from the root is the most significant of the `len` bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Code {
    bits: u128,
    len: u8,
}

impl Code {
    /// The zero-length code of a tree whose root is a leaf.
    pub const EMPTY: Self = Self { bits: 0, len: 0 };

    /// Create a code from its pattern and length. Bits above `len` are dropped.
    pub fn new(bits: u128, len: u8) -> Self {
        debug_assert!(len <= MAX_CODE_LENGTH);
        let bits = if len >= MAX_CODE_LENGTH {
            bits
        } else {
            bits & ((1u128 << len) - 1)
        };
        Self { bits, len }
    }

    /// Bit pattern, right-aligned.
    pub fn bits(&self) -> u128 {
        self.bits
    }

    /// Number of bits.
    pub fn len(&self) -> u8 {
        self.len
    }

    /// Whether this is the zero-length code.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Extend the path by one step.
    #[inline]
    pub fn push(self, bit: bool) -> Self {
        debug_assert!(self.len < MAX_CODE_LENGTH);
        Self {
            bits: (self.bits << 1) | u128::from(bit),
            len: self.len + 1,
        }
    }

    /// The `i`-th step from the root (0-based).
    pub fn bit(&self, i: u8) -> bool {
        debug_assert!(i < self.len);
        (self.bits >> (self.len - 1 - i)) & 1 == 1
    }

    /// Whether `self` is a prefix of `other` (a code is a prefix of itself).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        if self.len > other.len {
            return false;
        }
        let shift = u32::from(other.len - self.len);
        other.bits.checked_shr(shift).unwrap_or(0) == self.bits
    }

    /// Write the code MSB first, in chunks the bit writer accepts.
    pub fn write_to<W: Write>(&self, writer: &mut BitWriter<W>) -> Result<()> {
        let mut remaining = self.len;
        while remaining > 0 {
            let take = remaining.min(32);
            remaining -= take;
            let chunk = (self.bits >> remaining) as u32;
            writer.write_bits(chunk, take)?;
        }
        Ok(())
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.len {
            f.write_str(if self.bit(i) { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Symbol to code mapping for one tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: [Option<Code>; SYMBOL_COUNT],
}

impl CodeTable {
    /// Generate the table for `tree`: one entry per leaf.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut table = Self {
            codes: [None; SYMBOL_COUNT],
        };
        table.assign(tree.root(), Code::EMPTY);
        table
    }

    fn assign(&mut self, node: &TreeNode, path: Code) {
        match node {
            TreeNode::Leaf { symbol, .. } => {
                log::trace!("code {} -> {}", symbol, path);
                self.codes[symbol.index()] = Some(path);
            }
            TreeNode::Internal { left, right, .. } => {
                self.assign(left, path.push(false));
                self.assign(right, path.push(true));
            }
        }
    }

    /// Code for a symbol, if the tree has a leaf for it.
    #[inline]
    pub fn get(&self, symbol: Symbol) -> Option<Code> {
        self.codes[symbol.index()]
    }

    /// Code for a literal byte.
    #[inline]
    pub fn get_byte(&self, byte: u8) -> Option<Code> {
        self.codes[byte as usize]
    }

    /// Iterate `(symbol, code)` entries in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, Code)> + '_ {
        self.codes.iter().enumerate().filter_map(|(value, code)| {
            let symbol = Symbol::from_value(value as u16)?;
            code.as_ref().map(|&c| (symbol, c))
        })
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.codes.iter().flatten().count()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Length of the longest code.
    pub fn max_len(&self) -> u8 {
        self.codes.iter().flatten().map(Code::len).max().unwrap_or(0)
    }

    /// Check that no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<Code> = self.codes.iter().flatten().copied().collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !a.is_prefix_of(b))
        })
    }

    /// Payload size in bits for the counted input, terminator included.
    ///
    /// Bytes without a code contribute nothing.
    pub fn payload_bits(&self, frequencies: &FrequencyTable) -> u64 {
        let data: u64 = frequencies
            .iter()
            .filter_map(|(byte, count)| self.get_byte(byte).map(|c| count * u64::from(c.len())))
            .sum();
        let eos = self.get(Symbol::EndOfStream).map_or(0, |c| u64::from(c.len()));
        data + eos
    }
}

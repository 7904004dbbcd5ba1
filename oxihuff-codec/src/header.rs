//! Tree header serialization.
//!
//! # Header Format
//!
//! ```text
//! ┌──────────────┬──────────────────────────────────────────┐
//! │ magic (32)   │ pre-order tree                           │
//! └──────────────┴──────────────────────────────────────────┘
//!
//! node     := 0 node node        internal: left subtree, then right
//!           | 1 value(9)         leaf: 0-255 byte, 256 end-of-stream
//! ```
//!
//! The grammar is self-terminating: the reader knows the tree is complete
//! when every internal node has both subtrees, so no size field is stored.

use crate::code_table::{CodeTable, MAX_CODE_LENGTH};
use crate::tree::{HuffmanTree, SYMBOL_COUNT, Symbol, TreeNode};
use oxihuff_core::error::{HuffError, Result};
use oxihuff_core::{BitReader, BitWriter};
use std::io::{Read, Write};

/// Base magic number; also the value written by the compressor.
pub const HUFF_NUMBER: u32 = 0xFACE_8200;

/// Tree-header tag. Accepted on input.
pub const HUFF_TREE: u32 = HUFF_NUMBER | 1;

/// Count-header tag. Recognised and rejected.
pub const HUFF_COUNTS: u32 = HUFF_NUMBER | 2;

/// Width of the magic field.
pub const BITS_PER_INT: u8 = 32;

/// Width of a leaf value.
pub const SYMBOL_BITS: u8 = 9;

/// Deepest tree accepted from a header.
pub const MAX_TREE_DEPTH: usize = 256;

/// Write the magic number followed by the serialized tree.
///
/// Returns the number of bits written.
pub fn write_header<W: Write>(writer: &mut BitWriter<W>, tree: &HuffmanTree) -> Result<u64> {
    let start = writer.bits_written();
    writer.write_bits(HUFF_NUMBER, BITS_PER_INT)?;
    write_tree(writer, tree.root())?;
    Ok(writer.bits_written() - start)
}

/// Pre-order serialization of a subtree.
pub fn write_tree<W: Write>(writer: &mut BitWriter<W>, node: &TreeNode) -> Result<()> {
    match node {
        TreeNode::Leaf { symbol, .. } => {
            writer.write_bit(true)?;
            writer.write_bits(u32::from(symbol.value()), SYMBOL_BITS)
        }
        TreeNode::Internal { left, right, .. } => {
            writer.write_bit(false)?;
            write_tree(writer, left)?;
            write_tree(writer, right)
        }
    }
}

/// Number of bits [`write_tree`] emits for a subtree.
pub fn tree_bits(node: &TreeNode) -> u64 {
    match node {
        TreeNode::Leaf { .. } => 1 + u64::from(SYMBOL_BITS),
        TreeNode::Internal { left, right, .. } => 1 + tree_bits(left) + tree_bits(right),
    }
}

/// Read and validate the 32-bit magic number.
///
/// A source shorter than 32 bits fails as [`HuffError::InvalidMagic`] with
/// the bits that were present as `found`.
pub fn read_magic<R: Read>(reader: &mut BitReader<R>) -> Result<u32> {
    let mut magic = 0u32;
    for _ in 0..BITS_PER_INT {
        match reader.try_read_bit()? {
            Some(bit) => magic = (magic << 1) | u32::from(bit),
            None => return Err(HuffError::invalid_magic(HUFF_NUMBER, magic)),
        }
    }

    match magic {
        HUFF_NUMBER | HUFF_TREE => Ok(magic),
        HUFF_COUNTS => Err(HuffError::unsupported_method("count header")),
        found => Err(HuffError::invalid_magic(HUFF_NUMBER, found)),
    }
}

/// Read the magic number and rebuild the tree.
///
/// Leaf weights of the returned tree are zero; decoding never reads them.
pub fn read_header<R: Read>(reader: &mut BitReader<R>) -> Result<HuffmanTree> {
    read_magic(reader)?;
    read_tree(reader)
}

/// Contents of a compressed stream's header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Magic number as read.
    pub magic: u32,
    /// Rebuilt tree (zero weights).
    pub tree: HuffmanTree,
    /// Header size in bits.
    pub header_bits: u64,
}

impl HeaderInfo {
    /// Read a header and record where it ends.
    pub fn read<R: Read>(reader: &mut BitReader<R>) -> Result<Self> {
        let start = reader.bits_read();
        let magic = read_magic(reader)?;
        let tree = read_tree(reader)?;
        Ok(Self {
            magic,
            tree,
            header_bits: reader.bits_read() - start,
        })
    }

    /// Code table of the tree, or `None` if some path is too long for a
    /// [`Code`](crate::code_table::Code).
    pub fn code_table(&self) -> Option<CodeTable> {
        (self.tree.depth() <= usize::from(MAX_CODE_LENGTH))
            .then(|| CodeTable::from_tree(&self.tree))
    }
}

/// Rebuild a tree from its pre-order serialization.
///
/// # Errors
///
/// - [`HuffError::TruncatedStream`] if the source ends inside the tree.
/// - [`HuffError::InvalidHeader`] for a leaf value above 256, a tree deeper
///   than [`MAX_TREE_DEPTH`], more than 257 leaves, or a number of
///   end-of-stream leaves other than one.
pub fn read_tree<R: Read>(reader: &mut BitReader<R>) -> Result<HuffmanTree> {
    let mut state = TreeReadState::default();
    let root = state.read_node(reader, 0)?;

    if state.end_of_stream_leaves != 1 {
        return Err(HuffError::invalid_header(format!(
            "tree has {} end-of-stream leaves, expected 1",
            state.end_of_stream_leaves
        )));
    }

    log::debug!("read tree header: {} leaves", state.leaves);
    Ok(HuffmanTree::from_root(root))
}

#[derive(Debug, Default)]
struct TreeReadState {
    leaves: usize,
    end_of_stream_leaves: usize,
}

impl TreeReadState {
    fn read_bits<R: Read>(reader: &mut BitReader<R>, count: u8) -> Result<u32> {
        let position = reader.bits_read();
        reader
            .try_read_bits(count)?
            .ok_or_else(|| HuffError::truncated(position))
    }

    fn read_node<R: Read>(&mut self, reader: &mut BitReader<R>, depth: usize) -> Result<TreeNode> {
        if depth > MAX_TREE_DEPTH {
            return Err(HuffError::invalid_header(format!(
                "tree deeper than {} levels",
                MAX_TREE_DEPTH
            )));
        }

        if Self::read_bits(reader, 1)? == 1 {
            let value = Self::read_bits(reader, SYMBOL_BITS)? as u16;
            let symbol = Symbol::from_value(value).ok_or_else(|| {
                HuffError::invalid_header(format!("leaf value {} out of range", value))
            })?;

            self.leaves += 1;
            if self.leaves > SYMBOL_COUNT {
                return Err(HuffError::invalid_header(format!(
                    "more than {} leaves",
                    SYMBOL_COUNT
                )));
            }
            if symbol.is_end_of_stream() {
                self.end_of_stream_leaves += 1;
            }

            return Ok(TreeNode::leaf(symbol, 0));
        }

        let left = self.read_node(reader, depth + 1)?;
        let right = self.read_node(reader, depth + 1)?;
        Ok(TreeNode::Internal {
            weight: 0,
            left: Box::new(left),
            right: Box::new(right),
        })
    }
}

//! Huffman decompression.

use crate::frequency::BITS_PER_WORD;
use crate::header::read_header;
use crate::tree::{HuffmanTree, Symbol, TreeNode};
use oxihuff_core::error::{HuffError, Result};
use oxihuff_core::{BitReader, BitWriter};
use std::io::{Read, Write};

/// Summary of one decompress call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecompressStats {
    /// Bits consumed, header and terminator included.
    pub input_bits: u64,
    /// Bytes written.
    pub output_bytes: u64,
    /// Leaves in the tree read from the header.
    pub leaves: usize,
}

/// Huffman decompressor.
#[derive(Debug, Clone, Copy, Default)]
pub struct HuffDecoder;

impl HuffDecoder {
    /// Create a decoder.
    pub fn new() -> Self {
        Self
    }

    /// Decompress `input` into `output`.
    ///
    /// The header is validated before any byte is written, so a bad magic
    /// number leaves `output` untouched.
    pub fn decompress<R: Read, W: Write>(&self, input: R, output: W) -> Result<DecompressStats> {
        let mut reader = BitReader::new(input);
        let tree = read_header(&mut reader)?;
        let header_bits = reader.bits_read();
        log::debug!(
            "header: {} bits, {} leaves, depth {}",
            header_bits,
            tree.leaf_count(),
            tree.depth()
        );

        let mut writer = BitWriter::new(output);
        let output_bytes = decode_payload(&mut reader, &tree, &mut writer)?;
        writer.flush()?;

        Ok(DecompressStats {
            input_bits: reader.bits_read(),
            output_bytes,
            leaves: tree.leaf_count(),
        })
    }
}

/// Walk `tree` bit by bit, writing every decoded byte, until the
/// end-of-stream leaf is reached.
///
/// Returns the number of bytes written. A tree whose root is the
/// end-of-stream leaf decodes to nothing without reading a bit.
///
/// # Errors
///
/// - [`HuffError::TruncatedStream`] if the source ends before the
///   end-of-stream leaf.
/// - [`HuffError::InvalidHeader`] if the root is a byte leaf, which has no
///   code to walk.
pub fn decode_payload<R: Read, W: Write>(
    reader: &mut BitReader<R>,
    tree: &HuffmanTree,
    writer: &mut BitWriter<W>,
) -> Result<u64> {
    let root = tree.root();
    let root_children = match root {
        TreeNode::Internal { left, right, .. } => (&**left, &**right),
        TreeNode::Leaf {
            symbol: Symbol::EndOfStream,
            ..
        } => {
            log::debug!("single-leaf tree: empty payload");
            return Ok(0);
        }
        TreeNode::Leaf {
            symbol: Symbol::Byte(byte),
            ..
        } => {
            return Err(HuffError::invalid_header(format!(
                "root is a leaf for byte {}",
                byte
            )));
        }
    };

    let mut count = 0u64;
    let (mut left, mut right) = root_children;
    loop {
        let position = reader.bits_read();
        let bit = reader
            .try_read_bit()?
            .ok_or_else(|| HuffError::truncated(position))?;

        let next = if bit { right } else { left };
        match next {
            TreeNode::Internal {
                left: next_left,
                right: next_right,
                ..
            } => {
                left = &**next_left;
                right = &**next_right;
            }
            TreeNode::Leaf {
                symbol: Symbol::EndOfStream,
                ..
            } => break,
            TreeNode::Leaf {
                symbol: Symbol::Byte(byte),
                ..
            } => {
                writer.write_bits(u32::from(*byte), BITS_PER_WORD)?;
                count += 1;
                (left, right) = root_children;
            }
        }
    }

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::HuffEncoder;
    use crate::header::{HUFF_NUMBER, write_tree};
    use std::io::Cursor;

    fn compress(data: &[u8]) -> Vec<u8> {
        let mut output = Vec::new();
        HuffEncoder::default()
            .compress(Cursor::new(data.to_vec()), &mut output)
            .unwrap();
        output
    }

    fn decompress(data: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        HuffDecoder::new().decompress(Cursor::new(data.to_vec()), &mut output)?;
        Ok(output)
    }

    #[test]
    fn test_decompress_aaaa() {
        let bytes = [0xFA, 0xCE, 0x82, 0x00, 0x60, 0x13, 0x0F, 0x80];
        assert_eq!(decompress(&bytes).unwrap(), b"aaaa");
    }

    #[test]
    fn test_decompress_empty() {
        let mut output = Vec::new();
        let stats = HuffDecoder::new()
            .decompress(Cursor::new(vec![0xFA, 0xCE, 0x82, 0x00, 0xC0, 0x00]), &mut output)
            .unwrap();

        assert!(output.is_empty());
        assert_eq!(stats.output_bytes, 0);
        assert_eq!(stats.input_bits, 42);
        assert_eq!(stats.leaves, 1);
    }

    #[test]
    fn test_roundtrip_text() {
        let data = b"abracadabra, abracadabra!";
        assert_eq!(decompress(&compress(data)).unwrap(), data);
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let mut bytes = compress(b"hello");
        bytes.extend_from_slice(&[0xFF, 0xFF]);
        assert_eq!(decompress(&bytes).unwrap(), b"hello");
    }

    #[test]
    fn test_cut_payload_truncated() {
        // 97 header bits and 28 payload bits; keep only 15 payload bits,
        // which end inside the code for 'd'.
        let bytes = compress(b"abracadabra");
        assert_eq!(bytes.len(), 16);
        let err = decompress(&bytes[..14]).unwrap_err();
        assert!(matches!(err, HuffError::TruncatedStream { .. }));
    }

    #[test]
    fn test_byte_leaf_root_rejected() {
        let tree = HuffmanTree::from_root(TreeNode::leaf(Symbol::Byte(b'x'), 0));
        let mut reader = BitReader::new(Cursor::new(vec![0u8; 4]));
        let mut writer = BitWriter::new(Vec::new());
        let err = decode_payload(&mut reader, &tree, &mut writer).unwrap_err();
        assert!(matches!(err, HuffError::InvalidHeader { .. }));
    }

    #[test]
    fn test_bad_magic_no_output() {
        let mut bytes = compress(b"some text");
        bytes[0] ^= 0xFF;
        let mut output = Vec::new();
        let err = HuffDecoder::new()
            .decompress(Cursor::new(bytes), &mut output)
            .unwrap_err();
        assert!(matches!(err, HuffError::InvalidMagic { .. }));
        assert!(output.is_empty());
    }

    #[test]
    fn test_decode_hand_built_tree() {
        // EOS on the left, 'x' on the right: "1 1 0" decodes to "xx".
        let tree = HuffmanTree::from_root(TreeNode::merge(
            TreeNode::leaf(Symbol::EndOfStream, 0),
            TreeNode::leaf(Symbol::Byte(b'x'), 0),
        ));
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(HUFF_NUMBER, 32).unwrap();
        write_tree(&mut writer, tree.root()).unwrap();
        writer.write_bits(0b110, 3).unwrap();
        let bytes = writer.into_inner().unwrap();

        assert_eq!(decompress(&bytes).unwrap(), b"xx");
    }
}

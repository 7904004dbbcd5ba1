//! Huffman compression.
//!
//! Compression takes two passes over the input: the first counts byte
//! frequencies, the second (after rewinding) writes one code per byte.

use crate::code_table::CodeTable;
use crate::config::HuffConfig;
use crate::frequency::{BITS_PER_WORD, FrequencyTable, count_frequencies};
use crate::header::write_header;
use crate::tree::{HuffmanTree, Symbol};
use oxihuff_core::error::{HuffError, Result};
use oxihuff_core::{BitReader, BitWriter};
use std::io::{Read, Seek, Write};

/// Summary of one compress call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompressStats {
    /// Bytes read in the encoding pass.
    pub input_bytes: u64,
    /// Bits spent on the magic number and tree.
    pub header_bits: u64,
    /// Bits spent on codes, terminator included.
    pub payload_bits: u64,
    /// Leaves in the tree (distinct bytes plus end-of-stream).
    pub leaves: usize,
    /// Longest code length.
    pub max_code_len: u8,
}

impl CompressStats {
    /// Compressed size in bytes, padding included.
    pub fn output_bytes(&self) -> u64 {
        (self.header_bits + self.payload_bits).div_ceil(8)
    }

    /// Output size relative to input size (0.0 for empty input).
    pub fn compression_ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.output_bytes() as f64 / self.input_bytes as f64
        }
    }

    /// Space savings as a percentage (negative when the output grew).
    pub fn space_savings(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            (1.0 - self.compression_ratio()) * 100.0
        }
    }
}

/// Huffman compressor.
#[derive(Debug, Clone, Copy, Default)]
pub struct HuffEncoder {
    config: HuffConfig,
}

impl HuffEncoder {
    /// Create an encoder with the given configuration.
    pub fn new(config: HuffConfig) -> Self {
        Self { config }
    }

    /// Compress `input` into `output`.
    ///
    /// `input` is read twice; it is rewound to its start between passes.
    ///
    /// # Errors
    ///
    /// - [`HuffError::UnsupportedMethod`] if the configured header mode has
    ///   no codec. Nothing is read or written in that case.
    /// - [`HuffError::UnknownSymbol`] if the encoding pass sees a byte the
    ///   counting pass did not.
    /// - [`HuffError::Io`] from the source or sink.
    pub fn compress<R: Read + Seek, W: Write>(&self, input: R, output: W) -> Result<CompressStats> {
        let mode = self.config.header;
        log::info!("compressing with {}", mode);
        if !mode.is_supported() {
            log::warn!("{} has no codec", mode);
            return Err(HuffError::unsupported_method(mode.name()));
        }

        let mut reader = BitReader::new(input);
        let frequencies = count_frequencies(&mut reader)?;
        let (tree, table) = plan(&frequencies);

        let mut writer = BitWriter::new(output);
        let header_bits = write_header(&mut writer, &tree)?;

        reader.reset()?;
        let input_bytes = encode_payload(&mut reader, &mut writer, &table)?;
        if input_bytes != frequencies.total() {
            log::warn!(
                "input changed between passes: counted {} bytes, encoded {}",
                frequencies.total(),
                input_bytes
            );
        }

        let payload_bits = writer.bits_written() - header_bits;
        writer.flush()?;

        let stats = CompressStats {
            input_bytes,
            header_bits,
            payload_bits,
            leaves: tree.leaf_count(),
            max_code_len: table.max_len(),
        };
        log::debug!(
            "compressed {} bytes: header {} bits, payload {} bits",
            stats.input_bytes,
            stats.header_bits,
            stats.payload_bits
        );
        Ok(stats)
    }
}

/// Write the code of every remaining input byte, then the terminator.
///
/// Returns the number of bytes encoded. When the tree is a single
/// end-of-stream leaf its code is empty and no payload bits are written.
pub fn encode_payload<R: Read, W: Write>(
    reader: &mut BitReader<R>,
    writer: &mut BitWriter<W>,
    table: &CodeTable,
) -> Result<u64> {
    let mut count = 0u64;
    while let Some(value) = reader.try_read_bits(BITS_PER_WORD)? {
        let code = table
            .get_byte(value as u8)
            .ok_or_else(|| HuffError::unknown_symbol(value as u16))?;
        code.write_to(writer)?;
        count += 1;
    }

    let terminator = table
        .get(Symbol::EndOfStream)
        .ok_or_else(|| HuffError::unknown_symbol(Symbol::EndOfStream.value()))?;
    if terminator.is_empty() {
        log::debug!("single-leaf tree: no payload bits");
    } else {
        terminator.write_to(writer)?;
    }

    Ok(count)
}

/// Tree and code table for the counted input.
pub fn plan(frequencies: &FrequencyTable) -> (HuffmanTree, CodeTable) {
    let tree = HuffmanTree::from_frequencies(frequencies);
    let table = CodeTable::from_tree(&tree);
    (tree, table)
}

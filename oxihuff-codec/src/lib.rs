//! # OxiHuff Codec
//!
//! Pure Rust static Huffman compression with a self-describing tree header.
//!
//! Each input gets its own optimal prefix code. The tree is written at the
//! start of the output so that the decoder can rebuild it, and an
//! end-of-stream symbol (value 256) terminates the payload.
//!
//! ## Pipeline
//!
//! ```text
//! compress:   count ─► build tree ─► code table ─► write header ─► rewind ─► encode
//! decompress: read header ─► walk tree per bit ─► bytes
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxihuff_codec::{compress_bytes, decompress_bytes};
//!
//! let data = b"abracadabra";
//! let compressed = compress_bytes(data).unwrap();
//! assert_eq!(&compressed[..4], &[0xFA, 0xCE, 0x82, 0x00]);
//!
//! let restored = decompress_bytes(&compressed).unwrap();
//! assert_eq!(restored, data);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod code_table;
pub mod config;
pub mod decode;
pub mod encode;
pub mod frequency;
pub mod header;
pub mod tree;

// Re-exports
pub use code_table::{Code, CodeTable};
pub use config::{HeaderMode, HuffConfig};
pub use decode::{DecompressStats, HuffDecoder, decode_payload};
pub use encode::{CompressStats, HuffEncoder, encode_payload};
pub use frequency::{FrequencyTable, count_frequencies};
pub use header::{HUFF_COUNTS, HUFF_NUMBER, HUFF_TREE, HeaderInfo, read_header, write_header};
pub use tree::{HuffmanTree, Symbol, TreeNode};

use oxihuff_core::BitReader;
use oxihuff_core::error::Result;
use std::io::{Cursor, Read, Seek, Write};

/// Compress `input` into `output`. `input` is read twice.
pub fn compress<R: Read + Seek, W: Write>(
    input: R,
    output: W,
    config: HuffConfig,
) -> Result<CompressStats> {
    HuffEncoder::new(config).compress(input, output)
}

/// Decompress `input` into `output`.
pub fn decompress<R: Read, W: Write>(input: R, output: W) -> Result<DecompressStats> {
    HuffDecoder::new().decompress(input, output)
}

/// Compress a byte slice with the default configuration.
pub fn compress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    compress(Cursor::new(data), &mut output, HuffConfig::default())?;
    Ok(output)
}

/// Decompress a byte slice.
pub fn decompress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    decompress(Cursor::new(data), &mut output)?;
    Ok(output)
}

/// Read only the header of a compressed stream.
pub fn inspect<R: Read>(input: R) -> Result<HeaderInfo> {
    HeaderInfo::read(&mut BitReader::new(input))
}

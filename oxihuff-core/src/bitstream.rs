//! Bit-level I/O for prefix codes.
//!
//! This module provides `BitReader` and `BitWriter`, which read and write
//! data one bit group at a time on top of any `Read` / `Write`.
//!
//! # Bit Ordering
//!
//! OxiHuff streams are MSB-first (Most Significant Bit first): the first
//! bit of the stream is the high bit of the first byte, and an n-bit value
//! is written starting from its highest bit. A code path `0b110` of length 3
//! therefore appears in the stream exactly as it reads.
//!
//! # Example
//!
//! ```
//! use oxihuff_core::bitstream::{BitReader, BitWriter};
//! use std::io::Cursor;
//!
//! // Writing bits
//! let mut output = Vec::new();
//! {
//!     let mut writer = BitWriter::new(&mut output);
//!     writer.write_bits(0b101, 3).unwrap();  // Write 3 bits
//!     writer.write_bits(0b1100, 4).unwrap(); // Write 4 bits
//!     writer.flush().unwrap();
//! }
//! assert_eq!(output, vec![0b1011_1000]);
//!
//! // Reading bits
//! let mut reader = BitReader::new(Cursor::new(&output));
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//! assert_eq!(reader.read_bits(4).unwrap(), 0b1100);
//! ```

use crate::error::{HuffError, Result};
use std::io::{self, Read, Seek, SeekFrom, Write};

/// A bit-level reader that wraps any `Read` implementation.
///
/// Bits are pulled from the underlying reader a few bytes at a time into a
/// 64-bit buffer. End of data is reported either as an error
/// ([`read_bits`](Self::read_bits)) or as `None`
/// ([`try_read_bits`](Self::try_read_bits)), so callers that treat
/// end-of-data as a normal condition never have to match on errors.
#[derive(Debug)]
pub struct BitReader<R: Read> {
    /// Underlying reader.
    reader: R,
    /// Bit buffer (MSB-first, valid bits right-aligned).
    buffer: u64,
    /// Number of valid bits in buffer.
    bits_in_buffer: u8,
    /// Total bits read (for error reporting).
    total_bits_read: u64,
}

impl<R: Read> BitReader<R> {
    /// Create a new `BitReader` wrapping the given reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_read: 0,
        }
    }

    /// Get the total number of bits read so far.
    pub fn bits_read(&self) -> u64 {
        self.total_bits_read
    }

    /// Try to get at least `count` bits into the buffer.
    ///
    /// Returns `false` if the underlying reader hit end of data first.
    fn fill_buffer(&mut self, count: u8) -> Result<bool> {
        debug_assert!(count <= 32, "Cannot fill more than 32 bits at once");

        while self.bits_in_buffer < count {
            let bits_needed = count - self.bits_in_buffer;
            let bytes_needed = bits_needed.div_ceil(8) as usize;

            let mut temp_buf = [0u8; 4];
            let n = match self.reader.read(&mut temp_buf[..bytes_needed]) {
                Ok(0) => return Ok(false),
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };

            for byte in temp_buf.iter().take(n) {
                self.buffer = (self.buffer << 8) | u64::from(*byte);
                self.bits_in_buffer += 8;
            }
        }

        Ok(true)
    }

    /// Read up to 32 bits, or `None` if fewer than `count` bits remain.
    ///
    /// The first bit read lands in the most significant position of the
    /// result. After `None` is returned every further call returns `None`.
    pub fn try_read_bits(&mut self, count: u8) -> Result<Option<u32>> {
        debug_assert!(count <= 32, "Cannot read more than 32 bits at once");

        if count == 0 {
            return Ok(Some(0));
        }

        if !self.fill_buffer(count)? {
            return Ok(None);
        }

        let shift = self.bits_in_buffer - count;
        let mask = (1u64 << count) - 1;
        let value = ((self.buffer >> shift) & mask) as u32;

        self.bits_in_buffer -= count;
        self.buffer &= (1u64 << self.bits_in_buffer) - 1;
        self.total_bits_read += u64::from(count);

        Ok(Some(value))
    }

    /// Read up to 32 bits from the stream.
    ///
    /// # Errors
    ///
    /// Returns [`HuffError::UnexpectedEof`] if fewer than `count` bits remain.
    pub fn read_bits(&mut self, count: u8) -> Result<u32> {
        let position = self.total_bits_read;
        self.try_read_bits(count)?
            .ok_or_else(|| HuffError::unexpected_eof(position))
    }

    /// Read a single bit, or `None` at end of data.
    pub fn try_read_bit(&mut self) -> Result<Option<bool>> {
        Ok(self.try_read_bits(1)?.map(|bit| bit != 0))
    }

    /// Read a single bit.
    pub fn read_bit(&mut self) -> Result<bool> {
        Ok(self.read_bits(1)? != 0)
    }
}

impl<R: Read + Seek> BitReader<R> {
    /// Rewind to the start of the underlying stream.
    ///
    /// Buffered bits are discarded and the bit counter restarts at zero.
    pub fn reset(&mut self) -> Result<()> {
        self.reader.seek(SeekFrom::Start(0))?;
        self.buffer = 0;
        self.bits_in_buffer = 0;
        self.total_bits_read = 0;
        Ok(())
    }
}

/// A bit-level writer that wraps any `Write` implementation.
///
/// `BitWriter` accumulates bits in an internal buffer and hands complete
/// bytes to the underlying writer. Call [`flush`](Self::flush) or
/// [`into_inner`](Self::into_inner) when done; the final partial byte is
/// padded with zero bits.
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    /// Underlying writer.
    writer: W,
    /// Bit buffer (MSB-first, pending bits right-aligned).
    buffer: u64,
    /// Number of bits in buffer.
    bits_in_buffer: u8,
    /// Total bits written.
    total_bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Create a new `BitWriter` wrapping the given writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_written: 0,
        }
    }

    /// Flush (with padding) and return the underlying writer.
    pub fn into_inner(mut self) -> Result<W> {
        self.flush()?;
        Ok(self.writer)
    }

    /// Get the total number of bits written so far, excluding padding.
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    /// Hand complete bytes from the buffer to the writer.
    fn flush_bytes(&mut self) -> Result<()> {
        let mut bytes = [0u8; 8];
        let mut n = 0;
        while self.bits_in_buffer >= 8 {
            self.bits_in_buffer -= 8;
            bytes[n] = (self.buffer >> self.bits_in_buffer) as u8;
            n += 1;
        }
        if n > 0 {
            self.buffer &= (1u64 << self.bits_in_buffer) - 1;
            self.writer.write_all(&bytes[..n])?;
        }
        Ok(())
    }

    /// Write the low `count` bits of `value`, most significant first.
    ///
    /// # Arguments
    ///
    /// * `value` - The bits to write (right-aligned)
    /// * `count` - Number of bits to write (0-32)
    pub fn write_bits(&mut self, value: u32, count: u8) -> Result<()> {
        debug_assert!(count <= 32, "Cannot write more than 32 bits at once");

        if count == 0 {
            return Ok(());
        }

        let mask = if count == 32 {
            u32::MAX
        } else {
            (1u32 << count) - 1
        };

        self.buffer = (self.buffer << count) | u64::from(value & mask);
        self.bits_in_buffer += count;
        self.total_bits_written += u64::from(count);

        self.flush_bytes()
    }

    /// Write a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.write_bits(u32::from(bit), 1)
    }

    /// Pad to byte boundary with zeros.
    ///
    /// Padding is not counted in [`bits_written`](Self::bits_written).
    pub fn align_to_byte(&mut self) -> Result<()> {
        if self.bits_in_buffer % 8 != 0 {
            let padding = 8 - (self.bits_in_buffer % 8);
            self.buffer <<= padding;
            self.bits_in_buffer += padding;
            self.flush_bytes()?;
        }
        Ok(())
    }

    /// Pad the final partial byte with zeros and flush the writer.
    pub fn flush(&mut self) -> Result<()> {
        self.align_to_byte()?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_bitreader_basic() {
        // 0b10110101 = 0xB5
        let data = vec![0xB5];
        let mut reader = BitReader::new(Cursor::new(data));

        assert_eq!(reader.read_bits(1).unwrap(), 1); // MSB first
        assert_eq!(reader.read_bits(1).unwrap(), 0);
        assert_eq!(reader.read_bits(1).unwrap(), 1);
        assert_eq!(reader.read_bits(1).unwrap(), 1);
        assert_eq!(reader.read_bits(1).unwrap(), 0);
        assert_eq!(reader.read_bits(1).unwrap(), 1);
        assert_eq!(reader.read_bits(1).unwrap(), 0);
        assert_eq!(reader.read_bits(1).unwrap(), 1);
        assert_eq!(reader.bits_read(), 8);
    }

    #[test]
    fn test_bitreader_multi_byte() {
        let data = vec![0xFF, 0x00];
        let mut reader = BitReader::new(Cursor::new(data));

        assert_eq!(reader.read_bits(4).unwrap(), 0xF);
        assert_eq!(reader.read_bits(8).unwrap(), 0xF0); // Crosses byte boundary
        assert_eq!(reader.read_bits(4).unwrap(), 0x0);
    }

    #[test]
    fn test_bitreader_32_bits() {
        let data = vec![0xFA, 0xCE, 0x82, 0x00, 0x80];
        let mut reader = BitReader::new(Cursor::new(data));

        assert_eq!(reader.read_bits(32).unwrap(), 0xFACE8200);
        assert!(reader.read_bit().unwrap());
    }

    #[test]
    fn test_try_read_at_end() {
        let data = vec![0xA5];
        let mut reader = BitReader::new(Cursor::new(data));

        assert_eq!(reader.try_read_bits(8).unwrap(), Some(0xA5));
        assert_eq!(reader.try_read_bits(8).unwrap(), None);
        assert_eq!(reader.try_read_bit().unwrap(), None);
    }

    #[test]
    fn test_try_read_short_tail() {
        // 4 bits requested after 6 consumed: only 2 remain.
        let data = vec![0xFF];
        let mut reader = BitReader::new(Cursor::new(data));

        assert_eq!(reader.try_read_bits(6).unwrap(), Some(0x3F));
        assert_eq!(reader.try_read_bits(4).unwrap(), None);
    }

    #[test]
    fn test_read_bits_eof_error() {
        let mut reader = BitReader::new(Cursor::new(Vec::<u8>::new()));
        let err = reader.read_bits(1).unwrap_err();
        assert!(matches!(err, HuffError::UnexpectedEof { bit_position: 0 }));
    }

    #[test]
    fn test_reset() {
        let data = vec![0x12, 0x34];
        let mut reader = BitReader::new(Cursor::new(data));

        assert_eq!(reader.read_bits(12).unwrap(), 0x123);
        reader.reset().unwrap();
        assert_eq!(reader.bits_read(), 0);
        assert_eq!(reader.read_bits(8).unwrap(), 0x12);
        assert_eq!(reader.read_bits(8).unwrap(), 0x34);
    }

    #[test]
    fn test_bitwriter_basic() {
        let mut output = Vec::new();
        {
            let mut writer = BitWriter::new(&mut output);
            // Write 0b10110101 bit by bit
            for bit in [true, false, true, true, false, true, false, true] {
                writer.write_bit(bit).unwrap();
            }
            writer.flush().unwrap();
        }
        assert_eq!(output, vec![0xB5]);
    }

    #[test]
    fn test_bitwriter_multi_bits() {
        let mut output = Vec::new();
        {
            let mut writer = BitWriter::new(&mut output);
            writer.write_bits(0b101, 3).unwrap();
            writer.write_bits(0b11001, 5).unwrap();
            writer.flush().unwrap();
        }
        // 101 then 11001 -> 101_11001
        assert_eq!(output, vec![0b1011_1001]);
    }

    #[test]
    fn test_bitwriter_padding() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(0b1, 1).unwrap();
        writer.write_bits(0x1FF, 9).unwrap();
        assert_eq!(writer.bits_written(), 10);

        let output = writer.into_inner().unwrap();
        assert_eq!(output, vec![0xFF, 0xC0]);
    }

    #[test]
    fn test_bitwriter_masks_high_bits() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(0xFFFF_FF0F, 4).unwrap();
        writer.write_bits(0, 4).unwrap();
        assert_eq!(writer.into_inner().unwrap(), vec![0xF0]);
    }

    #[test]
    fn test_roundtrip() {
        let mut output = Vec::new();
        {
            let mut writer = BitWriter::new(&mut output);
            writer.write_bits(0b101, 3).unwrap();
            writer.write_bits(0b1111, 4).unwrap();
            writer.write_bits(0b10, 2).unwrap();
            writer.write_bits(0b110011, 6).unwrap();
            writer.write_bits(0xDEADBEEF, 32).unwrap();
            writer.flush().unwrap();
        }

        let mut reader = BitReader::new(Cursor::new(&output));
        assert_eq!(reader.read_bits(3).unwrap(), 0b101);
        assert_eq!(reader.read_bits(4).unwrap(), 0b1111);
        assert_eq!(reader.read_bits(2).unwrap(), 0b10);
        assert_eq!(reader.read_bits(6).unwrap(), 0b110011);
        assert_eq!(reader.read_bits(32).unwrap(), 0xDEADBEEF);
    }
}

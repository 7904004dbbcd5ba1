//! Byte frequency counting (the first compression pass).

use oxihuff_core::BitReader;
use oxihuff_core::error::Result;
use std::io::Read;

/// Number of distinct byte values.
pub const ALPHABET_SIZE: usize = 256;

/// Bits per input symbol.
pub const BITS_PER_WORD: u8 = 8;

/// Occurrence count of every byte value in one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; ALPHABET_SIZE],
    total: u64,
}

impl FrequencyTable {
    /// Create an all-zero table.
    pub fn new() -> Self {
        Self {
            counts: [0; ALPHABET_SIZE],
            total: 0,
        }
    }

    /// Count the bytes of an in-memory slice.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        for &byte in data {
            table.record(byte);
        }
        table
    }

    /// Record one occurrence of `byte`.
    #[inline]
    pub fn record(&mut self, byte: u8) {
        self.counts[byte as usize] += 1;
        self.total += 1;
    }

    /// Count for a single byte value.
    pub fn count(&self, byte: u8) -> u64 {
        self.counts[byte as usize]
    }

    /// Total number of bytes counted.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of byte values that occur at least once.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Whether nothing was counted.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Iterate `(byte, count)` pairs with non-zero counts, in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(|(b, &c)| (b as u8, c))
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl From<[u64; ALPHABET_SIZE]> for FrequencyTable {
    fn from(counts: [u64; ALPHABET_SIZE]) -> Self {
        let total = counts.iter().sum();
        Self { counts, total }
    }
}

/// Read 8-bit symbols until the source reports end of data.
///
/// The source is consumed entirely; rewind it before reading it again.
pub fn count_frequencies<R: Read>(reader: &mut BitReader<R>) -> Result<FrequencyTable> {
    let mut table = FrequencyTable::new();
    while let Some(value) = reader.try_read_bits(BITS_PER_WORD)? {
        table.record(value as u8);
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_count_from_reader() {
        let mut reader = BitReader::new(Cursor::new(b"abracadabra".to_vec()));
        let table = count_frequencies(&mut reader).unwrap();

        assert_eq!(table.count(b'a'), 5);
        assert_eq!(table.count(b'b'), 2);
        assert_eq!(table.count(b'r'), 2);
        assert_eq!(table.count(b'c'), 1);
        assert_eq!(table.count(b'd'), 1);
        assert_eq!(table.count(b'z'), 0);
        assert_eq!(table.total(), 11);
        assert_eq!(table.distinct(), 5);
    }

    #[test]
    fn test_count_consumes_source() {
        let mut reader = BitReader::new(Cursor::new(vec![1, 2, 3]));
        count_frequencies(&mut reader).unwrap();
        assert_eq!(reader.try_read_bits(8).unwrap(), None);

        reader.reset().unwrap();
        assert_eq!(reader.try_read_bits(8).unwrap(), Some(1));
    }

    #[test]
    fn test_empty_input() {
        let mut reader = BitReader::new(Cursor::new(Vec::new()));
        let table = count_frequencies(&mut reader).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.iter().count(), 0);
    }

    #[test]
    fn test_matches_slice_count() {
        let data: Vec<u8> = (0..=255u8).chain(0..10).collect();
        let mut reader = BitReader::new(Cursor::new(data.clone()));
        assert_eq!(
            count_frequencies(&mut reader).unwrap(),
            FrequencyTable::from_bytes(&data)
        );
    }

    #[test]
    fn test_iter_ascending() {
        let table = FrequencyTable::from_bytes(b"zyxa");
        let bytes: Vec<u8> = table.iter().map(|(b, _)| b).collect();
        assert_eq!(bytes, vec![b'a', b'x', b'y', b'z']);
    }
}

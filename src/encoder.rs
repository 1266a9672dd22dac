//! Bit-packing encoder
//!
//! Serializes each record as the concatenation of its symbols' codes plus
//! the terminator code, packed most-significant-bit first into 64-bit
//! words. A code that straddles a word boundary is split: the high portion
//! completes the current word and the remainder seeds the next. Each record
//! is flushed and zero-padded to a whole word, and the number of words it
//! consumed is recorded as its bound.

use crate::codebook::{Code, CodeBook};
use crate::error::{HuffpackError, Result};
use crate::frequency::TERMINATOR;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Width in bits of one packed storage word
pub const WORD_BITS: u32 = 64;

/// A batch of records in packed form.
///
/// `words` holds every record's bits back to back; `bounds` holds the
/// number of consecutive words belonging to each record, in record order.
/// The bounds always sum to the word count.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EncodedBlock {
    words: Vec<u64>,
    bounds: Vec<u32>,
}

impl EncodedBlock {
    pub(crate) fn from_parts(words: Vec<u64>, bounds: Vec<u32>) -> Self {
        Self { words, bounds }
    }

    /// The packed storage words
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    /// Per-record word counts, in record order
    pub fn bounds(&self) -> &[u32] {
        &self.bounds
    }

    /// Number of records in the block
    pub fn record_count(&self) -> usize {
        self.bounds.len()
    }

    /// Total number of storage words
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Encoded payload size in bytes
    pub fn encoded_bytes(&self) -> usize {
        self.words.len() * (WORD_BITS as usize / 8)
    }
}

/// Packs batches of records against a shared code book.
#[derive(Debug, Clone, Copy)]
pub struct BlockEncoder<'a> {
    book: &'a CodeBook,
}

impl<'a> BlockEncoder<'a> {
    /// Create an encoder over a code book
    pub fn new(book: &'a CodeBook) -> Self {
        Self { book }
    }

    /// Encode a batch of records into a packed block.
    ///
    /// Every byte occurring in the records must have a code in the book,
    /// which holds whenever the book was built from the same batch. Records
    /// must not contain the reserved terminator byte.
    pub fn encode<R: AsRef<[u8]>>(&self, records: &[R]) -> Result<EncodedBlock> {
        let mut words = Vec::new();
        let mut bounds = Vec::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            let bound = self.encode_record(record.as_ref(), index, &mut words)?;
            bounds.push(bound);
        }

        Ok(EncodedBlock::from_parts(words, bounds))
    }

    /// Encode one record, appending its words to `words` and returning how
    /// many words it consumed.
    pub(crate) fn encode_record(
        &self,
        record: &[u8],
        index: usize,
        words: &mut Vec<u64>,
    ) -> Result<u32> {
        let start = words.len();
        let mut word = 0u64;
        let mut free = WORD_BITS;

        for &byte in record {
            if byte == TERMINATOR {
                return Err(HuffpackError::invalid_data(format!(
                    "record {} contains the reserved terminator byte",
                    index
                )));
            }
            let code = self.book.code(byte).ok_or_else(|| {
                HuffpackError::invalid_data(format!(
                    "symbol {} in record {} has no code",
                    byte, index
                ))
            })?;
            push_code(code, &mut word, &mut free, words);
        }

        let terminator = self.book.code(TERMINATOR).ok_or_else(|| {
            HuffpackError::invalid_data("code book has no terminator code")
        })?;
        push_code(terminator, &mut word, &mut free, words);

        // Zero-pad the unused low bits and flush, unless the terminator
        // landed exactly on the word boundary.
        if free < WORD_BITS {
            words.push(word << free);
        }

        Ok((words.len() - start) as u32)
    }
}

/// Append one code to the bitstream, splitting across the word boundary
/// when it does not fit.
#[inline]
fn push_code(code: Code, word: &mut u64, free: &mut u32, words: &mut Vec<u64>) {
    let len = u32::from(code.len);
    if *free >= len {
        *word = (*word << len) | u64::from(code.value);
        *free -= len;
    } else {
        let spill = len - *free;
        *word = (*word << *free) | u64::from(code.value >> spill);
        words.push(*word);
        *word = u64::from(code.value) & ((1u64 << spill) - 1);
        *free = WORD_BITS - spill;
    }
    if *free == 0 {
        words.push(*word);
        *word = 0;
        *free = WORD_BITS;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(records: &[&[u8]]) -> (CodeBook, EncodedBlock) {
        let book = CodeBook::from_records(records).unwrap();
        let block = BlockEncoder::new(&book).encode(records).unwrap();
        (book, block)
    }

    #[test]
    fn test_bounds_sum_to_word_count() {
        let (_, block) = encode(&[b"aaab", b"ab", b"", b"bbbbbbbb"]);
        let total: u32 = block.bounds().iter().sum();
        assert_eq!(total as usize, block.word_count());
        assert_eq!(block.record_count(), 4);
    }

    #[test]
    fn test_short_batch_fits_one_word_per_record() {
        // a=4, b=2, terminator=2: codes are 1-2 bits, both records fit
        // well within 64 bits
        let (_, block) = encode(&[b"aaab", b"ab"]);
        assert_eq!(block.bounds(), &[1, 1]);
        assert_eq!(block.word_count(), 2);
    }

    #[test]
    fn test_exact_word_fill_wastes_nothing() {
        // Two 1-bit codes (symbol + terminator): 63 bytes of content plus
        // the terminator is exactly 64 bits
        let record = vec![b'x'; 63];
        let records: Vec<&[u8]> = vec![&record];
        let (book, block) = encode(&records);
        assert_eq!(book.code(b'x').unwrap().len, 1);
        assert_eq!(block.bounds(), &[1]);
    }

    #[test]
    fn test_one_bit_overflow_takes_extra_word() {
        let record = vec![b'x'; 64];
        let records: Vec<&[u8]> = vec![&record];
        let (_, block) = encode(&records);
        assert_eq!(block.bounds(), &[2]);
        // 65 bits used: the second word carries one bit then zero padding
        assert_eq!(block.words()[1] & ((1u64 << 63) - 1), 0);
    }

    #[test]
    fn test_records_never_share_words() {
        let (_, block) = encode(&[b"aa", b"aa", b"aa"]);
        // Each tiny record still occupies its own word
        assert_eq!(block.bounds(), &[1, 1, 1]);
    }

    #[test]
    fn test_empty_record_is_terminator_only() {
        let (book, block) = encode(&[b"", b"a"]);
        let terminator = book.code(crate::frequency::TERMINATOR).unwrap();
        assert_eq!(block.bounds()[0], 1);
        // The record's word is the terminator code left-aligned
        let expected = u64::from(terminator.value) << (64 - u32::from(terminator.len));
        assert_eq!(block.words()[0], expected);
    }

    #[test]
    fn test_terminator_byte_in_record_rejected() {
        let records: Vec<&[u8]> = vec![b"ok"];
        let book = CodeBook::from_records(&records).unwrap();
        let bad: Vec<&[u8]> = vec![b"not\x00ok"];
        let err = BlockEncoder::new(&book).encode(&bad).unwrap_err();
        assert_eq!(err.category(), "data");
    }

    #[test]
    fn test_uncovered_symbol_rejected() {
        let records: Vec<&[u8]> = vec![b"aaa"];
        let book = CodeBook::from_records(&records).unwrap();
        let bad: Vec<&[u8]> = vec![b"abc"];
        let err = BlockEncoder::new(&book).encode(&bad).unwrap_err();
        let message = format!("{}", err);
        assert!(message.contains("no code"), "got: {}", message);
    }
}

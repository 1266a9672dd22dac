//! Table-driven decoder
//!
//! Rebuilds records from a packed block without walking the tree bit by
//! bit. Construction expands the code book into a dense table indexed by a
//! fixed-width window of upcoming bits: a code of length `l` fills the
//! `2^(window - l)` slots whose high `l` bits equal the code. Because the
//! code set is complete, every window value maps to exactly one code as
//! long as no code is longer than the window.

use crate::codebook::CodeBook;
use crate::encoder::EncodedBlock;
use crate::error::{HuffpackError, Result};
use crate::frequency::TERMINATOR;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Widest supported lookup window; bounds table memory at `2^24` slots
pub const MAX_WINDOW_BITS: u8 = 24;

/// Default lookup window width in bits
pub const DEFAULT_WINDOW_BITS: u8 = 13;

/// Lookup window configuration for [`LookupDecoder`] construction.
///
/// The window must be at least as wide as the longest code in the book;
/// this is validated when the decoder is built rather than discovered as a
/// mis-decode later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecoderConfig {
    /// Number of upcoming bits inspected per table lookup
    pub window_bits: u8,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            window_bits: DEFAULT_WINDOW_BITS,
        }
    }
}

impl DecoderConfig {
    /// Small table for memory-constrained use; rejects longer codes sooner
    pub fn compact() -> Self {
        Self { window_bits: 11 }
    }

    /// Wide window for skewed distributions with long tail codes
    pub fn wide() -> Self {
        Self { window_bits: 16 }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.window_bits == 0 || self.window_bits > MAX_WINDOW_BITS {
            return Err(HuffpackError::configuration(format!(
                "window width {} outside 1..={}",
                self.window_bits, MAX_WINDOW_BITS
            )));
        }
        Ok(())
    }
}

/// One table slot: the decoded symbol and how many bits its code consumed.
/// `bits == 0` marks a slot no code maps to.
#[derive(Debug, Clone, Copy)]
struct LookupSlot {
    symbol: u8,
    bits: u8,
}

impl LookupSlot {
    const UNFILLED: Self = Self { symbol: 0, bits: 0 };
}

/// A window-indexed decoder for blocks produced with the same code book.
///
/// The table is built once and is immutable afterwards, so one decoder can
/// serve any number of concurrent decode calls.
#[derive(Debug, Clone)]
pub struct LookupDecoder {
    table: Vec<LookupSlot>,
    window_bits: u8,
}

impl LookupDecoder {
    /// Expand a code book into a lookup table.
    ///
    /// Fails with a configuration error if the book's longest code does
    /// not fit the configured window.
    pub fn new(book: &CodeBook, config: DecoderConfig) -> Result<Self> {
        config.validate()?;
        let window = config.window_bits;
        if book.max_code_len() > window {
            return Err(HuffpackError::configuration(format!(
                "max code length {} exceeds the {} bit lookup window",
                book.max_code_len(),
                window
            )));
        }

        let mut table = vec![LookupSlot::UNFILLED; 1usize << window];
        for (symbol, code) in book.iter() {
            let fill = window - code.len;
            let start = (code.value as usize) << fill;
            let slot = LookupSlot {
                symbol,
                bits: code.len,
            };
            for entry in &mut table[start..start + (1usize << fill)] {
                *entry = slot;
            }
        }

        log::debug!(
            "built {}-bit lookup table for {} codes",
            window,
            book.len()
        );

        Ok(Self {
            table,
            window_bits: window,
        })
    }

    /// Configured window width in bits
    pub fn window_bits(&self) -> u8 {
        self.window_bits
    }

    /// Reconstruct every record of a block, in order.
    pub fn decode(&self, block: &EncodedBlock) -> Result<Vec<Vec<u8>>> {
        let words = block.words();
        let total: u64 = block.bounds().iter().map(|&b| u64::from(b)).sum();
        if total != words.len() as u64 {
            return Err(HuffpackError::invalid_data(format!(
                "bounds cover {} words but the block has {}",
                total,
                words.len()
            )));
        }

        let mut records = Vec::with_capacity(block.record_count());
        let mut offset = 0usize;
        for (index, &bound) in block.bounds().iter().enumerate() {
            let end = offset + bound as usize;
            records.push(self.decode_record(&words[offset..end], index)?);
            offset = end;
        }
        Ok(records)
    }

    /// Decode a single record from its word slice.
    ///
    /// Bits are consumed most-significant first; leftover bits of the
    /// current word carry across word boundaries exactly as the encoder
    /// produced them. Decoding stops at the terminator and discards the
    /// record's remaining padding bits.
    pub(crate) fn decode_record(&self, words: &[u64], index: usize) -> Result<Vec<u8>> {
        let window = u32::from(self.window_bits);
        let mask = (1usize << window) - 1;

        // Low `pending` bits of `buffer` are the not-yet-decoded bits of
        // the stream, most-significant first. Refilled a word at a time,
        // so it never holds more than window - 1 + 64 bits.
        let mut buffer = 0u128;
        let mut pending = 0u32;
        let mut next = words.iter();
        let mut output = Vec::new();

        loop {
            while pending < window {
                match next.next() {
                    Some(&word) => {
                        buffer = (buffer << WORD_REFILL) | u128::from(word);
                        pending += WORD_REFILL;
                    }
                    None => break,
                }
            }
            if pending == 0 {
                // Ran out of bits without seeing the terminator
                return Err(HuffpackError::desynchronized(index));
            }

            // Near the record's end the window may reach past the final
            // word; the missing positions read as the encoder's zero
            // padding. The slot consulted depends only on the code's own
            // bits, so the fill value cannot change the outcome.
            let slot_index = if pending >= window {
                ((buffer >> (pending - window)) as usize) & mask
            } else {
                ((buffer << (window - pending)) as usize) & mask
            };

            let slot = self.table[slot_index];
            if slot.bits == 0 {
                return Err(HuffpackError::desynchronized(index));
            }
            if slot.symbol == TERMINATOR {
                return Ok(output);
            }
            let consumed = u32::from(slot.bits);
            if consumed > pending {
                return Err(HuffpackError::desynchronized(index));
            }
            pending -= consumed;
            buffer &= (1u128 << pending) - 1;
            output.push(slot.symbol);
        }
    }
}

const WORD_REFILL: u32 = crate::encoder::WORD_BITS;

//! High-level codec facade
//!
//! Ties the pipeline together: frequency analysis, tree construction, and
//! code assignment at build time; packed encoding and table-driven decoding
//! afterwards. The code table and derived lookup table are immutable, so a
//! codec can be shared freely once built.

use crate::codebook::CodeBook;
use crate::decoder::{DecoderConfig, LookupDecoder};
use crate::encoder::{BlockEncoder, EncodedBlock};
use crate::error::Result;
use crate::frequency::FrequencyTable;
use crate::stats::CompressionStats;

/// A static Huffman codec trained on one batch of records.
#[derive(Debug, Clone)]
pub struct HuffmanCodec {
    book: CodeBook,
    config: DecoderConfig,
    entropy: f64,
}

impl HuffmanCodec {
    /// Train a codec from a batch of records with the default lookup window.
    ///
    /// The batch must contain at least one record and no record may
    /// contain the reserved terminator byte.
    pub fn from_records<R: AsRef<[u8]>>(records: &[R]) -> Result<Self> {
        Self::with_config(records, DecoderConfig::default())
    }

    /// Train a codec with an explicit decoder configuration.
    ///
    /// The window width is checked against the longest assigned code here,
    /// at build time, so an undecodable table is rejected before anything
    /// is encoded with it.
    pub fn with_config<R: AsRef<[u8]>>(records: &[R], config: DecoderConfig) -> Result<Self> {
        let frequencies = FrequencyTable::from_records(records)?;
        let book = CodeBook::from_frequencies(&frequencies)?;
        let codec = Self {
            entropy: frequencies.entropy(),
            book,
            config,
        };
        // Surface window misconfiguration immediately
        codec.decoder()?;
        Ok(codec)
    }

    /// Reassemble a codec around a deserialized code book.
    pub fn from_code_book(book: CodeBook, config: DecoderConfig) -> Result<Self> {
        let codec = Self {
            book,
            config,
            entropy: 0.0,
        };
        codec.decoder()?;
        Ok(codec)
    }

    /// The code book this codec encodes and decodes with
    pub fn code_book(&self) -> &CodeBook {
        &self.book
    }

    /// Encode a batch of records into a packed block
    pub fn encode<R: AsRef<[u8]>>(&self, records: &[R]) -> Result<EncodedBlock> {
        BlockEncoder::new(&self.book).encode(records)
    }

    /// Reconstruct every record of a block, in order.
    ///
    /// Builds a fresh lookup table per call; use [`HuffmanCodec::decoder`]
    /// to build it once when decoding repeatedly.
    pub fn decode(&self, block: &EncodedBlock) -> Result<Vec<Vec<u8>>> {
        self.decoder()?.decode(block)
    }

    /// Build the reusable lookup decoder for this codec's table
    pub fn decoder(&self) -> Result<LookupDecoder> {
        LookupDecoder::new(&self.book, self.config)
    }

    /// Statistics for a batch this codec encoded
    pub fn stats<R: AsRef<[u8]>>(&self, records: &[R], block: &EncodedBlock) -> CompressionStats {
        let input_bytes = records.iter().map(|r| r.as_ref().len()).sum();
        CompressionStats::new(input_bytes, block.encoded_bytes(), self.entropy)
    }
}

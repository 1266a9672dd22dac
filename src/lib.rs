//! # Huffpack: Static Batch Huffman Compression
//!
//! This crate compresses batches of byte records with a single shared
//! Huffman table: frequencies are gathered across the whole batch, one
//! prefix-free code table is derived, and every record is packed into a
//! 64-bit-word bitstream that decodes back losslessly through a dense
//! lookup table instead of per-bit tree walks.
//!
//! ## Key Features
//!
//! - **Shared code table**: one frequency pass and one Huffman tree per
//!   batch, with a reserved end-of-record terminator symbol
//! - **Word-packed bitstreams**: codes packed most-significant-bit first
//!   into `u64` words with exact per-record word bounds
//! - **Table-driven decoding**: a configurable fixed-width lookup window
//!   resolves one symbol per table hit, validated against the longest
//!   code at construction time
//! - **Per-record parallelism**: batch encode and decode fan out across
//!   threads over the shared immutable tables
//! - **Table persistence**: compact binary serialization for code books,
//!   optional serde support for encoded blocks
//!
//! ## Quick Start
//!
//! ```rust
//! use huffpack::HuffmanCodec;
//!
//! let records: Vec<&[u8]> = vec![b"aaab", b"ab"];
//!
//! let codec = HuffmanCodec::from_records(&records).unwrap();
//! let block = codec.encode(&records).unwrap();
//! let decoded = codec.decode(&block).unwrap();
//!
//! assert_eq!(decoded, vec![b"aaab".to_vec(), b"ab".to_vec()]);
//!
//! let stats = codec.stats(&records, &block);
//! println!("ratio: {:.2}", stats.compression_ratio);
//! ```
//!
//! Records are NUL-free byte sequences; the NUL byte is reserved as the
//! per-record terminator. A batch must contain at least one record.

#![warn(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod codebook;
pub mod codec;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod frequency;
pub mod parallel;
pub mod stats;
pub mod tree;

// Re-export core types
pub use codebook::{Code, CodeBook, MAX_CODE_BITS};
pub use codec::HuffmanCodec;
pub use decoder::{DecoderConfig, LookupDecoder, DEFAULT_WINDOW_BITS, MAX_WINDOW_BITS};
pub use encoder::{BlockEncoder, EncodedBlock, WORD_BITS};
pub use error::{HuffpackError, Result};
pub use frequency::{FrequencyTable, TERMINATOR};
pub use parallel::{decode_block_parallel, encode_records_parallel, ParallelConfig};
pub use stats::CompressionStats;
pub use tree::HuffmanTree;

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library (currently no-op, for future use)
pub fn init() {
    log::debug!("Initializing huffpack v{}", VERSION);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info() {
        init();
        assert!(VERSION.contains('.'));
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2);
    }

    #[test]
    fn test_re_exports() {
        let records: Vec<&[u8]> = vec![b"re-export check"];
        let table = FrequencyTable::from_records(&records).unwrap();
        let tree = HuffmanTree::from_frequencies(&table).unwrap();
        let book = CodeBook::from_tree(&tree).unwrap();
        assert!(book.code(TERMINATOR).is_some());

        let err = HuffpackError::invalid_data("test");
        assert_eq!(err.category(), "data");
        assert!(std::any::type_name::<Result<()>>().contains("HuffpackError"));
    }
}

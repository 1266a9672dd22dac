//! Parallel batch encoding and decoding
//!
//! Every record's bit-packing depends only on the shared immutable code
//! book, and every record's reconstruction depends only on the prebuilt
//! lookup table, so batches split cleanly across threads. Records are
//! chunked contiguously, each chunk runs on its own scoped thread, and the
//! per-chunk outputs are stitched back together in input order, making the
//! result bit-identical to the serial path.

use crate::codebook::CodeBook;
use crate::decoder::LookupDecoder;
use crate::encoder::{BlockEncoder, EncodedBlock};
use crate::error::{HuffpackError, Result};
use std::ops::Range;
use std::thread;

/// Configuration for parallel batch operations
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    /// Number of worker threads
    pub num_threads: usize,
    /// Batches smaller than this run serially
    pub min_parallel_records: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            num_threads: 4,
            min_parallel_records: 64,
        }
    }
}

impl ParallelConfig {
    /// Configuration optimized for throughput on large batches
    pub fn high_throughput() -> Self {
        Self {
            num_threads: 8,
            min_parallel_records: 128,
        }
    }

    /// Configuration with minimal thread overhead for small batches
    pub fn low_latency() -> Self {
        Self {
            num_threads: 2,
            min_parallel_records: 16,
        }
    }
}

/// Split `len` items into up to `pieces` contiguous ranges of near-equal
/// size, the remainder spread over the leading ranges.
fn chunk_ranges(len: usize, pieces: usize) -> Vec<Range<usize>> {
    if len == 0 {
        return Vec::new();
    }
    let pieces = pieces.max(1).min(len);
    let chunk = len / pieces;
    let remainder = len % pieces;

    let mut ranges = Vec::with_capacity(pieces);
    let mut start = 0;
    for i in 0..pieces {
        let size = chunk + usize::from(i < remainder);
        ranges.push(start..start + size);
        start += size;
    }
    ranges
}

/// Encode a batch across threads, producing the same block as
/// [`BlockEncoder::encode`].
pub fn encode_records_parallel<R: AsRef<[u8]> + Sync>(
    records: &[R],
    book: &CodeBook,
    config: &ParallelConfig,
) -> Result<EncodedBlock> {
    let encoder = BlockEncoder::new(book);
    if records.len() < config.min_parallel_records || config.num_threads <= 1 {
        return encoder.encode(records);
    }

    let ranges = chunk_ranges(records.len(), config.num_threads);
    let results: Vec<Result<(Vec<u64>, Vec<u32>)>> = thread::scope(|scope| {
        let handles: Vec<_> = ranges
            .into_iter()
            .map(|range| {
                scope.spawn(move || {
                    let mut words = Vec::new();
                    let mut bounds = Vec::with_capacity(range.len());
                    for index in range {
                        let bound =
                            encoder.encode_record(records[index].as_ref(), index, &mut words)?;
                        bounds.push(bound);
                    }
                    Ok((words, bounds))
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("encoder thread panicked"))
            .collect()
    });

    let mut words = Vec::new();
    let mut bounds = Vec::with_capacity(records.len());
    for result in results {
        let (chunk_words, chunk_bounds) = result?;
        words.extend_from_slice(&chunk_words);
        bounds.extend_from_slice(&chunk_bounds);
    }
    Ok(EncodedBlock::from_parts(words, bounds))
}

/// Decode a block across threads, producing the same records as
/// [`LookupDecoder::decode`].
pub fn decode_block_parallel(
    block: &EncodedBlock,
    decoder: &LookupDecoder,
    config: &ParallelConfig,
) -> Result<Vec<Vec<u8>>> {
    if block.record_count() < config.min_parallel_records || config.num_threads <= 1 {
        return decoder.decode(block);
    }

    let words = block.words();
    let bounds = block.bounds();
    let total: u64 = bounds.iter().map(|&bound| u64::from(bound)).sum();
    if total != words.len() as u64 {
        return Err(HuffpackError::invalid_data(format!(
            "bounds cover {} words but the block has {}",
            total,
            words.len()
        )));
    }

    let mut offsets = Vec::with_capacity(bounds.len());
    let mut offset = 0usize;
    for &bound in bounds {
        offsets.push(offset);
        offset += bound as usize;
    }
    let offsets = &offsets;

    let ranges = chunk_ranges(bounds.len(), config.num_threads);
    let results: Vec<Result<Vec<Vec<u8>>>> = thread::scope(|scope| {
        let handles: Vec<_> = ranges
            .into_iter()
            .map(|range| {
                scope.spawn(move || {
                    let mut decoded = Vec::with_capacity(range.len());
                    for index in range {
                        let start = offsets[index];
                        let end = start + bounds[index] as usize;
                        decoded.push(decoder.decode_record(&words[start..end], index)?);
                    }
                    Ok(decoded)
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("decoder thread panicked"))
            .collect()
    });

    let mut records = Vec::with_capacity(bounds.len());
    for result in results {
        records.extend(result?);
    }
    Ok(records)
}

//! Statistics for compression operations

/// Derived quantities describing one encode of a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionStats {
    /// Original size in bytes, terminators excluded
    pub input_bytes: usize,
    /// Packed size in bytes (whole words, padding included)
    pub encoded_bytes: usize,
    /// Compression ratio (encoded/input)
    pub compression_ratio: f64,
    /// Bits of output per input symbol
    pub bits_per_symbol: f64,
    /// Shannon entropy of the batch distribution
    pub entropy: f64,
    /// Encoding efficiency (theoretical / actual)
    pub efficiency: f64,
}

impl CompressionStats {
    /// Compute statistics from raw sizes and the batch entropy
    pub fn new(input_bytes: usize, encoded_bytes: usize, entropy: f64) -> Self {
        let compression_ratio = if input_bytes > 0 {
            encoded_bytes as f64 / input_bytes as f64
        } else {
            0.0
        };

        let bits_per_symbol = if input_bytes > 0 {
            (encoded_bytes * 8) as f64 / input_bytes as f64
        } else {
            0.0
        };

        let efficiency = if bits_per_symbol > 0.0 {
            entropy / bits_per_symbol
        } else {
            0.0
        };

        Self {
            input_bytes,
            encoded_bytes,
            compression_ratio,
            bits_per_symbol,
            entropy,
            efficiency,
        }
    }

    /// Space savings as a percentage of the input size
    pub fn space_savings(&self) -> f64 {
        (1.0 - self.compression_ratio) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_calculation() {
        let stats = CompressionStats::new(1000, 600, 4.5);
        assert_eq!(stats.input_bytes, 1000);
        assert_eq!(stats.encoded_bytes, 600);
        assert!((stats.compression_ratio - 0.6).abs() < 0.001);
        assert!((stats.bits_per_symbol - 4.8).abs() < 0.001);
        assert!((stats.efficiency - 0.9375).abs() < 0.001);
        assert!((stats.space_savings() - 40.0).abs() < 0.001);
    }

    #[test]
    fn test_stats_zero_input() {
        let stats = CompressionStats::new(0, 8, 0.0);
        assert_eq!(stats.compression_ratio, 0.0);
        assert_eq!(stats.bits_per_symbol, 0.0);
        assert_eq!(stats.efficiency, 0.0);
    }
}

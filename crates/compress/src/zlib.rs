//! Streaming zlib compressor

use flate2::{Compress, Compression, Decompress, FlushCompress, FlushDecompress, Status};
use hexsphere_core::hex::{self, HexError};
use hexsphere_core::CompressionConfig;
use thiserror::Error;
use tracing::{debug, warn};

/// Compression errors
#[derive(Error, Debug)]
pub enum CompressionError {
    #[error("Invalid compressed encoding: {0}")]
    Format(#[from] HexError),
    #[error("Compressor initialization failed: {0}")]
    Initialization(String),
    #[error("Compression failed: {0}")]
    Compression(String),
    #[error("Decompression failed: {0}")]
    Decompression(String),
    #[error("Decompressed output exceeds {limit} bytes")]
    OutputLimit { limit: usize },
}

pub type CompressionResult<T> = std::result::Result<T, CompressionError>;

/// Zlib compressor with a fixed streaming buffer
///
/// Codec state is created per call, so one instance can serve any number of
/// sequential operations.
#[derive(Debug, Clone, Default)]
pub struct Compressor {
    config: CompressionConfig,
}

impl Compressor {
    /// Create a compressor, rejecting levels above 9 and zero-sized buffers or limits
    pub fn new(config: CompressionConfig) -> CompressionResult<Self> {
        if config.level > 9 {
            return Err(CompressionError::Initialization(format!(
                "level must be 0-9, got {}",
                config.level
            )));
        }
        if config.chunk_size == 0 {
            return Err(CompressionError::Initialization(
                "chunk size must be non-zero".to_string(),
            ));
        }
        if config.max_output_bytes == 0 {
            return Err(CompressionError::Initialization(
                "output limit must be non-zero".to_string(),
            ));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &CompressionConfig {
        &self.config
    }

    /// Deflate `data` into a complete zlib stream
    pub fn compress_bytes(&self, data: &[u8]) -> CompressionResult<Vec<u8>> {
        let mut encoder = Compress::new(Compression::new(self.config.level), true);
        let mut chunk = vec![0u8; self.config.chunk_size];
        let mut out = Vec::new();

        loop {
            let consumed = encoder.total_in() as usize;
            let before = encoder.total_out();

            let status = encoder
                .compress(&data[consumed..], &mut chunk, FlushCompress::Finish)
                .map_err(|e| CompressionError::Compression(e.to_string()))?;

            let produced = (encoder.total_out() - before) as usize;
            out.extend_from_slice(&chunk[..produced]);

            match status {
                Status::StreamEnd => break,
                Status::Ok => {}
                Status::BufError => {
                    if produced == 0 && encoder.total_in() as usize == consumed {
                        return Err(CompressionError::Compression(
                            "stream stalled before completion".to_string(),
                        ));
                    }
                }
            }
        }

        debug!(
            input_len = data.len(),
            output_len = out.len(),
            level = self.config.level,
            "compressed buffer"
        );
        Ok(out)
    }

    /// Inflate a complete zlib stream
    pub fn decompress_bytes(&self, data: &[u8]) -> CompressionResult<Vec<u8>> {
        let limit = self.config.max_output_bytes;
        let mut decoder = Decompress::new(true);
        let mut chunk = vec![0u8; self.config.chunk_size];
        let mut out = Vec::new();

        loop {
            let consumed = decoder.total_in() as usize;
            let before = decoder.total_out();

            let status = decoder
                .decompress(&data[consumed..], &mut chunk, FlushDecompress::None)
                .map_err(|e| CompressionError::Decompression(e.to_string()))?;

            let produced = (decoder.total_out() - before) as usize;
            if out.len() + produced > limit {
                warn!(limit, "decompressed output exceeded limit");
                return Err(CompressionError::OutputLimit { limit });
            }
            out.extend_from_slice(&chunk[..produced]);

            if status == Status::StreamEnd {
                break;
            }
            if produced == 0 && decoder.total_in() as usize == consumed {
                return Err(CompressionError::Decompression(
                    "truncated stream".to_string(),
                ));
            }
        }

        if (decoder.total_in() as usize) < data.len() {
            return Err(CompressionError::Decompression("trailing data".to_string()));
        }

        debug!(
            input_len = data.len(),
            output_len = out.len(),
            "decompressed buffer"
        );
        Ok(out)
    }

    /// Compress and hex-encode
    pub fn compress(&self, data: &[u8]) -> CompressionResult<String> {
        Ok(hex::encode(self.compress_bytes(data)?))
    }

    /// Hex-decode and decompress
    pub fn decompress(&self, hex_compressed: &str) -> CompressionResult<Vec<u8>> {
        let compressed = hex::decode(hex_compressed)?;
        self.decompress_bytes(&compressed)
    }
}

/// Compressed size over original size; `0.0` for an empty original
pub fn ratio(original: &[u8], compressed: &[u8]) -> f64 {
    if original.is_empty() {
        return 0.0;
    }
    compressed.len() as f64 / original.len() as f64
}

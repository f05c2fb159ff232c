//! Compression utilities
//!
//! Deflate streams in the zlib container, produced and consumed through a
//! fixed-size intermediate buffer and carried as lowercase hex.

pub mod zlib;

pub use zlib::{ratio, CompressionError, CompressionResult, Compressor};

//! Core types for the HEX-CyberSphere engine
//!
//! This crate provides the error taxonomy, the byte/hex codec and the
//! engine configuration shared by the crypto and compression crates.

pub mod error;
pub mod hex;
pub mod config;

pub use error::{Error, Result};
pub use hex::{HexError, HexResult};
pub use config::{CompressionConfig, EngineConfig, HashingConfig, LoggingConfig};

//! Engine configuration

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Hash tags the engine knows how to compute
pub const SUPPORTED_HASH_ALGORITHMS: [&str; 4] = ["md5", "sha1", "sha256", "sha512"];

/// Engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Compression settings
    #[serde(default)]
    pub compression: CompressionConfig,
    /// Hashing settings
    #[serde(default)]
    pub hashing: HashingConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Compression configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionConfig {
    /// Deflate level, 0 (store) through 9 (best)
    pub level: u32,
    /// Size of the intermediate streaming buffer in bytes
    pub chunk_size: usize,
    /// Upper bound on decompressed output
    pub max_output_bytes: usize,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            level: 9,
            chunk_size: 32 * 1024,
            max_output_bytes: 64 * 1024 * 1024,
        }
    }
}

/// Hashing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashingConfig {
    /// Algorithm tag used when none is given
    pub default_algorithm: String,
    /// Iterations per benchmark run
    pub benchmark_iterations: u32,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            default_algorithm: "sha256".to_string(),
            benchmark_iterations: 1000,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl EngineConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            serde_json::from_str(&content).map_err(|e| crate::Error::parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| crate::Error::parse(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject values the engine cannot run with
    pub fn validate(&self) -> crate::Result<()> {
        if self.compression.level > 9 {
            return Err(crate::Error::config(format!(
                "compression level must be 0-9, got {}",
                self.compression.level
            )));
        }
        if self.compression.chunk_size == 0 {
            return Err(crate::Error::config("compression chunk_size must be non-zero"));
        }
        if self.compression.max_output_bytes == 0 {
            return Err(crate::Error::config(
                "compression max_output_bytes must be non-zero",
            ));
        }
        if !SUPPORTED_HASH_ALGORITHMS.contains(&self.hashing.default_algorithm.as_str()) {
            return Err(crate::Error::config(format!(
                "unsupported default hash algorithm: {}",
                self.hashing.default_algorithm
            )));
        }
        if self.hashing.benchmark_iterations == 0 {
            return Err(crate::Error::config("benchmark_iterations must be non-zero"));
        }
        Ok(())
    }
}

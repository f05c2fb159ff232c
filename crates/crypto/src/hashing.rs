//! Message digest utilities

use hexsphere_core::hex;
use ::md5::Md5;
use ::sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};
use std::str::FromStr;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, warn};

/// Hashing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashError {
    #[error("Unsupported hash algorithm: {0}")]
    UnsupportedAlgorithm(String),
}

pub type HashResult<T> = std::result::Result<T, HashError>;

/// Hash algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha256,
    Sha512,
}

impl HashAlgorithm {
    /// Every supported algorithm, weakest first
    pub const ALL: [HashAlgorithm; 4] = [
        HashAlgorithm::Md5,
        HashAlgorithm::Sha1,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha512,
    ];

    /// Lowercase tag used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "md5",
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha512 => "sha512",
        }
    }

    /// Digest length in bytes
    pub fn digest_len(&self) -> usize {
        match self {
            HashAlgorithm::Md5 => 16,
            HashAlgorithm::Sha1 => 20,
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha512 => 64,
        }
    }
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HashAlgorithm::Md5 => write!(f, "MD5"),
            HashAlgorithm::Sha1 => write!(f, "SHA-1"),
            HashAlgorithm::Sha256 => write!(f, "SHA-256"),
            HashAlgorithm::Sha512 => write!(f, "SHA-512"),
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = HashError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "md5" => Ok(HashAlgorithm::Md5),
            "sha1" => Ok(HashAlgorithm::Sha1),
            "sha256" => Ok(HashAlgorithm::Sha256),
            "sha512" => Ok(HashAlgorithm::Sha512),
            other => Err(HashError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

/// Hash output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashOutput {
    pub bytes: Vec<u8>,
    pub algorithm: HashAlgorithm,
}

impl HashOutput {
    /// Convert to lowercase hexadecimal string
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    /// Verify against another hash in constant time
    pub fn verify(&self, other: &HashOutput) -> bool {
        self.algorithm == other.algorithm && self.verify_bytes(&other.bytes)
    }

    /// Verify against a hex digest, ignoring case
    pub fn verify_hex(&self, expected: &str) -> bool {
        match hex::decode(expected) {
            Ok(bytes) => self.verify_bytes(&bytes),
            Err(_) => false,
        }
    }

    fn verify_bytes(&self, expected: &[u8]) -> bool {
        if self.bytes.len() != expected.len() {
            return false;
        }
        constant_time_eq::constant_time_eq(&self.bytes, expected)
    }
}

/// Hasher for computing message digests
#[derive(Debug, Clone, Copy)]
pub struct Hasher {
    algorithm: HashAlgorithm,
}

impl Hasher {
    /// Create a new hasher with the specified algorithm
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self { algorithm }
    }

    /// Get the algorithm
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Hash data
    pub fn hash(&self, data: &[u8]) -> HashOutput {
        let bytes = match self.algorithm {
            HashAlgorithm::Md5 => Md5::digest(data).to_vec(),
            HashAlgorithm::Sha1 => Sha1::digest(data).to_vec(),
            HashAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
            HashAlgorithm::Sha512 => Sha512::digest(data).to_vec(),
        };

        HashOutput {
            bytes,
            algorithm: self.algorithm,
        }
    }

    /// Mean microseconds per hex digest over `iterations` sequential runs
    pub fn benchmark(&self, data: &[u8], iterations: u32) -> f64 {
        let average = mean_micros(iterations, || {
            std::hint::black_box(self.hash(std::hint::black_box(data)).to_hex());
        });
        debug!(
            algorithm = self.algorithm.as_str(),
            iterations,
            average_us = average,
            "hash benchmark finished"
        );
        average
    }

    /// Incremental hasher for large data
    pub fn incremental(algorithm: HashAlgorithm) -> IncrementalHasher {
        IncrementalHasher::new(algorithm)
    }
}

/// Incremental hasher for streaming data
pub enum IncrementalHasher {
    Md5(Md5),
    Sha1(Sha1),
    Sha256(Sha256),
    Sha512(Sha512),
}

impl IncrementalHasher {
    /// Create a new incremental hasher
    pub fn new(algorithm: HashAlgorithm) -> Self {
        match algorithm {
            HashAlgorithm::Md5 => Self::Md5(Md5::new()),
            HashAlgorithm::Sha1 => Self::Sha1(Sha1::new()),
            HashAlgorithm::Sha256 => Self::Sha256(Sha256::new()),
            HashAlgorithm::Sha512 => Self::Sha512(Sha512::new()),
        }
    }

    /// Update the hasher with more data
    pub fn update(&mut self, data: &[u8]) {
        match self {
            Self::Md5(h) => h.update(data),
            Self::Sha1(h) => h.update(data),
            Self::Sha256(h) => h.update(data),
            Self::Sha512(h) => h.update(data),
        }
    }

    /// Finalize and return the hash
    pub fn finalize(self) -> HashOutput {
        let (bytes, algorithm) = match self {
            Self::Md5(h) => (h.finalize().to_vec(), HashAlgorithm::Md5),
            Self::Sha1(h) => (h.finalize().to_vec(), HashAlgorithm::Sha1),
            Self::Sha256(h) => (h.finalize().to_vec(), HashAlgorithm::Sha256),
            Self::Sha512(h) => (h.finalize().to_vec(), HashAlgorithm::Sha512),
        };
        HashOutput { bytes, algorithm }
    }
}

/// Hash `input` with the algorithm named by `tag`, returning lowercase hex
pub fn hash(input: &[u8], tag: &str) -> HashResult<String> {
    let algorithm: HashAlgorithm = tag.parse()?;
    Ok(Hasher::new(algorithm).hash(input).to_hex())
}

/// Recompute the digest of `input` and compare it with `expected_hex`
///
/// Returns `false` for unknown tags and malformed digests.
pub fn verify(input: &[u8], expected_hex: &str, tag: &str) -> bool {
    match tag.parse::<HashAlgorithm>() {
        Ok(algorithm) => Hasher::new(algorithm).hash(input).verify_hex(expected_hex),
        Err(e) => {
            warn!(error = %e, "integrity check requested with unknown algorithm");
            false
        }
    }
}

/// Mean microseconds per `hash` call over `iterations` sequential runs
///
/// The tag is checked once before timing starts.
pub fn benchmark(input: &[u8], tag: &str, iterations: u32) -> HashResult<f64> {
    let algorithm: HashAlgorithm = tag.parse()?;
    let average = mean_micros(iterations, || {
        let _ = std::hint::black_box(hash(std::hint::black_box(input), tag));
    });
    debug!(
        algorithm = algorithm.as_str(),
        iterations,
        average_us = average,
        "hash benchmark finished"
    );
    Ok(average)
}

/// Run `op` `iterations` times back to back; `0.0` when there is nothing to time
fn mean_micros(iterations: u32, mut op: impl FnMut()) -> f64 {
    if iterations == 0 {
        return 0.0;
    }

    let start = Instant::now();
    for _ in 0..iterations {
        op();
    }
    start.elapsed().as_secs_f64() * 1_000_000.0 / f64::from(iterations)
}

/// Quick hash functions
pub fn md5(data: &[u8]) -> HashOutput {
    Hasher::new(HashAlgorithm::Md5).hash(data)
}

pub fn sha1(data: &[u8]) -> HashOutput {
    Hasher::new(HashAlgorithm::Sha1).hash(data)
}

pub fn sha256(data: &[u8]) -> HashOutput {
    Hasher::new(HashAlgorithm::Sha256).hash(data)
}

pub fn sha512(data: &[u8]) -> HashOutput {
    Hasher::new(HashAlgorithm::Sha512).hash(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "HEX-CyberSphere data integrity test";

    #[test]
    fn test_known_digests() {
        assert_eq!(md5(b"abc").to_hex(), "900150983cd24fb0d6963f7d28e17f72");
        assert_eq!(
            sha1(b"abc").to_hex(),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
        assert_eq!(
            sha256(b"test").to_hex(),
            "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"
        );
        assert_eq!(
            sha512(b"abc").to_hex(),
            "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
             2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
        );
    }

    #[test]
    fn test_digest_lengths() {
        for algorithm in HashAlgorithm::ALL {
            let output = Hasher::new(algorithm).hash(SAMPLE.as_bytes());
            assert_eq!(output.bytes.len(), algorithm.digest_len());
            assert_eq!(output.to_hex().len(), algorithm.digest_len() * 2);
        }
    }

    #[test]
    fn test_tag_parsing() {
        for algorithm in HashAlgorithm::ALL {
            assert_eq!(algorithm.as_str().parse::<HashAlgorithm>(), Ok(algorithm));
        }
        assert_eq!(
            "SHA256".parse::<HashAlgorithm>(),
            Err(HashError::UnsupportedAlgorithm("SHA256".to_string()))
        );
        assert!(hash(b"x", "blake3").is_err());
    }

    #[test]
    fn test_verify_roundtrip() {
        for algorithm in HashAlgorithm::ALL {
            let tag = algorithm.as_str();
            let digest = hash(SAMPLE.as_bytes(), tag).unwrap();
            assert!(verify(SAMPLE.as_bytes(), &digest, tag));
        }
    }

    #[test]
    fn test_verify_wrong_algorithm_fails() {
        let digest = hash(SAMPLE.as_bytes(), "sha256").unwrap();
        assert!(verify(SAMPLE.as_bytes(), &digest, "sha256"));
        assert!(!verify(SAMPLE.as_bytes(), &digest, "sha1"));
        assert!(!verify(SAMPLE.as_bytes(), &digest, "whirlpool"));
    }

    #[test]
    fn test_verify_ignores_case_and_rejects_garbage() {
        let digest = hash(SAMPLE.as_bytes(), "md5").unwrap();
        assert!(verify(SAMPLE.as_bytes(), &digest.to_uppercase(), "md5"));
        assert!(!verify(SAMPLE.as_bytes(), "not hex", "md5"));
        assert!(!verify(b"tampered", &digest, "md5"));
    }

    #[test]
    fn test_incremental() {
        for algorithm in HashAlgorithm::ALL {
            let mut hasher = Hasher::incremental(algorithm);
            hasher.update(b"HEX-Cyber");
            hasher.update(b"Sphere");
            let hash = hasher.finalize();

            let direct = Hasher::new(algorithm).hash(b"HEX-CyberSphere");
            assert!(hash.verify(&direct));
        }
    }

    #[test]
    fn test_benchmark() {
        let average = benchmark(SAMPLE.as_bytes(), "sha256", 10).unwrap();
        assert!(average >= 0.0);
        assert_eq!(benchmark(SAMPLE.as_bytes(), "sha256", 0).unwrap(), 0.0);
        assert!(benchmark(SAMPLE.as_bytes(), "crc32", 10).is_err());
    }

    #[test]
    fn test_mean_micros_times_every_call() {
        let mut calls = 0u32;
        let average = mean_micros(3, || {
            calls += 1;
            std::thread::sleep(std::time::Duration::from_millis(2));
        });
        assert_eq!(calls, 3);
        assert!(average >= 2000.0, "average was {}", average);

        let mut calls = 0u32;
        assert_eq!(mean_micros(0, || calls += 1), 0.0);
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_hasher_benchmark() {
        let hasher = Hasher::new(HashAlgorithm::Sha512);
        assert!(hasher.benchmark(SAMPLE.as_bytes(), 10) >= 0.0);
        assert_eq!(hasher.benchmark(SAMPLE.as_bytes(), 0), 0.0);
    }
}

//! Data and file integrity checking

use crate::hashing::{HashAlgorithm, HashError, HashOutput, Hasher};
use std::path::Path;
use thiserror::Error;
use tracing::warn;

/// Integrity check errors
#[derive(Error, Debug)]
pub enum IntegrityError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    UnsupportedAlgorithm(#[from] HashError),
    #[error("Hash mismatch for {subject}: expected {expected}, got {actual}")]
    HashMismatch {
        subject: String,
        expected: String,
        actual: String,
    },
}

pub type IntegrityResult<T> = std::result::Result<T, IntegrityError>;

/// Integrity checker bound to one digest algorithm
#[derive(Debug, Clone, Copy)]
pub struct IntegrityChecker {
    hasher: Hasher,
}

impl IntegrityChecker {
    /// Create a new integrity checker
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self {
            hasher: Hasher::new(algorithm),
        }
    }

    /// Create from an algorithm tag such as `sha256`
    pub fn from_tag(tag: &str) -> IntegrityResult<Self> {
        Ok(Self::new(tag.parse()?))
    }

    /// Create with default algorithm (SHA-256)
    pub fn default_checker() -> Self {
        Self::new(HashAlgorithm::Sha256)
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.hasher.algorithm()
    }

    /// Hash data in memory
    pub fn hash_data(&self, data: &[u8]) -> HashOutput {
        self.hasher.hash(data)
    }

    /// Verify data against expected hash
    pub fn verify_data(&self, data: &[u8], expected_hash: &str) -> bool {
        self.hasher.hash(data).verify_hex(expected_hash)
    }

    /// Verify data, reporting the actual digest on mismatch
    pub fn check_data(&self, data: &[u8], expected_hash: &str) -> IntegrityResult<()> {
        let hash = self.hasher.hash(data);
        self.check(hash, "data", expected_hash)
    }

    /// Hash a file
    pub fn hash_file(&self, path: &Path) -> IntegrityResult<HashOutput> {
        let data = std::fs::read(path)?;
        Ok(self.hasher.hash(&data))
    }

    /// Verify a file against an expected hash
    pub fn verify_file(&self, path: &Path, expected_hash: &str) -> IntegrityResult<()> {
        let hash = self.hash_file(path)?;
        self.check(hash, &path.to_string_lossy(), expected_hash)
    }

    fn check(&self, hash: HashOutput, subject: &str, expected_hash: &str) -> IntegrityResult<()> {
        if hash.verify_hex(expected_hash) {
            return Ok(());
        }

        let actual = hash.to_hex();
        warn!(
            subject,
            algorithm = self.algorithm().as_str(),
            "integrity check failed"
        );
        Err(IntegrityError::HashMismatch {
            subject: subject.to_string(),
            expected: expected_hash.to_string(),
            actual,
        })
    }
}

impl Default for IntegrityChecker {
    fn default() -> Self {
        Self::default_checker()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_data() {
        let checker = IntegrityChecker::default_checker();
        let data = b"test data for integrity check";

        let hash = checker.hash_data(data);
        let hex = hash.to_hex();

        assert!(checker.verify_data(data, &hex));
        assert!(!checker.verify_data(b"different data", &hex));
    }

    #[test]
    fn test_check_data_reports_mismatch() {
        let checker = IntegrityChecker::from_tag("md5").unwrap();
        let expected = checker.hash_data(b"original").to_hex();

        assert!(checker.check_data(b"original", &expected).is_ok());
        match checker.check_data(b"changed", &expected) {
            Err(IntegrityError::HashMismatch {
                expected: e,
                actual,
                ..
            }) => {
                assert_eq!(e, expected);
                assert_eq!(actual, checker.hash_data(b"changed").to_hex());
            }
            other => panic!("expected mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_from_tag_rejects_unknown() {
        assert!(matches!(
            IntegrityChecker::from_tag("crc32"),
            Err(IntegrityError::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn test_verify_file() {
        let path = std::env::temp_dir().join(format!(
            "hexsphere-integrity-{}.bin",
            std::process::id()
        ));
        std::fs::write(&path, b"file contents").unwrap();

        let checker = IntegrityChecker::new(HashAlgorithm::Sha512);
        let expected = checker.hash_data(b"file contents").to_hex();
        let result = checker.verify_file(&path, &expected);
        let wrong = checker.verify_file(&path, &checker.hash_data(b"other").to_hex());
        std::fs::remove_file(&path).ok();

        assert!(result.is_ok());
        assert!(matches!(wrong, Err(IntegrityError::HashMismatch { .. })));
    }

    #[test]
    fn test_verify_missing_file() {
        let checker = IntegrityChecker::default();
        let result = checker.verify_file(Path::new("/nonexistent/hexsphere.bin"), "00");
        assert!(matches!(result, Err(IntegrityError::Io(_))));
    }
}

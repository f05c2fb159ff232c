//! Cryptographic utilities
//!
//! This crate provides AES-256-CBC encryption, message digests and
//! integrity checks, with hex transport encoding throughout.

pub mod encryption;
pub mod hashing;
pub mod secure;
pub mod integrity;

pub use encryption::{EncryptionError, EncryptionKey, Encryptor};
pub use hashing::{HashAlgorithm, HashError, HashOutput, Hasher};
pub use secure::SecretBytes;
pub use integrity::IntegrityChecker;

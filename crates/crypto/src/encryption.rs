//! AES-256-CBC encryption with hex transport encoding

use crate::secure::SecretBytes;
use aes::cipher::{block_padding::NoPadding, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use hexsphere_core::hex::{self, HexError};
use thiserror::Error;
use tracing::{debug, warn};
use zeroize::Zeroizing;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// AES block size in bytes
pub const BLOCK_SIZE: usize = 16;
/// AES-256 key size in bytes
pub const KEY_SIZE: usize = 32;
/// CBC initialization vector size in bytes
pub const IV_SIZE: usize = 16;

/// Encryption errors
#[derive(Error, Debug)]
pub enum EncryptionError {
    #[error("Invalid ciphertext encoding: {0}")]
    Format(#[from] HexError),
    #[error("Cipher initialization failed: {0}")]
    Initialization(String),
    #[error("Invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },
    #[error("Invalid IV length: expected {expected}, got {actual}")]
    InvalidIvLength { expected: usize, actual: usize },
    #[error("Ciphertext length {0} is not a non-zero multiple of the block size")]
    MisalignedCiphertext(usize),
    #[error("Invalid padding value {value} for {len} byte buffer")]
    InvalidPadding { value: usize, len: usize },
    #[error("Decrypted data is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type EncryptionResult<T> = std::result::Result<T, EncryptionError>;

/// Key and IV for one encryption session
///
/// Both are drawn once, when the session is created, and reused for every
/// call made through the owning [`Encryptor`].
pub struct EncryptionKey {
    key: SecretBytes<KEY_SIZE>,
    iv: SecretBytes<IV_SIZE>,
}

impl EncryptionKey {
    /// Generate a new random key and IV
    pub fn generate() -> Self {
        Self {
            key: SecretBytes::random(),
            iv: SecretBytes::random(),
        }
    }

    /// Create from raw bytes
    pub fn from_bytes(key: &[u8], iv: &[u8]) -> EncryptionResult<Self> {
        let key = SecretBytes::from_slice(key).ok_or(EncryptionError::InvalidKeyLength {
            expected: KEY_SIZE,
            actual: key.len(),
        })?;
        let iv = SecretBytes::from_slice(iv).ok_or(EncryptionError::InvalidIvLength {
            expected: IV_SIZE,
            actual: iv.len(),
        })?;

        Ok(Self { key, iv })
    }

    /// Export the key as hex (use with caution)
    pub fn key_hex(&self) -> String {
        self.key.to_hex()
    }

    /// Export the IV as hex
    pub fn iv_hex(&self) -> String {
        self.iv.to_hex()
    }
}

impl std::fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptionKey")
            .field("key", &self.key)
            .field("iv", &self.iv)
            .finish()
    }
}

/// Append `p` bytes of value `p`, where `p = 16 - len % 16`
///
/// A full block of padding is added when the input is already aligned.
pub fn pad(plaintext: &[u8]) -> Vec<u8> {
    let padding = BLOCK_SIZE - plaintext.len() % BLOCK_SIZE;
    let mut padded = Vec::with_capacity(plaintext.len() + padding);
    padded.extend_from_slice(plaintext);
    padded.resize(plaintext.len() + padding, padding as u8);
    padded
}

/// Strip as many trailing bytes as the value of the last byte
///
/// Only the count is checked; the pad bytes themselves are not compared.
pub fn unpad(buffer: &mut Vec<u8>) -> EncryptionResult<()> {
    let len = buffer.len();
    let value = buffer.last().copied().unwrap_or(0) as usize;

    if value == 0 || value > BLOCK_SIZE || value > len {
        return Err(EncryptionError::InvalidPadding { value, len });
    }

    buffer.truncate(len - value);
    Ok(())
}

/// AES-256-CBC encryptor bound to a single session key
///
/// Every call on the same instance uses the same IV. Identical plaintexts
/// therefore produce identical ciphertexts; create a new session per
/// message when that matters.
pub struct Encryptor {
    key: EncryptionKey,
}

impl Encryptor {
    /// Create a new encryptor with the given key
    pub fn new(key: EncryptionKey) -> Self {
        Self { key }
    }

    /// Create an encryptor with a freshly generated key and IV
    pub fn generate() -> Self {
        Self::new(EncryptionKey::generate())
    }

    /// Get the session key
    pub fn key(&self) -> &EncryptionKey {
        &self.key
    }

    /// Pad and encrypt, returning raw ciphertext
    pub fn encrypt_bytes(&self, plaintext: &[u8]) -> EncryptionResult<Vec<u8>> {
        let cipher = Aes256CbcEnc::new_from_slices(&self.key.key, &self.key.iv)
            .map_err(|e| EncryptionError::Initialization(e.to_string()))?;

        let padded = Zeroizing::new(pad(plaintext));
        let ciphertext = cipher.encrypt_padded_vec_mut::<NoPadding>(&padded);

        debug!(
            plaintext_len = plaintext.len(),
            ciphertext_len = ciphertext.len(),
            "encrypted buffer"
        );
        Ok(ciphertext)
    }

    /// Decrypt raw ciphertext and strip the padding
    pub fn decrypt_bytes(&self, ciphertext: &[u8]) -> EncryptionResult<Vec<u8>> {
        if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
            return Err(EncryptionError::MisalignedCiphertext(ciphertext.len()));
        }

        let cipher = Aes256CbcDec::new_from_slices(&self.key.key, &self.key.iv)
            .map_err(|e| EncryptionError::Initialization(e.to_string()))?;

        let mut plaintext = cipher
            .decrypt_padded_vec_mut::<NoPadding>(ciphertext)
            .map_err(|_| EncryptionError::MisalignedCiphertext(ciphertext.len()))?;

        if let Err(e) = unpad(&mut plaintext) {
            warn!(ciphertext_len = ciphertext.len(), "rejected ciphertext with invalid padding");
            return Err(e);
        }

        Ok(plaintext)
    }

    /// Encrypt and hex-encode
    pub fn encrypt(&self, plaintext: &[u8]) -> EncryptionResult<String> {
        Ok(hex::encode(self.encrypt_bytes(plaintext)?))
    }

    /// Hex-decode and decrypt
    pub fn decrypt(&self, hex_ciphertext: &str) -> EncryptionResult<Vec<u8>> {
        let ciphertext = hex::decode(hex_ciphertext)?;
        self.decrypt_bytes(&ciphertext)
    }

    /// Hex-decode, decrypt and interpret the result as UTF-8
    pub fn decrypt_to_string(&self, hex_ciphertext: &str) -> EncryptionResult<String> {
        Ok(String::from_utf8(self.decrypt(hex_ciphertext)?)?)
    }
}

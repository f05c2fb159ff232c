//! Byte/hex codec used for transport encoding
//!
//! Every engine component that hands bytes to a caller (ciphertext,
//! digests, compressed streams, key material) goes through this module.
//! Output is always lowercase; input may be either case.

use thiserror::Error;

/// Malformed hex input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HexError {
    #[error("odd length hex string ({len} characters)")]
    OddLength { len: usize },

    #[error("invalid hex character {character:?} at index {index}")]
    InvalidCharacter { character: char, index: usize },
}

pub type HexResult<T> = std::result::Result<T, HexError>;

/// Encode bytes as lowercase hex, two zero-padded digits per byte
pub fn encode(bytes: impl AsRef<[u8]>) -> String {
    ::hex::encode(bytes)
}

/// Decode a hex string into bytes
///
/// Lengths and indices count characters, not UTF-8 bytes.
///
/// # Errors
///
/// Returns [`HexError::OddLength`] when the input has an odd number of
/// characters and [`HexError::InvalidCharacter`] for the first character
/// outside `[0-9a-fA-F]`. Input is never truncated.
pub fn decode(hex: &str) -> HexResult<Vec<u8>> {
    let len = hex.chars().count();
    if len % 2 != 0 {
        return Err(HexError::OddLength { len });
    }
    if let Some((index, character)) = hex
        .chars()
        .enumerate()
        .find(|(_, c)| !c.is_ascii_hexdigit())
    {
        return Err(HexError::InvalidCharacter { character, index });
    }

    // ASCII from here on, so byte offsets are character offsets
    ::hex::decode(hex).map_err(|e| match e {
        ::hex::FromHexError::InvalidHexCharacter { c, index } => HexError::InvalidCharacter {
            character: c,
            index,
        },
        ::hex::FromHexError::OddLength | ::hex::FromHexError::InvalidStringLength => {
            HexError::OddLength { len }
        }
    })
}

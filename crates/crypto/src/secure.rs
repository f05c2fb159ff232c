//! Secure memory handling for key material

use rand::rngs::OsRng;
use rand::RngCore;
use std::ops::Deref;
use zeroize::Zeroizing;

/// A fixed-size secret that is securely erased from memory when dropped
#[derive(Clone)]
pub struct SecretBytes<const N: usize> {
    inner: Zeroizing<[u8; N]>,
}

impl<const N: usize> SecretBytes<N> {
    /// Fill a new secret from the operating system CSPRNG
    pub fn random() -> Self {
        let mut inner = Zeroizing::new([0u8; N]);
        OsRng.fill_bytes(&mut inner[..]);
        Self { inner }
    }

    /// Copy from a slice, returning `None` if the length is not `N`
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != N {
            return None;
        }
        let mut inner = Zeroizing::new([0u8; N]);
        inner.copy_from_slice(bytes);
        Some(Self { inner })
    }

    /// Get as bytes
    pub fn as_bytes(&self) -> &[u8; N] {
        &self.inner
    }

    /// Export as lowercase hex (use with caution)
    pub fn to_hex(&self) -> String {
        hexsphere_core::hex::encode(&self.inner[..])
    }
}

impl<const N: usize> Deref for SecretBytes<N> {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.inner[..]
    }
}

impl<const N: usize> std::fmt::Debug for SecretBytes<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecretBytes([{} bytes REDACTED])", N)
    }
}

//! The provider contract a vault layer calls to protect and recover data.
//!
//! Providers are stateless: every call is independent, so a provider can be
//! shared across threads and used concurrently.

mod aes_ccm;

pub use aes_ccm::CcmProvider;

use crate::codec::{CipherText, Encoded, Key, PlainText, PrivateKey, PublicKey, SymmetricKey};
use crate::error::Result;
use crate::params::{CipherParams, KeyDerivationParams};

/// Key size used by [`CryptoProvider::random_default_key`].
pub const DEFAULT_KEY_BITS: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPair {
    pub private_key: PrivateKey,
    pub public_key: PublicKey,
}

pub trait CryptoProvider: Send + Sync {
    /// Short identifier of the algorithms this binding implements.
    fn name(&self) -> &'static str;

    /// Whether this binding can run here. Cheap and side-effect free.
    fn is_available(&self) -> bool;

    /// `n` secure random bytes. `n` must be a multiple of 4.
    fn random_bytes(&self, n: usize) -> Result<Encoded>;

    /// Derive a key from `passphrase`. Deterministic for identical inputs.
    fn derive_key(&self, passphrase: &str, params: &KeyDerivationParams) -> Result<SymmetricKey>;

    /// A uniformly random key of `bits` length.
    fn random_key(&self, bits: usize) -> Result<SymmetricKey>;

    fn random_default_key(&self) -> Result<SymmetricKey> {
        self.random_key(DEFAULT_KEY_BITS)
    }

    fn encrypt(&self, key: &Key, plaintext: &PlainText, params: &CipherParams)
    -> Result<CipherText>;

    /// Reports every failure after validation as `DecryptionFailed`.
    fn decrypt(&self, key: &Key, ciphertext: &CipherText, params: &CipherParams)
    -> Result<PlainText>;

    fn generate_key_pair(&self) -> Result<KeyPair>;
}

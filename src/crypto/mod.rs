//! Cryptographic primitives behind the provider.
//!
//! Provides PBKDF2 key derivation, AES-CCM sealing and opening, and the OS
//! random generator, all reached through the [`Primitives`] seam.

pub mod aead;
pub mod kdf;

use getrandom::fill;
use thiserror::Error;

use crate::validate::{CipherAlgorithm, KdfAlgorithm, ValidCipher};

/// Errors raised below the provider boundary. Never returned to callers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PrimitiveError {
    #[error("OS random generator unavailable")]
    Random,
    #[error("unsupported key length: {0} bytes")]
    KeyLength(usize),
    #[error("unsupported nonce length: {0} bytes")]
    NonceLength(usize),
    #[error("aead operation failed")]
    Aead,
}

/// The raw operations a provider binding is built on.
///
/// Inputs have already been validated; implementations only report failures
/// of the primitive itself.
#[cfg_attr(test, mockall::automock)]
pub trait Primitives: Send + Sync {
    fn is_available(&self) -> bool;

    fn fill_random(&self, buf: &mut [u8]) -> Result<(), PrimitiveError>;

    fn derive(
        &self,
        algorithm: KdfAlgorithm,
        passphrase: &[u8],
        salt: &[u8],
        iterations: u32,
        out: &mut [u8],
    ) -> Result<(), PrimitiveError>;

    fn seal(
        &self,
        key: &[u8],
        params: &ValidCipher,
        plaintext: &[u8],
    ) -> Result<Vec<u8>, PrimitiveError>;

    fn open(
        &self,
        key: &[u8],
        params: &ValidCipher,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>, PrimitiveError>;
}

/// Pure-Rust primitives from the RustCrypto crates.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustCrypto;

impl Primitives for RustCrypto {
    fn is_available(&self) -> bool {
        let mut probe = [0u8; 4];
        fill(&mut probe).is_ok()
    }

    fn fill_random(&self, buf: &mut [u8]) -> Result<(), PrimitiveError> {
        fill(buf).map_err(|_| PrimitiveError::Random)
    }

    fn derive(
        &self,
        algorithm: KdfAlgorithm,
        passphrase: &[u8],
        salt: &[u8],
        iterations: u32,
        out: &mut [u8],
    ) -> Result<(), PrimitiveError> {
        match algorithm {
            KdfAlgorithm::Pbkdf2Sha256 => kdf::pbkdf2_sha256(passphrase, salt, iterations, out),
        }
        Ok(())
    }

    fn seal(
        &self,
        key: &[u8],
        params: &ValidCipher,
        plaintext: &[u8],
    ) -> Result<Vec<u8>, PrimitiveError> {
        match params.algorithm {
            CipherAlgorithm::AesCcm => aead::seal(
                key,
                &params.iv,
                &params.additional_data,
                params.tag_size,
                plaintext,
            ),
        }
    }

    fn open(
        &self,
        key: &[u8],
        params: &ValidCipher,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>, PrimitiveError> {
        match params.algorithm {
            CipherAlgorithm::AesCcm => aead::open(
                key,
                &params.iv,
                &params.additional_data,
                params.tag_size,
                ciphertext,
            ),
        }
    }
}

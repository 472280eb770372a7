use tracing::debug;
use zeroize::Zeroizing;

use super::{CryptoProvider, KeyPair};
use crate::codec::{self, CipherText, Encoded, Key, PlainText, SymmetricKey};
use crate::crypto::{Primitives, RustCrypto};
use crate::error::{CryptoError, Result};
use crate::params::{CipherParams, KeyDerivationParams};
use crate::validate::{validate_cipher_params, validate_key_derivation_params};

/// Random output is produced in 32-bit words.
const RANDOM_WORD_LEN: usize = 4;
/// Upper bound for a single random draw, in bytes.
pub const MAX_RANDOM_LEN: usize = 1 << 20;

/// PBKDF2-HMAC-SHA256 key derivation and AES-CCM authenticated encryption.
///
/// Generic over its [`Primitives`] so the raw operations can be swapped out,
/// e.g. for a hardware-backed implementation.
#[derive(Debug, Clone, Default)]
pub struct CcmProvider<P = RustCrypto> {
    primitives: P,
}

impl CcmProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: Primitives> CcmProvider<P> {
    pub fn with_primitives(primitives: P) -> Self {
        Self { primitives }
    }

    fn random(&self, len: usize) -> Result<Encoded> {
        if len > MAX_RANDOM_LEN {
            return Err(CryptoError::InvalidArgument(format!(
                "at most {MAX_RANDOM_LEN} random bytes per call, got {len}"
            )));
        }
        let mut buf = Zeroizing::new(vec![0u8; len]);
        self.primitives
            .fill_random(&mut buf)
            .map_err(|_| CryptoError::NotSupported("secure random generator unavailable"))?;
        Ok(codec::encode(&buf))
    }
}

impl<P: Primitives> CryptoProvider for CcmProvider<P> {
    fn name(&self) -> &'static str {
        "aes-ccm/pbkdf2"
    }

    fn is_available(&self) -> bool {
        self.primitives.is_available()
    }

    fn random_bytes(&self, n: usize) -> Result<Encoded> {
        if n % RANDOM_WORD_LEN != 0 {
            return Err(CryptoError::InvalidArgument(format!(
                "number of bytes must be a multiple of {RANDOM_WORD_LEN}, got {n}"
            )));
        }
        self.random(n)
    }

    fn derive_key(&self, passphrase: &str, params: &KeyDerivationParams) -> Result<SymmetricKey> {
        let kdf = validate_key_derivation_params(params)?;
        debug!(
            algorithm = kdf.algorithm.tag(),
            iterations = kdf.iterations,
            key_size = params.key_size,
            "deriving key"
        );

        let passphrase = Zeroizing::new(codec::utf8_to_bits(passphrase));
        let mut key = Zeroizing::new(vec![0u8; kdf.key_len]);
        self.primitives
            .derive(
                kdf.algorithm,
                &passphrase,
                &kdf.salt,
                kdf.iterations,
                &mut key,
            )
            .map_err(|e| CryptoError::InvalidKeyDerivationParams(e.to_string()))?;

        Ok(codec::encode(&key))
    }

    fn random_key(&self, bits: usize) -> Result<SymmetricKey> {
        if bits == 0 || bits % 8 != 0 {
            return Err(CryptoError::InvalidArgument(format!(
                "key size must be a positive multiple of 8, got {bits}"
            )));
        }
        self.random(bits / 8)
    }

    fn encrypt(
        &self,
        key: &Key,
        plaintext: &PlainText,
        params: &CipherParams,
    ) -> Result<CipherText> {
        let cipher = validate_cipher_params(params)?;
        let key = Zeroizing::new(key.decode().map_err(|_| CryptoError::EncryptionFailed)?);
        let plaintext = Zeroizing::new(
            plaintext
                .decode()
                .map_err(|_| CryptoError::EncryptionFailed)?,
        );
        debug!(
            algorithm = cipher.algorithm.tag(),
            tag_size = cipher.tag_size.bits(),
            iv_len = cipher.iv.len(),
            len = plaintext.len(),
            "encrypting"
        );

        let ciphertext = self
            .primitives
            .seal(&key, &cipher, &plaintext)
            .map_err(|e| {
                debug!(error = %e, "encryption rejected by cipher");
                CryptoError::EncryptionFailed
            })?;

        Ok(codec::encode(&ciphertext))
    }

    fn decrypt(
        &self,
        key: &Key,
        ciphertext: &CipherText,
        params: &CipherParams,
    ) -> Result<PlainText> {
        let cipher = validate_cipher_params(params)?;
        debug!(
            algorithm = cipher.algorithm.tag(),
            tag_size = cipher.tag_size.bits(),
            iv_len = cipher.iv.len(),
            "decrypting"
        );

        let key = Zeroizing::new(key.decode().map_err(|_| CryptoError::DecryptionFailed)?);
        let ciphertext = ciphertext
            .decode()
            .map_err(|_| CryptoError::DecryptionFailed)?;

        let plaintext = Zeroizing::new(
            self.primitives
                .open(&key, &cipher, &ciphertext)
                .map_err(|_| CryptoError::DecryptionFailed)?,
        );

        Ok(codec::encode(&plaintext))
    }

    fn generate_key_pair(&self) -> Result<KeyPair> {
        Err(CryptoError::NotSupported(
            "key pair generation is not available for AES-CCM",
        ))
    }
}

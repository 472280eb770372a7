//! Cryptographic core of a credential vault.
//!
//! Turns a passphrase and a set of storage parameters into keys and
//! ciphertexts through the [`CryptoProvider`] contract. [`CcmProvider`] binds
//! that contract to PBKDF2-HMAC-SHA256 and AES-CCM.
//!
//! ```no_run
//! use vaultcore::{CcmProvider, CipherParams, CryptoProvider, Encoded, KeyDerivationParams};
//!
//! # fn main() -> vaultcore::Result<()> {
//! let provider = CcmProvider::new();
//! let kdf = KeyDerivationParams::with_random_salt(&provider)?;
//! let key = provider.derive_key("correct horse", &kdf)?;
//!
//! let params = CipherParams::with_random_iv(&provider)?;
//! let ct = provider.encrypt(&key, &Encoded::from_utf8("hello"), &params)?;
//! let pt = provider.decrypt(&key, &ct, &params)?;
//! assert_eq!(pt, Encoded::from_utf8("hello"));
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod crypto;
mod error;
pub mod params;
pub mod provider;
pub mod validate;

pub use crate::codec::{
    CipherText, Encoded, Key, PlainText, PrivateKey, PublicKey, SymmetricKey,
};
pub use crate::error::{CryptoError, Result};
pub use crate::params::{CipherParams, CipherType, KeyDerivationParams};
pub use crate::provider::{CcmProvider, CryptoProvider, DEFAULT_KEY_BITS, KeyPair};
pub use crate::validate::{validate_cipher_params, validate_key_derivation_params};

//! Parameter sets as they are persisted next to vault records.
//!
//! Field names are the interchange contract (`keySize`, `cipherType`,
//! `additionalData`, ...), so stored records stay readable by other bindings.

use serde::{Deserialize, Serialize};

use crate::codec::Encoded;
use crate::error::Result;
use crate::provider::CryptoProvider;
use crate::validate::{CipherAlgorithm, KdfAlgorithm, TagSize};

/// Salt length used by [`KeyDerivationParams::with_random_salt`].
pub const SALT_LEN: usize = 16;
/// IV length used by [`CipherParams::with_random_iv`].
pub const IV_LEN: usize = 12;
pub const DEFAULT_ITERATIONS: u32 = 100_000;
pub const DEFAULT_KEY_SIZE: u32 = 256;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyDerivationParams {
    pub algorithm: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salt: Option<Encoded>,
    pub iterations: u32,
    /// Output size in bits.
    pub key_size: u32,
}

impl Default for KeyDerivationParams {
    fn default() -> Self {
        Self {
            algorithm: KdfAlgorithm::Pbkdf2Sha256.tag().to_string(),
            salt: None,
            iterations: DEFAULT_ITERATIONS,
            key_size: DEFAULT_KEY_SIZE,
        }
    }
}

impl KeyDerivationParams {
    pub fn new(salt: Encoded, iterations: u32, key_size: u32) -> Self {
        Self {
            salt: Some(salt),
            iterations,
            key_size,
            ..Self::default()
        }
    }

    /// Default parameters with a fresh salt drawn from `provider`.
    pub fn with_random_salt<P: CryptoProvider + ?Sized>(provider: &P) -> Result<Self> {
        Ok(Self {
            salt: Some(provider.random_bytes(SALT_LEN)?),
            ..Self::default()
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CipherType {
    Symmetric,
    Asymmetric,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CipherParams {
    pub cipher_type: CipherType,
    pub algorithm: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iv: Option<Encoded>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_data: Option<Encoded>,
    /// Authentication tag size in bits.
    pub tag_size: u32,
}

impl Default for CipherParams {
    fn default() -> Self {
        Self {
            cipher_type: CipherType::Symmetric,
            algorithm: CipherAlgorithm::AesCcm.tag().to_string(),
            iv: None,
            additional_data: Some(Encoded::default()),
            tag_size: TagSize::Bits64.bits(),
        }
    }
}

impl CipherParams {
    pub fn aes_ccm(iv: Encoded, additional_data: Encoded, tag_size: u32) -> Self {
        Self {
            iv: Some(iv),
            additional_data: Some(additional_data),
            tag_size,
            ..Self::default()
        }
    }

    /// Default parameters with a fresh IV drawn from `provider`.
    ///
    /// A new IV must be used for every encryption under the same key.
    pub fn with_random_iv<P: CryptoProvider + ?Sized>(provider: &P) -> Result<Self> {
        Ok(Self {
            iv: Some(provider.random_bytes(IV_LEN)?),
            ..Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CcmProvider;

    #[test]
    fn kdf_params_use_interchange_names() {
        let params = KeyDerivationParams::new(Encoded::new("AAAA"), 10, 256);
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["algorithm"], "PBKDF2");
        assert_eq!(json["salt"], "AAAA");
        assert_eq!(json["iterations"], 10);
        assert_eq!(json["keySize"], 256);
    }

    #[test]
    fn cipher_params_parse_from_json() {
        let params: CipherParams = serde_json::from_str(
            r#"{"cipherType":"symmetric","algorithm":"AES-CCM","iv":"AAAAAAAAAAAAAAAA","additionalData":"","tagSize":64}"#,
        )
        .unwrap();
        assert_eq!(params.cipher_type, CipherType::Symmetric);
        assert_eq!(params.iv.unwrap().as_str(), "AAAAAAAAAAAAAAAA");
        assert_eq!(params.additional_data.unwrap().as_str(), "");
        assert_eq!(params.tag_size, 64);
    }

    #[test]
    fn missing_salt_parses_as_none() {
        let params: KeyDerivationParams =
            serde_json::from_str(r#"{"algorithm":"PBKDF2","iterations":1,"keySize":256}"#)
                .unwrap();
        assert!(params.salt.is_none());
    }

    #[test]
    fn random_salt_and_iv_have_expected_length() {
        let provider = CcmProvider::new();

        let kdf = KeyDerivationParams::with_random_salt(&provider).unwrap();
        assert_eq!(kdf.salt.unwrap().decode().unwrap().len(), SALT_LEN);

        let cipher = CipherParams::with_random_iv(&provider).unwrap();
        assert_eq!(cipher.iv.unwrap().decode().unwrap().len(), IV_LEN);
    }

    #[test]
    fn fresh_ivs_differ() {
        let provider = CcmProvider::new();
        let a = CipherParams::with_random_iv(&provider).unwrap();
        let b = CipherParams::with_random_iv(&provider).unwrap();
        assert_ne!(a.iv, b.iv);
    }
}

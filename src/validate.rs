//! Structural validation of parameter sets.
//!
//! Validation turns the string-tagged wire parameters into closed, checked
//! types. The primitives only accept these checked types, so nothing
//! cryptographic runs on input that failed here.

use tracing::warn;

use crate::codec::Encoded;
use crate::error::{CryptoError, Result};
use crate::params::{CipherParams, CipherType, KeyDerivationParams};

/// Inclusive IV length range for AES-CCM, in bytes (RFC 3610).
pub const MIN_IV_LEN: usize = 7;
pub const MAX_IV_LEN: usize = 13;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KdfAlgorithm {
    Pbkdf2Sha256,
}

impl KdfAlgorithm {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "PBKDF2" => Some(Self::Pbkdf2Sha256),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Pbkdf2Sha256 => "PBKDF2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherAlgorithm {
    AesCcm,
}

impl CipherAlgorithm {
    pub fn resolve(cipher_type: CipherType, tag: &str) -> Option<Self> {
        match (cipher_type, tag) {
            (CipherType::Symmetric, "AES-CCM") => Some(Self::AesCcm),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::AesCcm => "AES-CCM",
        }
    }
}

/// Legal CCM authentication tag sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagSize {
    Bits32,
    Bits48,
    Bits64,
    Bits80,
    Bits96,
    Bits112,
    Bits128,
}

impl TagSize {
    pub fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            32 => Some(Self::Bits32),
            48 => Some(Self::Bits48),
            64 => Some(Self::Bits64),
            80 => Some(Self::Bits80),
            96 => Some(Self::Bits96),
            112 => Some(Self::Bits112),
            128 => Some(Self::Bits128),
            _ => None,
        }
    }

    pub fn bits(&self) -> u32 {
        match self {
            Self::Bits32 => 32,
            Self::Bits48 => 48,
            Self::Bits64 => 64,
            Self::Bits80 => 80,
            Self::Bits96 => 96,
            Self::Bits112 => 112,
            Self::Bits128 => 128,
        }
    }

    pub fn bytes(&self) -> usize {
        self.bits() as usize / 8
    }
}

/// Key derivation parameters that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidKdf {
    pub algorithm: KdfAlgorithm,
    pub salt: Vec<u8>,
    pub iterations: u32,
    pub key_len: usize,
}

/// Cipher parameters that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCipher {
    pub algorithm: CipherAlgorithm,
    pub iv: Vec<u8>,
    pub additional_data: Vec<u8>,
    pub tag_size: TagSize,
}

pub fn validate_key_derivation_params(params: &KeyDerivationParams) -> Result<ValidKdf> {
    check_kdf(params).inspect_err(|e| warn!(error = %e, "rejected key derivation parameters"))
}

fn check_kdf(params: &KeyDerivationParams) -> Result<ValidKdf> {
    let invalid = |msg: &str| CryptoError::InvalidKeyDerivationParams(msg.to_string());

    let algorithm = KdfAlgorithm::from_tag(&params.algorithm)
        .ok_or_else(|| invalid(&format!("unsupported algorithm '{}'", params.algorithm)))?;

    let salt = decode_field(params.salt.as_ref())
        .map_err(|_| invalid("salt is not valid base64"))?
        .ok_or_else(|| invalid("salt is missing"))?;
    if salt.is_empty() {
        return Err(invalid("salt is empty"));
    }

    if params.iterations < 1 {
        return Err(invalid("iterations must be >= 1"));
    }

    if params.key_size == 0 || params.key_size % 8 != 0 {
        return Err(invalid("key size must be a positive multiple of 8"));
    }

    Ok(ValidKdf {
        algorithm,
        salt,
        iterations: params.iterations,
        key_len: params.key_size as usize / 8,
    })
}

pub fn validate_cipher_params(params: &CipherParams) -> Result<ValidCipher> {
    check_cipher(params).inspect_err(|e| warn!(error = %e, "rejected cipher parameters"))
}

fn check_cipher(params: &CipherParams) -> Result<ValidCipher> {
    let invalid = |msg: &str| CryptoError::InvalidCipherParams(msg.to_string());

    let algorithm =
        CipherAlgorithm::resolve(params.cipher_type, &params.algorithm).ok_or_else(|| {
            invalid(&format!(
                "unsupported combination {:?}/{}",
                params.cipher_type, params.algorithm
            ))
        })?;

    let iv = decode_field(params.iv.as_ref())
        .map_err(|_| invalid("iv is not valid base64"))?
        .ok_or_else(|| invalid("iv is missing"))?;
    if !(MIN_IV_LEN..=MAX_IV_LEN).contains(&iv.len()) {
        return Err(invalid(&format!(
            "iv must be {MIN_IV_LEN}..={MAX_IV_LEN} bytes, got {}",
            iv.len()
        )));
    }

    let additional_data = decode_field(params.additional_data.as_ref())
        .map_err(|_| invalid("additional data is not valid base64"))?
        .ok_or_else(|| invalid("additional data is missing"))?;

    let tag_size = TagSize::from_bits(params.tag_size)
        .ok_or_else(|| invalid(&format!("illegal tag size {}", params.tag_size)))?;

    Ok(ValidCipher {
        algorithm,
        iv,
        additional_data,
        tag_size,
    })
}

fn decode_field(field: Option<&Encoded>) -> Result<Option<Vec<u8>>> {
    field.map(Encoded::decode).transpose()
}

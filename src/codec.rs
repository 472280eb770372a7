//! Portable text encoding for keys, ciphertexts and parameters.
//!
//! Encoding always emits unpadded URL-safe base64. Decoding accepts URL-safe
//! base64 with or without padding and falls back to the standard alphabet, so
//! payloads written under either convention stay importable.

use std::fmt;
use std::str::FromStr;

use base64::{
    Engine as _, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::error::{CryptoError, Result};

const URL_SAFE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

const STANDARD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encode raw bytes in the canonical URL-safe variant.
pub fn encode(bytes: &[u8]) -> Encoded {
    Encoded(URL_SAFE.encode(bytes))
}

/// Decode text produced by either the URL-safe or the standard variant.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    URL_SAFE
        .decode(text)
        .or_else(|_| STANDARD.decode(text))
        .map_err(|_| CryptoError::Decoding("input is not valid base64"))
}

pub fn utf8_to_bits(text: &str) -> Vec<u8> {
    text.as_bytes().to_vec()
}

pub fn bits_to_utf8(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|_| CryptoError::Decoding("payload is not valid utf-8"))
}

/// A byte string in portable text form.
///
/// The text is wiped from memory when the value is dropped. Equality runs
/// in constant time for inputs of equal length.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Encoded(String);

pub type Key = Encoded;
pub type SymmetricKey = Key;
pub type PublicKey = Key;
pub type PrivateKey = Key;
pub type CipherText = Encoded;
pub type PlainText = Encoded;

impl Encoded {
    /// Wraps already-encoded text without checking it.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn from_utf8(text: &str) -> Self {
        encode(&utf8_to_bits(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn decode(&self) -> Result<Vec<u8>> {
        decode(&self.0)
    }
}

impl PartialEq for Encoded {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_bytes().ct_eq(other.0.as_bytes()).into()
    }
}

impl Eq for Encoded {}

impl Drop for Encoded {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl fmt::Display for Encoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Key material must not end up in logs through `{:?}`.
impl fmt::Debug for Encoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Encoded({} chars)", self.0.len())
    }
}

impl FromStr for Encoded {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self> {
        decode(s)?;
        Ok(Self(s.to_string()))
    }
}

impl From<&str> for Encoded {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

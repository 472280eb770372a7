use thiserror::Error;

/// Failures reported by a [`CryptoProvider`](crate::CryptoProvider).
///
/// Every variant is recoverable; nothing is retried inside the provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// A directly supplied scalar argument violates its precondition.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Key derivation parameters were rejected before any work was done.
    #[error("invalid key derivation parameters: {0}")]
    InvalidKeyDerivationParams(String),

    /// Cipher parameters were rejected before any work was done.
    #[error("invalid cipher parameters: {0}")]
    InvalidCipherParams(String),

    /// The cipher rejected otherwise valid input, e.g. a bad key length.
    #[error("encryption failed")]
    EncryptionFailed,

    /// Wrong key, corrupted ciphertext and tag mismatch all look the same.
    #[error("decryption failed")]
    DecryptionFailed,

    /// The capability is not implemented by this provider.
    #[error("not supported: {0}")]
    NotSupported(&'static str),

    /// A text payload could not be parsed.
    #[error("decoding error: {0}")]
    Decoding(&'static str),
}

impl CryptoError {
    /// Stable error code, suitable for persisting or matching across bindings.
    pub fn code(&self) -> &'static str {
        match self {
            CryptoError::InvalidArgument(_) => "INVALID_ARGUMENT",
            CryptoError::InvalidKeyDerivationParams(_) => "INVALID_KEY_DERIVATION_PARAMS",
            CryptoError::InvalidCipherParams(_) => "INVALID_CIPHER_PARAMS",
            CryptoError::EncryptionFailed => "ENCRYPTION_FAILED",
            CryptoError::DecryptionFailed => "DECRYPTION_FAILED",
            CryptoError::NotSupported(_) => "NOT_SUPPORTED",
            CryptoError::Decoding(_) => "DECODING_ERROR",
        }
    }
}

pub type Result<T, E = CryptoError> = std::result::Result<T, E>;

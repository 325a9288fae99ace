//! Error types for the key engine.

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur in key generation, signing and verification.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Requested modulus size is outside the supported range.
    #[error("unsupported key size: {bits} bits (supported {min}..={max})")]
    UnsupportedKeySize { bits: usize, min: usize, max: usize },

    /// Key generation failed.
    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    /// Key material did not decode into a usable key.
    #[error("invalid key format: {0}")]
    KeyFormat(String),

    /// Signature did not decode.
    #[error("invalid signature format: {0}")]
    SignatureFormat(String),

    /// Signing failed.
    #[error("signing failed: {0}")]
    Signing(String),

    /// Well-formed signature that does not match the message and key.
    #[error("signature does not match message")]
    SignatureMismatch,
}

//! Error types for the licensing module.

use nodelock_crypto::CryptoError;
use thiserror::Error;

/// Licensing-specific errors.
#[derive(Debug, Error)]
pub enum LicenseError {
    /// A required text field is empty or whitespace.
    #[error("{0} should not be blank")]
    BlankField(&'static str),

    /// MAC address does not match any accepted syntax.
    #[error("[{0}] is not a valid MAC address")]
    InvalidMac(String),

    /// IP address is neither an IPv4 nor an IPv6 literal.
    #[error("[{0}] is not a valid IP address")]
    InvalidIp(String),

    /// Requested RSA modulus size is outside the supported range.
    #[error("unsupported key size: {0} bits")]
    UnsupportedKeySize(usize),

    /// Validity is zero or overflows the representable time range.
    #[error("invalid validity: {0}")]
    InvalidValidity(String),

    /// Key generation, signing or key decoding failed.
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// Identity or time provider could not answer.
    #[error("provider unavailable: {0}")]
    Provider(String),

    /// Network error while querying an external service.
    #[error("network error: {0}")]
    Network(String),

    /// Storage error.
    #[error("storage error: {0}")]
    Storage(String),

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<nodelock_types::Error> for LicenseError {
    fn from(err: nodelock_types::Error) -> Self {
        Self::InvalidValidity(err.to_string())
    }
}

impl From<toml::de::Error> for LicenseError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type for license operations.
pub type LicenseResult<T> = Result<T, LicenseError>;

//! Configuration for issuance, verification and the network-backed providers.
//!
//! Every section has working defaults, so an empty TOML document is a valid
//! configuration:
//!
//! ```toml
//! [issuer]
//! key_bits = 3072
//!
//! [verifier]
//! pinned_public_key = "MIIBIjANBgkqhkiG9w0BAQEFAAOC..."
//!
//! [network]
//! timeout_ms = 2000
//! ip_echo_endpoints = ["https://api.ipify.org"]
//! ```

use crate::error::{LicenseError, LicenseResult};
use nodelock_crypto::DEFAULT_KEY_BITS;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodelockConfig {
    pub issuer: IssuerConfig,
    pub verifier: VerifierConfig,
    pub network: NetworkConfig,
}

impl NodelockConfig {
    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> LicenseResult<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a TOML file.
    pub fn load(path: &Path) -> LicenseResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| LicenseError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&contents)
    }
}

/// Issuance settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssuerConfig {
    /// RSA modulus size for per-license key pairs.
    pub key_bits: usize,
}

impl Default for IssuerConfig {
    fn default() -> Self {
        Self {
            key_bits: DEFAULT_KEY_BITS,
        }
    }
}

/// Verification policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// When set, only licenses carrying exactly this public key verify.
    pub pinned_public_key: Option<String>,
}

/// Settings for [`crate::SystemIdentity`] and [`crate::NetworkClock`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Per-request timeout for external lookups.
    pub timeout_ms: u64,
    /// Services that answer with the caller's public IP as plain text,
    /// tried in order.
    pub ip_echo_endpoints: Vec<String>,
    /// URL whose HTTP `Date` header is used as the trusted time.
    pub time_endpoint: String,
    /// Address used for the UDP local-address probe. No packet is sent.
    pub probe_address: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 3_000,
            ip_echo_endpoints: vec![
                "https://icanhazip.com".to_string(),
                "https://checkip.amazonaws.com".to_string(),
                "https://api.ipify.org".to_string(),
                "https://ident.me".to_string(),
            ],
            time_endpoint: "https://www.cloudflare.com".to_string(),
            probe_address: "8.8.8.8:10002".to_string(),
        }
    }
}

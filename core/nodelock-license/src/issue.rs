//! License issuance.
//!
//! Issuance validates the request, stamps a sequence number and the
//! validity window, generates a key pair for this license alone and signs
//! the canonical message. The private key is returned to the caller and
//! plays no part in verification.

use crate::config::IssuerConfig;
use crate::error::{LicenseError, LicenseResult};
use crate::mac::MacAddress;
use crate::provider::{SystemClock, TimeProvider};
use crate::record::{LicenseClaims, LicenseRecord};
use nodelock_crypto::{generate_key_pair_with_rng, sign, PrivateKey, MAX_KEY_BITS, MIN_KEY_BITS};
use nodelock_types::{SequenceId, Timestamp, Validity};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use std::net::IpAddr;
use tracing::info;

/// Everything needed to issue one license.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRequest {
    pub vendor: String,
    pub application: String,
    pub user: String,
    pub project: String,
    /// Hardware address of the licensed machine, any accepted syntax.
    pub mac: String,
    /// IPv4 or IPv6 literal of the licensed machine.
    pub ip: String,
    pub validity: Validity,
}

/// The outcome of a successful issuance.
#[derive(Debug, Clone)]
pub struct Issued {
    /// The signed license, ready to persist and ship.
    pub license: LicenseRecord,
    /// The key that signed it. Archive or discard; verification never needs it.
    pub private_key: PrivateKey,
}

/// Issues signed licenses.
#[derive(Debug, Clone)]
pub struct Issuer<T = SystemClock> {
    clock: T,
    key_bits: usize,
}

impl Issuer<SystemClock> {
    /// Creates an issuer on the system clock with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for Issuer<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TimeProvider> Issuer<T> {
    /// Creates an issuer reading the issuance instant from `clock`.
    pub fn with_clock(clock: T) -> Self {
        Self::with_config(clock, &IssuerConfig::default())
    }

    pub fn with_config(clock: T, config: &IssuerConfig) -> Self {
        Self {
            clock,
            key_bits: config.key_bits,
        }
    }

    /// Overrides the RSA modulus size.
    #[must_use]
    pub fn key_bits(mut self, bits: usize) -> Self {
        self.key_bits = bits;
        self
    }

    /// Issues a license using the OS entropy source.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first offending input, or a
    /// crypto error if key generation or signing fails.
    pub fn issue(&self, request: &IssueRequest) -> LicenseResult<Issued> {
        self.issue_with_rng(request, &mut OsRng)
    }

    /// Issues a license drawing all randomness from `rng`.
    ///
    /// With a seeded RNG and a fixed clock the output is fully reproducible.
    pub fn issue_with_rng<R>(&self, request: &IssueRequest, rng: &mut R) -> LicenseResult<Issued>
    where
        R: RngCore + CryptoRng,
    {
        let (mac, ip) = self.validate(request)?;

        let mut sequence_bytes = [0u8; 16];
        rng.fill_bytes(&mut sequence_bytes);
        let sequence = SequenceId::from_random_bytes(sequence_bytes);

        let issued_at = Timestamp::from_millis(self.clock.now_millis());
        let expires_at = issued_at.checked_add(&request.validity)?;

        let claims = LicenseClaims {
            vendor: request.vendor.clone(),
            application: request.application.clone(),
            sequence: sequence.to_string(),
            user: request.user.clone(),
            project: request.project.clone(),
            mac,
            ip,
            issued_at: issued_at.to_rfc3339()?,
            expires_at: expires_at.as_millis(),
        };

        let key_pair = generate_key_pair_with_rng(rng, self.key_bits)?;
        let message = claims.canonical_message();
        let signature = sign(message.as_bytes(), key_pair.private_key.as_base64())?;

        info!(
            sequence = %claims.sequence,
            vendor = %claims.vendor,
            application = %claims.application,
            expires_at = claims.expires_at,
            "license issued"
        );

        let license = LicenseRecord::from_parts(
            claims,
            key_pair.public_key.as_base64().to_string(),
            signature,
        );
        Ok(Issued {
            license,
            private_key: key_pair.private_key,
        })
    }

    /// Checks every precondition before any cryptographic work.
    ///
    /// Returns the canonical MAC and the trimmed IP literal.
    fn validate(&self, request: &IssueRequest) -> LicenseResult<(String, String)> {
        require_non_blank("vendor", &request.vendor)?;
        require_non_blank("application", &request.application)?;
        require_non_blank("user", &request.user)?;
        require_non_blank("project", &request.project)?;

        let mac = MacAddress::canonicalize(&request.mac)?;

        let ip = request.ip.trim();
        if ip.parse::<IpAddr>().is_err() {
            return Err(LicenseError::InvalidIp(request.ip.clone()));
        }

        if !(MIN_KEY_BITS..=MAX_KEY_BITS).contains(&self.key_bits) {
            return Err(LicenseError::UnsupportedKeySize(self.key_bits));
        }
        if request.validity.amount == 0 {
            return Err(LicenseError::InvalidValidity(
                "validity amount must be positive".to_string(),
            ));
        }

        Ok((mac, ip.to_string()))
    }
}

fn require_non_blank(field: &'static str, value: &str) -> LicenseResult<()> {
    if value.trim().is_empty() {
        return Err(LicenseError::BlankField(field));
    }
    Ok(())
}

//! Offline license verification.
//!
//! A license verifies only if every check passes:
//! 1. the record is well-formed
//! 2. vendor and application match what the caller expects
//! 3. the public key matches the pinned vendor key, when one is pinned
//! 4. the signature covers the re-derived canonical message
//! 5. the license has not expired
//! 6. the licensed MAC is present on this machine
//! 7. the local IP matches the licensed IP
//!
//! Checks run cheapest first and stop at the first failure. Any failure or
//! error yields `false` at the boolean boundary; [`Verifier::evaluate`]
//! returns the classified [`Verdict`] for callers that need the reason.

use crate::config::VerifierConfig;
use crate::mac::MacAddress;
use crate::provider::{IdentityProvider, TimeProvider};
use crate::record::LicenseRecord;
use crate::store;
use std::fmt;
use std::net::IpAddr;
use std::path::Path;
use tracing::{debug, info, warn};

/// The classified outcome of a verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Every check passed.
    Valid,
    /// The record or the verification inputs are unusable.
    Malformed(String),
    /// Vendor, application or pinned key differ from what was expected.
    PolicyMismatch(String),
    /// The signature does not cover the record's content.
    SignatureInvalid,
    /// The license expired at or before the reference instant.
    Expired { expires_at: i64, now: i64 },
    /// This machine is not the licensed machine.
    IdentityMismatch(String),
    /// The identity provider could not answer.
    ProviderUnavailable(String),
}

impl Verdict {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Short stable name for logs and metrics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Malformed(_) => "malformed",
            Self::PolicyMismatch(_) => "policy_mismatch",
            Self::SignatureInvalid => "signature_invalid",
            Self::Expired { .. } => "expired",
            Self::IdentityMismatch(_) => "identity_mismatch",
            Self::ProviderUnavailable(_) => "provider_unavailable",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid => write!(f, "license is valid"),
            Self::Malformed(reason) => write!(f, "malformed license: {reason}"),
            Self::PolicyMismatch(reason) => write!(f, "policy mismatch: {reason}"),
            Self::SignatureInvalid => write!(f, "license signature invalid"),
            Self::Expired { expires_at, now } => {
                write!(f, "license expired at {expires_at} (now {now})")
            }
            Self::IdentityMismatch(reason) => write!(f, "identity mismatch: {reason}"),
            Self::ProviderUnavailable(reason) => write!(f, "provider unavailable: {reason}"),
        }
    }
}

/// Verifies licenses against this machine's identity and clock.
#[derive(Debug, Clone)]
pub struct Verifier<I, T> {
    identity: I,
    clock: T,
    pinned_public_key: Option<String>,
}

impl<I: IdentityProvider, T: TimeProvider> Verifier<I, T> {
    pub fn new(identity: I, clock: T) -> Self {
        Self {
            identity,
            clock,
            pinned_public_key: None,
        }
    }

    pub fn with_config(identity: I, clock: T, config: &VerifierConfig) -> Self {
        Self {
            identity,
            clock,
            pinned_public_key: config.pinned_public_key.clone(),
        }
    }

    /// Accepts only licenses whose embedded public key equals `public_key`.
    ///
    /// Without a pin, any self-consistent license verifies regardless of who
    /// generated its key pair.
    #[must_use]
    pub fn pin_public_key(mut self, public_key: impl Into<String>) -> Self {
        self.pinned_public_key = Some(public_key.into());
        self
    }

    /// Returns true iff the license passes every check.
    ///
    /// `current_timestamp` (epoch milliseconds) overrides the time provider.
    #[must_use]
    pub fn verify(
        &self,
        record: &LicenseRecord,
        expected_vendor: &str,
        expected_application: &str,
        current_timestamp: Option<i64>,
    ) -> bool {
        debug!(
            sequence = %record.sequence(),
            vendor = %record.vendor(),
            application = %record.application(),
            expires_at = record.claims().expires_at,
            "verifying license"
        );
        let verdict = self.evaluate(record, expected_vendor, expected_application, current_timestamp);
        log_verdict(Some(record.sequence()), &verdict);
        verdict.is_valid()
    }

    /// Parses a JSON artifact and verifies it. Unparseable input is `false`.
    #[must_use]
    pub fn verify_json(
        &self,
        json: &str,
        expected_vendor: &str,
        expected_application: &str,
        current_timestamp: Option<i64>,
    ) -> bool {
        match LicenseRecord::from_json(json) {
            Ok(record) => {
                self.verify(&record, expected_vendor, expected_application, current_timestamp)
            }
            Err(e) => {
                log_verdict(None, &Verdict::Malformed(e.to_string()));
                false
            }
        }
    }

    /// Reads a license file and verifies it. Unreadable files are `false`.
    #[must_use]
    pub fn verify_file(
        &self,
        path: &Path,
        expected_vendor: &str,
        expected_application: &str,
        current_timestamp: Option<i64>,
    ) -> bool {
        match store::read_license(path) {
            Ok(record) => {
                self.verify(&record, expected_vendor, expected_application, current_timestamp)
            }
            Err(e) => {
                log_verdict(None, &Verdict::Malformed(e.to_string()));
                false
            }
        }
    }

    /// Runs every check and classifies the first failure.
    pub fn evaluate(
        &self,
        record: &LicenseRecord,
        expected_vendor: &str,
        expected_application: &str,
        current_timestamp: Option<i64>,
    ) -> Verdict {
        if expected_vendor.trim().is_empty() || expected_application.trim().is_empty() {
            return Verdict::Malformed("expected vendor and application must not be blank".into());
        }
        if let Some(ts) = current_timestamp {
            if ts <= 0 {
                return Verdict::Malformed(format!("{ts} is not a valid current timestamp"));
            }
        }
        if record.public_key().trim().is_empty() || record.signature().trim().is_empty() {
            return Verdict::Malformed("license is not signed".into());
        }

        if record.vendor() != expected_vendor {
            return Verdict::PolicyMismatch(format!(
                "vendor {:?} is not {expected_vendor:?}",
                record.vendor()
            ));
        }
        if record.application() != expected_application {
            return Verdict::PolicyMismatch(format!(
                "application {:?} is not {expected_application:?}",
                record.application()
            ));
        }
        if let Some(pinned) = &self.pinned_public_key {
            if pinned.trim() != record.public_key().trim() {
                return Verdict::PolicyMismatch("public key is not the pinned vendor key".into());
            }
        }

        let message = record.canonical_message();
        if let Err(e) =
            nodelock_crypto::try_verify(message.as_bytes(), record.public_key(), record.signature())
        {
            debug!(error = %e, "signature check failed");
            return Verdict::SignatureInvalid;
        }

        let now = current_timestamp.unwrap_or_else(|| self.clock.now_millis());
        let expires_at = record.claims().expires_at;
        if expires_at <= now {
            return Verdict::Expired { expires_at, now };
        }

        let local_macs = match self.identity.local_mac_addresses() {
            Ok(macs) => macs,
            Err(e) => return Verdict::ProviderUnavailable(e.to_string()),
        };
        let licensed_mac = normalize_mac(record.mac());
        if !local_macs.iter().any(|m| normalize_mac(m) == licensed_mac) {
            return Verdict::IdentityMismatch(format!(
                "licensed MAC {} is not present on this machine",
                record.mac()
            ));
        }

        let local_ip = match self.identity.local_ip() {
            Ok(ip) => ip,
            Err(e) => return Verdict::ProviderUnavailable(e.to_string()),
        };
        if !same_ip(&local_ip, record.ip()) {
            return Verdict::IdentityMismatch(format!(
                "local IP {local_ip} is not licensed IP {}",
                record.ip()
            ));
        }

        Verdict::Valid
    }
}

fn log_verdict(sequence: Option<&str>, verdict: &Verdict) {
    let sequence = sequence.unwrap_or("-");
    if verdict.is_valid() {
        info!(sequence = %sequence, "license verified");
    } else {
        warn!(sequence = %sequence, verdict = verdict.kind(), "license rejected: {verdict}");
    }
}

/// Compares IP literals by address, so `::1` equals `0:0::1`.
fn same_ip(a: &str, b: &str) -> bool {
    match (a.trim().parse::<IpAddr>(), b.trim().parse::<IpAddr>()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a.trim() == b.trim(),
    }
}

fn normalize_mac(raw: &str) -> String {
    MacAddress::canonicalize(raw).unwrap_or_else(|_| raw.trim().to_string())
}

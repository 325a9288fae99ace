//! The license record and its JSON shape.
//!
//! A license is built in two stages. [`LicenseClaims`] holds the signed
//! fields and is freely mutable while issuance is in progress.
//! [`LicenseRecord`] pairs the claims with the public key and signature and
//! only exposes read access, so a signed record cannot be edited in place.
//!
//! JSON field names match the persisted artifact exactly:
//! `vendor`, `application`, `sequence`, `user`, `project`, `mac`, `ip`,
//! `generated`, `expiration`, `publicKey`, `signature`.

use crate::message::canonical_message;
use nodelock_types::Timestamp;
use serde::{Deserialize, Serialize};

/// The signed content of a license.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LicenseClaims {
    /// Issuer identity.
    pub vendor: String,
    /// Product name.
    pub application: String,
    /// Unique per-issuance identifier.
    pub sequence: String,
    /// Licensee, typically an email address.
    pub user: String,
    /// Licensee deployment or project label.
    pub project: String,
    /// Canonical hardware address of the licensed machine.
    pub mac: String,
    /// IP literal of the licensed machine.
    pub ip: String,
    /// Issuance instant, RFC 3339.
    #[serde(rename = "generated")]
    pub issued_at: String,
    /// Expiration instant, epoch milliseconds.
    #[serde(rename = "expiration")]
    pub expires_at: i64,
}

impl LicenseClaims {
    /// Returns the canonical message these claims are signed over.
    #[must_use]
    pub fn canonical_message(&self) -> String {
        canonical_message(self)
    }
}

/// A signed, read-only license.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseRecord {
    #[serde(flatten)]
    claims: LicenseClaims,
    public_key: String,
    signature: String,
}

impl LicenseRecord {
    /// Assembles a record from claims and trust material obtained elsewhere.
    ///
    /// Nothing is checked here; a record whose parts do not belong together
    /// simply fails verification.
    #[must_use]
    pub fn from_parts(claims: LicenseClaims, public_key: String, signature: String) -> Self {
        Self {
            claims,
            public_key,
            signature,
        }
    }

    /// Parses a record from its JSON artifact.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Renders the record as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[must_use]
    pub fn claims(&self) -> &LicenseClaims {
        &self.claims
    }

    #[must_use]
    pub fn vendor(&self) -> &str {
        &self.claims.vendor
    }

    #[must_use]
    pub fn application(&self) -> &str {
        &self.claims.application
    }

    #[must_use]
    pub fn sequence(&self) -> &str {
        &self.claims.sequence
    }

    #[must_use]
    pub fn user(&self) -> &str {
        &self.claims.user
    }

    #[must_use]
    pub fn project(&self) -> &str {
        &self.claims.project
    }

    #[must_use]
    pub fn mac(&self) -> &str {
        &self.claims.mac
    }

    #[must_use]
    pub fn ip(&self) -> &str {
        &self.claims.ip
    }

    /// Returns the `generated` string as stored.
    #[must_use]
    pub fn issued_at(&self) -> &str {
        &self.claims.issued_at
    }

    /// Parses the issuance instant, or `None` if it is not RFC 3339.
    #[must_use]
    pub fn issued_at_timestamp(&self) -> Option<Timestamp> {
        Timestamp::parse_rfc3339(&self.claims.issued_at).ok()
    }

    #[must_use]
    pub fn expires_at(&self) -> Timestamp {
        Timestamp::from_millis(self.claims.expires_at)
    }

    /// Base64 SubjectPublicKeyInfo of the key that signed this record.
    #[must_use]
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// Base64 signature over [`LicenseClaims::canonical_message`].
    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Returns the canonical message re-derived from the stored claims.
    #[must_use]
    pub fn canonical_message(&self) -> String {
        self.claims.canonical_message()
    }

    /// Splits the record back into its parts.
    #[must_use]
    pub fn into_parts(self) -> (LicenseClaims, String, String) {
        (self.claims, self.public_key, self.signature)
    }
}

//! Node-locked license issuance and offline verification.
//!
//! This crate handles:
//! - Issuing licenses signed with a per-license RSA key pair
//! - Binding licenses to a machine (MAC address and IP)
//! - Offline verification of signature, vendor/application, identity and expiry
//! - Reading and writing the JSON license artifact
//!
//! # Design Principles
//!
//! - **Self-contained artifact**: the license embeds the public key that
//!   verifies it, so no key distribution is needed
//! - **Fail-closed**: every verification error resolves to "not verified"
//! - **Pluggable machine identity and time**: lookups sit behind the
//!   [`IdentityProvider`] and [`TimeProvider`] traits
//!
//! # Trust Model
//!
//! The embedded public key proves that a license was not altered after
//! signing. It does not prove who signed it. Applications that need issuer
//! authentication pin the vendor's key with [`Verifier::pin_public_key`].
//!
//! # Signed Message
//!
//! The signature covers the UTF-8 bytes of
//! `vendor|application|sequence|user|project|mac|ip|generated|expiration`.

mod config;
mod device;
mod error;
mod issue;
mod mac;
mod message;
mod provider;
mod record;
pub mod store;
mod verify;

pub use config::{IssuerConfig, NetworkConfig, NodelockConfig, VerifierConfig};
pub use device::{NetworkClock, SystemIdentity};
pub use error::{LicenseError, LicenseResult};
pub use issue::{IssueRequest, Issued, Issuer};
pub use mac::MacAddress;
pub use message::{canonical_message, SEPARATOR};
pub use provider::{FixedClock, IdentityProvider, StaticIdentity, SystemClock, TimeProvider};
pub use record::{LicenseClaims, LicenseRecord};
pub use verify::{Verdict, Verifier};

pub use nodelock_crypto::PrivateKey;
pub use nodelock_types::{SequenceId, Timestamp, Validity, ValidityUnit};

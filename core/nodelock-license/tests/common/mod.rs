//! Shared test helpers for license tests.

#![allow(dead_code)]

use nodelock_license::{
    FixedClock, IssueRequest, Issued, Issuer, LicenseClaims, LicenseRecord, StaticIdentity,
    Validity, Verifier,
};
use std::sync::OnceLock;

pub const VENDOR: &str = "acme.com";
pub const APPLICATION: &str = "toolX";
pub const USER: &str = "u@acme.com";
pub const PROJECT: &str = "p1";
pub const MAC: &str = "70-F1-1C-11-58-0A";
pub const IP: &str = "192.168.1.10";

/// 2024-03-01T09:30:00.250Z
pub const ISSUED_AT_MS: i64 = 1_709_285_400_250;
pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// The request from the reference scenario: one year for acme.com/toolX.
pub fn request() -> IssueRequest {
    IssueRequest {
        vendor: VENDOR.to_string(),
        application: APPLICATION.to_string(),
        user: USER.to_string(),
        project: PROJECT.to_string(),
        mac: MAC.to_string(),
        ip: IP.to_string(),
        validity: Validity::days(365),
    }
}

pub fn issuer() -> Issuer<FixedClock> {
    Issuer::with_clock(FixedClock(ISSUED_AT_MS))
}

/// One issued license shared by every test in the binary (key generation
/// dominates test time).
pub fn issued() -> &'static Issued {
    static ISSUED: OnceLock<Issued> = OnceLock::new();
    ISSUED.get_or_init(|| issuer().issue(&request()).unwrap())
}

pub fn license() -> &'static LicenseRecord {
    &issued().license
}

/// An identity that matches the licensed machine.
pub fn licensed_machine() -> StaticIdentity {
    StaticIdentity::new(IP, [MAC])
}

pub fn verifier() -> Verifier<StaticIdentity, FixedClock> {
    Verifier::new(licensed_machine(), FixedClock(ISSUED_AT_MS + DAY_MS))
}

pub fn verifier_on(identity: StaticIdentity) -> Verifier<StaticIdentity, FixedClock> {
    Verifier::new(identity, FixedClock(ISSUED_AT_MS + DAY_MS))
}

/// Re-assembles the shared license with edited claims but the original
/// key and signature.
pub fn tampered(edit: impl FnOnce(&mut LicenseClaims)) -> LicenseRecord {
    let mut claims = license().claims().clone();
    edit(&mut claims);
    LicenseRecord::from_parts(
        claims,
        license().public_key().to_string(),
        license().signature().to_string(),
    )
}

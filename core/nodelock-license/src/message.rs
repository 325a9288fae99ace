//! Canonical message construction.
//!
//! The signed message is the `|`-joined sequence of the claim fields in a
//! fixed order. Nothing is escaped: the message is only ever recomputed and
//! compared, never parsed back, so a `|` inside a field is harmless.

use crate::record::LicenseClaims;

/// Field separator in the canonical message.
pub const SEPARATOR: char = '|';

/// Builds the exact string whose UTF-8 bytes are signed.
///
/// Order: vendor, application, sequence, user, project, mac, ip, generated,
/// expiration (decimal).
#[must_use]
pub fn canonical_message(claims: &LicenseClaims) -> String {
    let expiration = claims.expires_at.to_string();
    [
        claims.vendor.as_str(),
        claims.application.as_str(),
        claims.sequence.as_str(),
        claims.user.as_str(),
        claims.project.as_str(),
        claims.mac.as_str(),
        claims.ip.as_str(),
        claims.issued_at.as_str(),
        expiration.as_str(),
    ]
    .join(&SEPARATOR.to_string())
}

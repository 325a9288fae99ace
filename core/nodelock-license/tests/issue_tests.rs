mod common;

use common::{issued, issuer, license, request, DAY_MS, ISSUED_AT_MS, MAC};
use nodelock_license::{
    FixedClock, IssueRequest, Issuer, LicenseError, SequenceId, Timestamp, Validity, ValidityUnit,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

// ── Issued record ────────────────────────────────────────────────

#[test]
fn copies_request_fields() {
    let license = license();
    assert_eq!(license.vendor(), "acme.com");
    assert_eq!(license.application(), "toolX");
    assert_eq!(license.user(), "u@acme.com");
    assert_eq!(license.project(), "p1");
    assert_eq!(license.mac(), MAC);
    assert_eq!(license.ip(), "192.168.1.10");
}

#[test]
fn stamps_issuance_and_expiry() {
    let license = license();
    assert_eq!(license.issued_at(), "2024-03-01T09:30:00.250Z");
    assert_eq!(
        license.issued_at_timestamp(),
        Some(Timestamp::from_millis(ISSUED_AT_MS))
    );
    assert_eq!(license.expires_at().as_millis(), ISSUED_AT_MS + 365 * DAY_MS);
}

#[test]
fn sequence_is_simple_uuid() {
    let sequence = license().sequence();
    assert_eq!(sequence.len(), 32);
    assert!(SequenceId::parse(sequence).is_ok());
}

#[test]
fn embeds_matching_public_key() {
    let issued = issued();
    assert!(!issued.license.signature().is_empty());
    assert_eq!(
        issued.private_key.public_key().unwrap().as_base64(),
        issued.license.public_key()
    );
}

#[test]
fn signature_covers_canonical_message() {
    let license = license();
    assert!(nodelock_crypto::verify(
        license.canonical_message().as_bytes(),
        license.public_key(),
        license.signature(),
    ));
}

#[test]
fn private_key_never_serialized() {
    let issued = issued();
    let json = issued.license.to_json_pretty().unwrap();
    assert!(!json.contains(issued.private_key.as_base64()));
}

#[test]
fn mac_is_canonicalized() {
    let mut req = request();
    req.mac = "70:f1:1c:11:58:a".to_string();
    let issued = issuer().issue(&req).unwrap();
    assert_eq!(issued.license.mac(), MAC);
}

#[test]
fn calendar_validity() {
    let mut req = request();
    req.validity = Validity::new(1, ValidityUnit::Months);
    let issued = issuer().issue(&req).unwrap();
    // 2024-03-01 + 1 month = 2024-04-01 (31 days)
    assert_eq!(
        issued.license.expires_at().as_millis(),
        ISSUED_AT_MS + 31 * DAY_MS
    );
}

#[test]
fn seeded_issuance_is_reproducible() {
    let a = issuer()
        .issue_with_rng(&request(), &mut StdRng::seed_from_u64(42))
        .unwrap();
    let b = issuer()
        .issue_with_rng(&request(), &mut StdRng::seed_from_u64(42))
        .unwrap();
    assert_eq!(a.license, b.license);
    assert_eq!(a.private_key.as_base64(), b.private_key.as_base64());
}

#[test]
fn sequences_differ_between_issuances() {
    let other = issuer().issue(&request()).unwrap();
    assert_ne!(other.license.sequence(), license().sequence());
    assert_ne!(other.license.public_key(), license().public_key());
}

// ── Validation ───────────────────────────────────────────────────

fn expect_err(req: &IssueRequest) -> LicenseError {
    issuer().issue(req).unwrap_err()
}

#[test]
fn rejects_blank_fields() {
    let cases: [(&str, fn(&mut IssueRequest)); 4] = [
        ("vendor", |r| r.vendor = "  ".into()),
        ("application", |r| r.application = String::new()),
        ("user", |r| r.user = "\t".into()),
        ("project", |r| r.project = String::new()),
    ];
    for (field, edit) in cases {
        let mut req = request();
        edit(&mut req);
        match expect_err(&req) {
            LicenseError::BlankField(name) => assert_eq!(name, field),
            other => panic!("expected BlankField({field}), got {other:?}"),
        }
    }
}

#[test]
fn rejects_invalid_mac() {
    for mac in ["", "70-F1-1C-11-58", "70-F1-1C-11-58-0G", "hello", "70:F1-1C:11-58:0A"] {
        let mut req = request();
        req.mac = mac.to_string();
        assert!(
            matches!(expect_err(&req), LicenseError::InvalidMac(_)),
            "mac {mac:?} accepted"
        );
    }
}

#[test]
fn accepts_cisco_mac() {
    let mut req = request();
    req.mac = "70f1.1c11.580a".to_string();
    let issued = issuer().issue(&req).unwrap();
    assert_eq!(issued.license.mac(), MAC);
}

#[test]
fn rejects_invalid_ip() {
    for ip in ["", "192.168.1", "256.1.1.1", "localhost", "::g"] {
        let mut req = request();
        req.ip = ip.to_string();
        assert!(
            matches!(expect_err(&req), LicenseError::InvalidIp(_)),
            "ip {ip:?} accepted"
        );
    }
}

#[test]
fn accepts_ipv6() {
    let mut req = request();
    req.ip = "fe80::1ff:fe23:4567:890a".to_string();
    let issued = issuer().issue(&req).unwrap();
    assert_eq!(issued.license.ip(), "fe80::1ff:fe23:4567:890a");
}

#[test]
fn rejects_unsupported_key_size() {
    let err = issuer().key_bits(1024).issue(&request()).unwrap_err();
    assert!(matches!(err, LicenseError::UnsupportedKeySize(1024)));
}

#[test]
fn rejects_zero_validity() {
    let mut req = request();
    req.validity = Validity::days(0);
    assert!(matches!(expect_err(&req), LicenseError::InvalidValidity(_)));
}

#[test]
fn rejects_overflowing_validity() {
    let mut req = request();
    req.validity = Validity::years(u32::MAX);
    assert!(matches!(expect_err(&req), LicenseError::InvalidValidity(_)));
}

#[test]
fn validation_precedes_key_generation() {
    // 4096-bit generation is slow; the blank vendor must be reported first.
    let mut req = request();
    req.vendor = String::new();
    let err = Issuer::with_clock(FixedClock(ISSUED_AT_MS))
        .key_bits(4096)
        .issue(&req)
        .unwrap_err();
    assert!(matches!(err, LicenseError::BlankField("vendor")));
}

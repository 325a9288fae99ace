use nodelock_crypto::CryptoError;
use nodelock_license::{LicenseError, NodelockConfig};

#[test]
fn error_display_blank_field() {
    let err = LicenseError::BlankField("vendor");
    assert_eq!(err.to_string(), "vendor should not be blank");
}

#[test]
fn error_display_invalid_mac() {
    let err = LicenseError::InvalidMac("zz-zz".into());
    assert_eq!(err.to_string(), "[zz-zz] is not a valid MAC address");
}

#[test]
fn error_display_invalid_ip() {
    let err = LicenseError::InvalidIp("1.2.3".into());
    assert!(err.to_string().contains("[1.2.3]"));
}

#[test]
fn error_display_key_size() {
    let err = LicenseError::UnsupportedKeySize(512);
    let msg = err.to_string();
    assert!(msg.contains("key size"));
    assert!(msg.contains("512"));
}

#[test]
fn error_from_crypto() {
    let err: LicenseError = CryptoError::KeyFormat("bad DER".into()).into();
    assert!(matches!(err, LicenseError::Crypto(_)));
    assert!(err.to_string().contains("bad DER"));
}

#[test]
fn error_from_serde_json() {
    let serde_err: Result<serde_json::Value, _> = serde_json::from_str("not json");
    let err: LicenseError = serde_err.unwrap_err().into();
    assert!(err.to_string().contains("serialization"));
}

#[test]
fn error_from_types() {
    let err: LicenseError =
        nodelock_types::Error::InvalidValidity("overflow".into()).into();
    assert!(matches!(err, LicenseError::InvalidValidity(_)));
}

#[test]
fn error_from_toml() {
    let err = NodelockConfig::from_toml_str("[issuer\n").unwrap_err();
    assert!(err.to_string().contains("invalid configuration"));
}

#[test]
fn error_display_provider() {
    let err = LicenseError::Provider("no interfaces".into());
    assert!(err.to_string().contains("provider unavailable"));
}

#[test]
fn error_is_debug() {
    let err = LicenseError::Storage("disk full".into());
    let _ = format!("{err:?}");
}

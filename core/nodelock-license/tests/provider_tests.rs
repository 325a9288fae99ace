use nodelock_license::{
    FixedClock, IdentityProvider, NetworkConfig, StaticIdentity, SystemClock, SystemIdentity,
    TimeProvider,
};

#[test]
fn fixed_clock_is_fixed() {
    let clock = FixedClock(1234);
    assert_eq!(clock.now_millis(), 1234);
    assert_eq!(clock.now_millis(), 1234);
}

#[test]
fn system_clock_is_current() {
    let now = SystemClock.now_millis();
    assert!(now > 1_700_000_000_000);
}

fn read_clock<T: TimeProvider>(clock: T) -> i64 {
    clock.now_millis()
}

#[test]
fn clock_through_reference() {
    let clock = FixedClock(7);
    assert_eq!(read_clock(&clock), 7);
}

#[test]
fn static_identity_canonicalizes_macs() {
    let identity = StaticIdentity::new("10.0.0.1", ["70:f1:1c:11:58:0a", "70f1.1c11.580b"]);
    let macs = identity.local_mac_addresses().unwrap();
    assert!(macs.contains("70-F1-1C-11-58-0A"));
    assert!(macs.contains("70-F1-1C-11-58-0B"));
    assert_eq!(identity.local_ip().unwrap(), "10.0.0.1");
}

#[test]
fn static_identity_keeps_unparseable_macs_verbatim() {
    let identity = StaticIdentity::new("10.0.0.1", ["fallback-host"]);
    assert!(identity.local_mac_addresses().unwrap().contains("fallback-host"));
}

#[test]
fn system_identity_macs_are_canonical() {
    // Containers may expose no hardware addresses; only check the format.
    if let Ok(macs) = SystemIdentity::default().local_mac_addresses() {
        for mac in macs {
            assert_eq!(mac.len(), 17, "{mac}");
            assert_eq!(mac.matches('-').count(), 5, "{mac}");
            assert_eq!(mac, mac.to_uppercase());
            assert_ne!(mac, "00-00-00-00-00-00");
        }
    }
}

#[test]
fn system_identity_probe_failure_is_an_error() {
    let identity = SystemIdentity::new(NetworkConfig {
        ip_echo_endpoints: Vec::new(),
        probe_address: "invalid probe".into(),
        ..NetworkConfig::default()
    });
    assert!(identity.local_ip().is_err());
}

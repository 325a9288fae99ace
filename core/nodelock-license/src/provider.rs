//! Machine identity and clock abstractions.
//!
//! Verification needs to know which machine it runs on and what time it is.
//! Both answers come from outside the protocol, so they are traits here;
//! production implementations live in [`crate::device`], and the static
//! implementations below serve air-gapped deployments and tests.

use crate::error::LicenseResult;
use crate::mac::MacAddress;
use chrono::Utc;
use std::collections::BTreeSet;

/// Supplies the identity of the machine a license is verified on.
pub trait IdentityProvider {
    /// Returns the IP literal this machine is reachable at.
    fn local_ip(&self) -> LicenseResult<String>;

    /// Returns every hardware address on this machine, formatted as
    /// uppercase hex octets joined by `-`.
    fn local_mac_addresses(&self) -> LicenseResult<BTreeSet<String>>;
}

/// Supplies the current time in epoch milliseconds.
pub trait TimeProvider {
    fn now_millis(&self) -> i64;
}

impl<P: IdentityProvider + ?Sized> IdentityProvider for &P {
    fn local_ip(&self) -> LicenseResult<String> {
        (**self).local_ip()
    }

    fn local_mac_addresses(&self) -> LicenseResult<BTreeSet<String>> {
        (**self).local_mac_addresses()
    }
}

impl<T: TimeProvider + ?Sized> TimeProvider for &T {
    fn now_millis(&self) -> i64 {
        (**self).now_millis()
    }
}

/// The local system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeProvider for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl TimeProvider for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

/// A fixed identity, for machines whose address is known up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticIdentity {
    ip: String,
    macs: BTreeSet<String>,
}

impl StaticIdentity {
    /// Creates an identity from an IP and any number of MAC addresses.
    ///
    /// MACs that parse are stored in canonical form; others are kept verbatim
    /// and will simply never match a license.
    pub fn new<I, S>(ip: impl Into<String>, macs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let macs = macs
            .into_iter()
            .map(|m| {
                let m = m.as_ref();
                MacAddress::canonicalize(m).unwrap_or_else(|_| m.to_string())
            })
            .collect();
        Self {
            ip: ip.into(),
            macs,
        }
    }
}

impl IdentityProvider for StaticIdentity {
    fn local_ip(&self) -> LicenseResult<String> {
        Ok(self.ip.clone())
    }

    fn local_mac_addresses(&self) -> LicenseResult<BTreeSet<String>> {
        Ok(self.macs.clone())
    }
}

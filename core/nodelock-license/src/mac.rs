//! Hardware address parsing and canonical formatting.
//!
//! Accepted inputs:
//! - six octets of one or two hex digits, separated uniformly by `:` or `-`
//!   (`70:f1:1c:11:58:0a`, `70-F1-1C-11-58-A`)
//! - Cisco dotted form, three groups of four hex digits (`70f1.1c11.580a`)
//!
//! The canonical form is uppercase, two digits per octet, joined by `-`.

use crate::error::{LicenseError, LicenseResult};
use std::fmt;
use std::str::FromStr;

/// A 48-bit hardware (MAC) address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    #[must_use]
    pub const fn new(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    #[must_use]
    pub const fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// Returns true for the all-zero address reported by loopback devices.
    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0 == [0; 6]
    }

    /// Parses any accepted syntax.
    ///
    /// Colon and hyphen forms must use one separator throughout; mixed forms
    /// such as `70:F1-1C:11-58:0A` are rejected on purpose.
    pub fn parse(s: &str) -> LicenseResult<Self> {
        let s = s.trim();
        let invalid = || LicenseError::InvalidMac(s.to_string());

        if s.contains('.') {
            return parse_cisco(s).ok_or_else(invalid);
        }

        let separator = if s.contains(':') { ':' } else { '-' };
        let groups: Vec<&str> = s.split(separator).collect();
        if groups.len() != 6 {
            return Err(invalid());
        }

        let mut octets = [0u8; 6];
        for (octet, group) in octets.iter_mut().zip(&groups) {
            if group.is_empty() || group.len() > 2 || !group.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(invalid());
            }
            *octet = u8::from_str_radix(group, 16).map_err(|_| invalid())?;
        }
        Ok(Self(octets))
    }

    /// Normalises `s` to the canonical form.
    pub fn canonicalize(s: &str) -> LicenseResult<String> {
        Self::parse(s).map(|mac| mac.to_string())
    }
}

fn parse_cisco(s: &str) -> Option<MacAddress> {
    let groups: Vec<&str> = s.split('.').collect();
    if groups.len() != 3 {
        return None;
    }

    let mut octets = [0u8; 6];
    for (i, group) in groups.iter().enumerate() {
        if group.len() != 4 || !group.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let word = u16::from_str_radix(group, 16).ok()?;
        let [hi, lo] = word.to_be_bytes();
        octets[i * 2] = hi;
        octets[i * 2 + 1] = lo;
    }
    Some(MacAddress(octets))
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02X}-{b:02X}-{c:02X}-{d:02X}-{e:02X}-{g:02X}")
    }
}

impl FromStr for MacAddress {
    type Err = LicenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_forms() {
        for input in [
            "70-F1-1C-11-58-0A",
            "70:f1:1c:11:58:0a",
            "70-F1-1C-11-58-A",
            "70f1.1c11.580a",
            "  70:F1:1C:11:58:0A ",
        ] {
            assert_eq!(MacAddress::canonicalize(input).unwrap(), "70-F1-1C-11-58-0A", "{input}");
        }
    }

    #[test]
    fn rejects_mixed_separators() {
        assert!(MacAddress::parse("70:F1-1C:11-58:0A").is_err());
    }

    #[test]
    fn rejects_wrong_group_counts() {
        assert!(MacAddress::parse("70-F1-1C-11-58").is_err());
        assert!(MacAddress::parse("70-F1-1C-11-58-0A-FF").is_err());
        assert!(MacAddress::parse("70f1.1c11").is_err());
    }

    #[test]
    fn rejects_non_hex() {
        assert!(MacAddress::parse("70-F1-1C-11-58-0G").is_err());
        assert!(MacAddress::parse("70-F1-1C-11-58-+A").is_err());
        assert!(MacAddress::parse("70f1.1c11.58zz").is_err());
    }

    #[test]
    fn rejects_oversized_octets() {
        assert!(MacAddress::parse("700-F1-1C-11-58-0A").is_err());
        assert!(MacAddress::parse("70-F1--11-58-0A").is_err());
    }

    #[test]
    fn nil_address() {
        assert!(MacAddress::parse("00:00:00:00:00:00").unwrap().is_nil());
        assert!(!MacAddress::new([1, 0, 0, 0, 0, 0]).is_nil());
    }
}

//! Machine identity and time from the running system.
//!
//! MAC addresses are read from the operating system. The IP and the trusted
//! time come from external services when the `online` feature is enabled;
//! each lookup gets a bounded timeout and a single attempt per endpoint, and
//! falls back to a local answer when every endpoint fails.

use crate::config::NetworkConfig;
use crate::error::{LicenseError, LicenseResult};
use crate::mac::MacAddress;
use crate::provider::{IdentityProvider, TimeProvider};
use chrono::Utc;
use std::collections::BTreeSet;
use std::net::{IpAddr, SocketAddr, ToSocketAddrs, UdpSocket};
use tracing::{debug, warn};

/// Identity of the machine this process runs on.
#[derive(Debug, Clone, Default)]
pub struct SystemIdentity {
    config: NetworkConfig,
}

impl SystemIdentity {
    #[must_use]
    pub fn new(config: NetworkConfig) -> Self {
        Self { config }
    }

    /// Finds the local address the OS would route `probe_address` through.
    ///
    /// Connecting a UDP socket only selects a route; nothing is transmitted.
    fn probe_local_ip(&self) -> LicenseResult<IpAddr> {
        let target: SocketAddr = self
            .config
            .probe_address
            .to_socket_addrs()
            .ok()
            .and_then(|mut addrs| addrs.next())
            .ok_or_else(|| {
                LicenseError::Provider(format!(
                    "unresolvable probe address {}",
                    self.config.probe_address
                ))
            })?;

        let bind = if target.is_ipv6() { "[::]:0" } else { "0.0.0.0:0" };
        let socket = UdpSocket::bind(bind)
            .map_err(|e| LicenseError::Provider(format!("udp bind: {e}")))?;
        socket
            .connect(target)
            .map_err(|e| LicenseError::Provider(format!("udp connect {target}: {e}")))?;
        let local = socket
            .local_addr()
            .map_err(|e| LicenseError::Provider(format!("udp local address: {e}")))?;
        Ok(local.ip())
    }

    #[cfg(feature = "online")]
    fn public_ip(&self) -> Option<String> {
        let client = match http_client(&self.config) {
            Ok(client) => client,
            Err(e) => {
                warn!("IP echo lookup disabled: {e}");
                return None;
            }
        };

        for endpoint in &self.config.ip_echo_endpoints {
            let answer = client
                .get(endpoint)
                .send()
                .and_then(|resp| resp.error_for_status())
                .and_then(|resp| resp.text());
            match answer {
                Ok(body) => match parse_echo_body(&body) {
                    Some(ip) => {
                        debug!(endpoint = %endpoint, ip = %ip, "public IP resolved");
                        return Some(ip);
                    }
                    None => warn!(endpoint = %endpoint, "IP echo service returned a non-IP body"),
                },
                Err(e) => warn!(endpoint = %endpoint, "fail to query IP echo service: {e}"),
            }
        }
        None
    }

    #[cfg(not(feature = "online"))]
    fn public_ip(&self) -> Option<String> {
        None
    }
}

impl IdentityProvider for SystemIdentity {
    fn local_ip(&self) -> LicenseResult<String> {
        if let Some(ip) = self.public_ip() {
            return Ok(ip);
        }
        let ip = self.probe_local_ip()?;
        debug!(ip = %ip, "local IP resolved by UDP probe");
        Ok(ip.to_string())
    }

    fn local_mac_addresses(&self) -> LicenseResult<BTreeSet<String>> {
        let macs: BTreeSet<String> = collect_hardware_addresses()
            .iter()
            .filter_map(|raw| MacAddress::parse(raw).ok())
            .filter(|mac| !mac.is_nil())
            .map(|mac| mac.to_string())
            .collect();

        if macs.is_empty() {
            return Err(LicenseError::Provider(
                "no hardware addresses found".to_string(),
            ));
        }
        Ok(macs)
    }
}

/// Clock backed by an HTTP `Date` header, falling back to the system clock.
#[derive(Debug, Clone, Default)]
pub struct NetworkClock {
    config: NetworkConfig,
}

impl NetworkClock {
    #[must_use]
    pub fn new(config: NetworkConfig) -> Self {
        Self { config }
    }

    #[cfg(feature = "online")]
    fn remote_millis(&self) -> LicenseResult<i64> {
        let client = http_client(&self.config)?;
        let resp = client
            .head(&self.config.time_endpoint)
            .send()
            .map_err(|e| LicenseError::Network(format!("time request failed: {e}")))?;
        let date = resp
            .headers()
            .get(reqwest::header::DATE)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| LicenseError::Network("response has no Date header".to_string()))?;
        parse_http_date(date)
    }

    #[cfg(not(feature = "online"))]
    fn remote_millis(&self) -> LicenseResult<i64> {
        Err(LicenseError::Network(
            "built without the online feature".to_string(),
        ))
    }
}

impl TimeProvider for NetworkClock {
    fn now_millis(&self) -> i64 {
        match self.remote_millis() {
            Ok(millis) => millis,
            Err(e) => {
                warn!(endpoint = %self.config.time_endpoint, "falling back to system clock: {e}");
                Utc::now().timestamp_millis()
            }
        }
    }
}

#[cfg(feature = "online")]
fn http_client(config: &NetworkConfig) -> LicenseResult<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_millis(config.timeout_ms))
        .user_agent(concat!("nodelock/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| LicenseError::Network(format!("http client: {e}")))
}

/// Reads an IP echo response body, which must be a bare IP literal.
#[cfg_attr(not(feature = "online"), allow(dead_code))]
fn parse_echo_body(body: &str) -> Option<String> {
    let candidate = body.trim();
    candidate
        .parse::<IpAddr>()
        .ok()
        .map(|_| candidate.to_string())
}

/// Parses an HTTP `Date` header (`Fri, 16 Oct 2026 10:00:00 GMT`) to epoch ms.
#[cfg_attr(not(feature = "online"), allow(dead_code))]
fn parse_http_date(date: &str) -> LicenseResult<i64> {
    chrono::DateTime::parse_from_rfc2822(date.trim())
        .map(|dt| dt.timestamp_millis())
        .map_err(|e| LicenseError::Network(format!("unparseable Date header {date:?}: {e}")))
}

/// Collects raw hardware address strings from the OS.
fn collect_hardware_addresses() -> Vec<String> {
    #[cfg(target_os = "linux")]
    {
        // Each interface exposes its address in /sys/class/net/<iface>/address
        std::fs::read_dir("/sys/class/net")
            .map(|entries| {
                entries
                    .filter_map(Result::ok)
                    .filter_map(|entry| std::fs::read_to_string(entry.path().join("address")).ok())
                    .map(|s| s.trim().to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("ifconfig")
            .output()
            .ok()
            .and_then(|o| String::from_utf8(o.stdout).ok())
            .map(|output| {
                output
                    .lines()
                    .filter_map(|l| l.trim().strip_prefix("ether "))
                    .map(|rest| rest.split_whitespace().next().unwrap_or_default().to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    #[cfg(target_os = "windows")]
    {
        // `getmac /fo csv /nh` prints "AA-BB-CC-DD-EE-FF","\Device\..." per adapter
        std::process::Command::new("getmac")
            .args(["/fo", "csv", "/nh"])
            .output()
            .ok()
            .and_then(|o| String::from_utf8(o.stdout).ok())
            .map(|output| {
                output
                    .lines()
                    .filter_map(|l| l.split(',').next())
                    .map(|s| s.trim_matches('"').to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        Vec::new()
    }
}

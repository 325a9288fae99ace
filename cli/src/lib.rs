//! Command implementations behind the `nodelock` binary.

use anyhow::{Context, Result};
use nodelock_license::{
    store, IdentityProvider, IssueRequest, Issued, Issuer, TimeProvider,
};
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

/// What a customer sends to the vendor so a license can be issued for
/// their machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityReport {
    pub ip: Option<String>,
    pub macs: Vec<String>,
}

/// Collects the local identity, tolerating a missing half.
pub fn identity_report(provider: &impl IdentityProvider) -> IdentityReport {
    let ip = provider
        .local_ip()
        .map_err(|e| warn!("could not determine local IP: {e}"))
        .ok();
    let macs = provider
        .local_mac_addresses()
        .map(|set| set.into_iter().collect())
        .unwrap_or_else(|e| {
            warn!("could not enumerate hardware addresses: {e}");
            Vec::new()
        });
    IdentityReport { ip, macs }
}

/// Issues a license and writes it to `license_path`.
///
/// The private key goes to `key_path` when given; otherwise the caller is
/// responsible for the returned key.
pub fn issue_to_files<T: TimeProvider>(
    issuer: &Issuer<T>,
    request: &IssueRequest,
    license_path: &Path,
    key_path: Option<&Path>,
) -> Result<Issued> {
    let issued = issuer.issue(request).context("failed to issue license")?;

    store::write_license(license_path, &issued.license)
        .with_context(|| format!("failed to write {}", license_path.display()))?;
    info!(path = %license_path.display(), sequence = %issued.license.sequence(), "license written");

    if let Some(key_path) = key_path {
        store::write_private_key(key_path, &issued.private_key)
            .with_context(|| format!("failed to write {}", key_path.display()))?;
        info!(path = %key_path.display(), "private key written");
    }

    Ok(issued)
}

//! Reading and writing license artifacts on disk.

use crate::error::{LicenseError, LicenseResult};
use crate::record::LicenseRecord;
use nodelock_crypto::PrivateKey;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Writes `record` as pretty-printed JSON, replacing any existing file.
pub fn write_license(path: &Path, record: &LicenseRecord) -> LicenseResult<()> {
    let json = record.to_json_pretty()?;
    fs::write(path, json).map_err(|e| storage_error(path, e))
}

/// Reads a license artifact.
///
/// # Errors
///
/// Returns [`LicenseError::Storage`] if the file cannot be read and
/// [`LicenseError::Serialization`] if it is not a complete license.
pub fn read_license(path: &Path) -> LicenseResult<LicenseRecord> {
    let json = fs::read_to_string(path).map_err(|e| storage_error(path, e))?;
    Ok(LicenseRecord::from_json(&json)?)
}

/// Writes the base64 private key, readable by the owner only on Unix.
///
/// The file is created with mode 0600, and an existing file is narrowed to
/// 0600 before any key bytes are written to it.
pub fn write_private_key(path: &Path, key: &PrivateKey) -> LicenseResult<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path).map_err(|e| storage_error(path, e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))
            .map_err(|e| storage_error(path, e))?;
    }

    file.set_len(0).map_err(|e| storage_error(path, e))?;
    file.write_all(key.as_base64().as_bytes())
        .map_err(|e| storage_error(path, e))
}

/// Reads a private key written by [`write_private_key`].
pub fn read_private_key(path: &Path) -> LicenseResult<PrivateKey> {
    let encoded = fs::read_to_string(path).map_err(|e| storage_error(path, e))?;
    Ok(PrivateKey::from_base64(encoded.trim())?)
}

fn storage_error(path: &Path, err: std::io::Error) -> LicenseError {
    LicenseError::Storage(format!("{}: {err}", path.display()))
}

mod common;

use common::{issued, license, verifier, APPLICATION, VENDOR};
use nodelock_license::store::{read_license, read_private_key, write_license, write_private_key};
use nodelock_license::LicenseError;
use tempfile::TempDir;

#[test]
fn write_then_read_license() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("license.json");
    write_license(&path, license()).unwrap();
    assert_eq!(&read_license(&path).unwrap(), license());
}

#[test]
fn written_license_is_pretty_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("license.json");
    write_license(&path, license()).unwrap();
    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("{\n"));
    assert!(contents.contains("\"publicKey\""));
}

#[test]
fn read_missing_file_is_storage_error() {
    let dir = TempDir::new().unwrap();
    let err = read_license(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, LicenseError::Storage(_)));
}

#[test]
fn read_garbage_is_serialization_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("license.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        read_license(&path).unwrap_err(),
        LicenseError::Serialization(_)
    ));
}

#[test]
fn verify_file_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("license.json");
    write_license(&path, license()).unwrap();
    assert!(verifier().verify_file(&path, VENDOR, APPLICATION, None));
}

#[test]
fn verify_file_fails_closed() {
    let dir = TempDir::new().unwrap();
    assert!(!verifier().verify_file(&dir.path().join("absent.json"), VENDOR, APPLICATION, None));

    let path = dir.path().join("truncated.json");
    let json = license().to_json_pretty().unwrap();
    std::fs::write(&path, &json[..json.len() / 2]).unwrap();
    assert!(!verifier().verify_file(&path, VENDOR, APPLICATION, None));

    // A directory is not a license file.
    assert!(!verifier().verify_file(dir.path(), VENDOR, APPLICATION, None));
}

#[test]
fn private_key_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("license.key");
    write_private_key(&path, &issued().private_key).unwrap();
    let key = read_private_key(&path).unwrap();
    assert_eq!(key.as_base64(), issued().private_key.as_base64());
}

#[cfg(unix)]
#[test]
fn private_key_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("license.key");
    write_private_key(&path, &issued().private_key).unwrap();
    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[cfg(unix)]
#[test]
fn existing_key_file_is_narrowed_before_rewrite() {
    use std::os::unix::fs::PermissionsExt;
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("license.key");
    std::fs::write(&path, "a much longer stale key that must not survive the rewrite").unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

    write_private_key(&path, &issued().private_key).unwrap();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
    let key = read_private_key(&path).unwrap();
    assert_eq!(key.as_base64(), issued().private_key.as_base64());
}

#[cfg(unix)]
#[test]
fn key_file_is_never_group_or_world_readable() {
    use std::os::unix::fs::PermissionsExt;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("license.key");
    let done = Arc::new(AtomicBool::new(false));

    let watcher = {
        let path = path.clone();
        let done = Arc::clone(&done);
        std::thread::spawn(move || {
            let mut exposed = false;
            while !done.load(Ordering::Relaxed) {
                if let Ok(meta) = std::fs::metadata(&path) {
                    exposed |= meta.permissions().mode() & 0o077 != 0;
                }
            }
            exposed
        })
    };

    for _ in 0..200 {
        let _ = std::fs::remove_file(&path);
        write_private_key(&path, &issued().private_key).unwrap();
    }
    done.store(true, Ordering::Relaxed);
    assert!(!watcher.join().unwrap(), "key file was observed with group/other bits");
}

#[test]
fn read_private_key_rejects_garbage() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("license.key");
    std::fs::write(&path, "definitely not a key").unwrap();
    assert!(matches!(
        read_private_key(&path).unwrap_err(),
        LicenseError::Crypto(_)
    ));
}

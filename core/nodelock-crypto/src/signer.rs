//! Signing and verification over raw message bytes.

use crate::error::{CryptoError, CryptoResult};
use crate::key::{decode_private, decode_public};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use sha2::Sha256;

/// Signs `message` with a base64 PKCS#8 private key.
///
/// PKCS#1 v1.5 signatures are deterministic: the same key and message always
/// produce the same signature.
///
/// # Errors
///
/// Returns [`CryptoError::KeyFormat`] if the private key does not decode.
pub fn sign(message: &[u8], private_key: &str) -> CryptoResult<String> {
    let key = decode_private(private_key)?;
    let signing_key = SigningKey::<Sha256>::new(key);
    let signature = signing_key
        .try_sign(message)
        .map_err(|e| CryptoError::Signing(e.to_string()))?;
    Ok(BASE64.encode(signature.to_bytes()))
}

/// Verifies `signature` over `message`, reporting why verification failed.
pub fn try_verify(message: &[u8], public_key: &str, signature: &str) -> CryptoResult<()> {
    let key = decode_public(public_key)?;
    let sig_bytes = BASE64
        .decode(signature.trim())
        .map_err(|e| CryptoError::SignatureFormat(format!("base64: {e}")))?;
    let signature = Signature::try_from(sig_bytes.as_slice())
        .map_err(|e| CryptoError::SignatureFormat(e.to_string()))?;

    VerifyingKey::<Sha256>::new(key)
        .verify(message, &signature)
        .map_err(|_| CryptoError::SignatureMismatch)
}

/// Returns true iff `signature` is a valid signature of `message` under
/// `public_key`. Malformed keys and signatures yield `false`.
#[must_use]
pub fn verify(message: &[u8], public_key: &str, signature: &str) -> bool {
    match try_verify(message, public_key, signature) {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!(error = %e, "signature verification failed");
            false
        }
    }
}

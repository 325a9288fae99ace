//! RSA key pair generation and encoding.

use crate::error::{CryptoError, CryptoResult};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use rand::rngs::OsRng;
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey};
use rsa::rand_core::CryptoRngCore;
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Smallest accepted modulus size in bits.
pub const MIN_KEY_BITS: usize = 2048;

/// Largest accepted modulus size in bits (the verifier's public key limit).
pub const MAX_KEY_BITS: usize = 4096;

/// Modulus size used when none is configured.
pub const DEFAULT_KEY_BITS: usize = MIN_KEY_BITS;

/// A base64-encoded SubjectPublicKeyInfo RSA public key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PublicKey {
    encoded: String,
}

impl PublicKey {
    /// Wraps an encoded public key, checking that it decodes.
    pub fn from_base64(encoded: &str) -> CryptoResult<Self> {
        decode_public(encoded)?;
        Ok(Self {
            encoded: encoded.to_string(),
        })
    }

    /// Returns the base64 encoding.
    pub fn as_base64(&self) -> &str {
        &self.encoded
    }

    /// Returns the modulus size in bits.
    pub fn bits(&self) -> CryptoResult<usize> {
        Ok(decode_public(&self.encoded)?.size() * 8)
    }
}

/// A base64-encoded PKCS#8 RSA private key, zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey {
    encoded: String,
}

impl PrivateKey {
    /// Wraps an encoded private key, checking that it decodes.
    pub fn from_base64(encoded: &str) -> CryptoResult<Self> {
        decode_private(encoded)?;
        Ok(Self {
            encoded: encoded.to_string(),
        })
    }

    /// Returns the base64 encoding.
    pub fn as_base64(&self) -> &str {
        &self.encoded
    }

    /// Derives the matching public key.
    pub fn public_key(&self) -> CryptoResult<PublicKey> {
        let private = decode_private(&self.encoded)?;
        encode_public(&RsaPublicKey::from(&private))
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKey")
            .field("encoded", &"[REDACTED]")
            .finish()
    }
}

/// A freshly generated key pair.
#[derive(Clone, Debug)]
pub struct KeyPair {
    pub public_key: PublicKey,
    pub private_key: PrivateKey,
}

/// Generates an RSA key pair using the OS entropy source.
pub fn generate_key_pair(bits: usize) -> CryptoResult<KeyPair> {
    generate_key_pair_with_rng(&mut OsRng, bits)
}

/// Generates an RSA key pair from the supplied random source.
///
/// A seeded RNG yields the same key pair on every run, which keeps issuance
/// reproducible in tests.
pub fn generate_key_pair_with_rng<R>(rng: &mut R, bits: usize) -> CryptoResult<KeyPair>
where
    R: CryptoRngCore + ?Sized,
{
    if !(MIN_KEY_BITS..=MAX_KEY_BITS).contains(&bits) {
        return Err(CryptoError::UnsupportedKeySize {
            bits,
            min: MIN_KEY_BITS,
            max: MAX_KEY_BITS,
        });
    }

    let private = RsaPrivateKey::new(rng, bits)
        .map_err(|e| CryptoError::KeyGeneration(e.to_string()))?;
    let public_key = encode_public(&RsaPublicKey::from(&private))?;

    let der = private
        .to_pkcs8_der()
        .map_err(|e| CryptoError::KeyGeneration(format!("PKCS#8 encoding: {e}")))?;
    let private_key = PrivateKey {
        encoded: BASE64.encode(der.as_bytes()),
    };

    Ok(KeyPair {
        public_key,
        private_key,
    })
}

fn encode_public(key: &RsaPublicKey) -> CryptoResult<PublicKey> {
    let der = key
        .to_public_key_der()
        .map_err(|e| CryptoError::KeyGeneration(format!("SPKI encoding: {e}")))?;
    Ok(PublicKey {
        encoded: BASE64.encode(der.as_bytes()),
    })
}

pub(crate) fn decode_public(encoded: &str) -> CryptoResult<RsaPublicKey> {
    let der = BASE64
        .decode(encoded.trim())
        .map_err(|e| CryptoError::KeyFormat(format!("public key base64: {e}")))?;
    RsaPublicKey::from_public_key_der(&der)
        .map_err(|e| CryptoError::KeyFormat(format!("public key DER: {e}")))
}

pub(crate) fn decode_private(encoded: &str) -> CryptoResult<RsaPrivateKey> {
    let mut der = BASE64
        .decode(encoded.trim())
        .map_err(|e| CryptoError::KeyFormat(format!("private key base64: {e}")))?;
    let key = RsaPrivateKey::from_pkcs8_der(&der)
        .map_err(|e| CryptoError::KeyFormat(format!("private key DER: {e}")));
    der.zeroize();
    key
}

//! RSA key engine for nodelock.
//!
//! Every license is signed with a key pair generated for that license alone:
//! - Keys are RSA (2048 to 4096 bit modulus)
//! - Public keys travel as base64 SubjectPublicKeyInfo DER
//! - Private keys travel as base64 PKCS#8 DER and are zeroized on drop
//! - Signatures are RSASSA-PKCS1-v1_5 over SHA-256, base64 encoded
//!
//! Verification never errors at the boolean boundary: [`verify`] returns
//! `false` for any decode failure, while [`try_verify`] exposes the precise
//! [`CryptoError`] for diagnostics.

mod error;
mod key;
mod signer;

pub use error::{CryptoError, CryptoResult};
pub use key::{
    generate_key_pair, generate_key_pair_with_rng, KeyPair, PrivateKey, PublicKey,
    DEFAULT_KEY_BITS, MAX_KEY_BITS, MIN_KEY_BITS,
};
pub use signer::{sign, try_verify, verify};

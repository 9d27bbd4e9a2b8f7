//! PBKDF2 Key Derivation Function
//!
//! Stretches a password and a random salt into a 256-bit encryption key
//! using PBKDF2-HMAC-SHA256 with a deliberately high round count, so
//! brute-force password guessing stays expensive. The salt is not secret
//! and travels inside the envelope.

use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;
use zeroize::Zeroize;

use super::{SecureBytes, KEY_LEN};
use crate::error::{CatVaultError, Result};

/// Salt length in bytes (128 bits)
pub const SALT_LEN: usize = 16;

/// PBKDF2 round count (OWASP recommendation for HMAC-SHA256)
pub const PBKDF2_ROUNDS: u32 = 600_000;

/// A derived encryption key with the salt it was stretched from
pub struct DerivedKey {
    /// The derived key material (32 bytes)
    pub key: SecureBytes,
    /// The salt used for derivation (16 bytes)
    pub salt: [u8; SALT_LEN],
}

impl Zeroize for DerivedKey {
    fn zeroize(&mut self) {
        self.key.zeroize();
        self.salt.zeroize();
    }
}

impl Drop for DerivedKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

/// Draw a fresh random salt from the OS entropy source.
///
/// Fails with `KeyDerivationUnavailable` if the runtime has no secure
/// random source; key derivation must never fall back to a weak one.
pub fn random_salt() -> Result<[u8; SALT_LEN]> {
    let mut salt = [0u8; SALT_LEN];
    OsRng
        .try_fill_bytes(&mut salt)
        .map_err(|e| CatVaultError::KeyDerivationUnavailable(e.to_string()))?;
    Ok(salt)
}

/// Derive an encryption key from a password and salt.
///
/// Deterministic: the same password and salt always yield the same key,
/// and different salts yield unlinkable keys for the same password.
pub fn derive_key(password: &[u8], salt: &[u8; SALT_LEN]) -> Result<DerivedKey> {
    let mut key_bytes = vec![0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password, salt, PBKDF2_ROUNDS, &mut key_bytes);

    Ok(DerivedKey {
        key: SecureBytes::new(key_bytes),
        salt: *salt,
    })
}

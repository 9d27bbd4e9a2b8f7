//! ChaCha20-Poly1305 Authenticated Encryption
//!
//! ChaCha20-Poly1305 is an AEAD cipher that provides both confidentiality
//! and authenticity. The Poly1305 tag is verified before any plaintext is
//! returned, so tampered or corrupted ciphertext never decrypts partially.

use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Nonce,
};
use rand::rngs::OsRng;
use rand::RngCore;

use super::{SecureBytes, KEY_LEN};
use crate::error::{CatVaultError, Result};

/// Nonce length for ChaCha20-Poly1305 (96 bits)
pub const NONCE_LEN: usize = 12;

/// Authentication tag length (128 bits)
pub const TAG_LEN: usize = 16;

/// Draw a fresh random nonce from the OS entropy source.
///
/// The caller owns nonce generation so that one is never reused under the
/// same key: every encryption must pass a freshly drawn nonce.
pub fn random_nonce() -> Result<[u8; NONCE_LEN]> {
    let mut nonce = [0u8; NONCE_LEN];
    OsRng
        .try_fill_bytes(&mut nonce)
        .map_err(|e| CatVaultError::CipherUnavailable(e.to_string()))?;
    Ok(nonce)
}

/// Encrypt data using ChaCha20-Poly1305
///
/// Returns the ciphertext with the 16-byte authentication tag appended.
/// A key of the wrong length is an environment/programming error, not a
/// data problem, and surfaces as `CipherUnavailable`.
pub fn encrypt(key: &[u8], nonce: &[u8; NONCE_LEN], plaintext: &[u8]) -> Result<Vec<u8>> {
    if key.len() != KEY_LEN {
        return Err(CatVaultError::CipherUnavailable(format!(
            "invalid key length: expected {}, got {}",
            KEY_LEN,
            key.len()
        )));
    }

    let cipher = ChaCha20Poly1305::new_from_slice(key)
        .map_err(|e| CatVaultError::CipherUnavailable(e.to_string()))?;

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(nonce), plaintext)
        .map_err(|e| CatVaultError::CipherUnavailable(e.to_string()))?;

    Ok(ciphertext)
}

/// Decrypt data using ChaCha20-Poly1305
///
/// Wrong key, wrong nonce, and tampered or truncated ciphertext all
/// collapse into the single `AuthenticationFailure`, so the caller cannot
/// tell a bad password from corrupted data.
pub fn decrypt(key: &[u8], nonce: &[u8], ciphertext: &[u8]) -> Result<SecureBytes> {
    if key.len() != KEY_LEN || nonce.len() != NONCE_LEN {
        return Err(CatVaultError::AuthenticationFailure);
    }

    let cipher = ChaCha20Poly1305::new_from_slice(key)
        .map_err(|_| CatVaultError::AuthenticationFailure)?;

    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| CatVaultError::AuthenticationFailure)?;

    Ok(SecureBytes::new(plaintext))
}

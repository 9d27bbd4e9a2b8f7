//! Cryptographic primitives for catvault
//!
//! This module provides:
//! - PBKDF2-HMAC-SHA256 for password-based key derivation
//! - ChaCha20-Poly1305 for authenticated encryption
//! - Secure memory handling with automatic zeroing

mod cipher;
mod kdf;
mod secure_bytes;

pub use cipher::{decrypt, encrypt, random_nonce, NONCE_LEN, TAG_LEN};
pub use kdf::{derive_key, random_salt, DerivedKey, SALT_LEN};
pub use secure_bytes::SecureBytes;

/// Derived key length in bytes (256 bits)
pub const KEY_LEN: usize = 32;

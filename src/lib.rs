//! catvault - password-protected transport for per-cat document archives
//!
//! This crate keeps a small archive of cats and their documents in a local
//! JSON file and moves it across machines as one encrypted file:
//! - PBKDF2-HMAC-SHA256 stretches the password into a key
//! - ChaCha20-Poly1305 encrypts and authenticates the archive
//! - A versioned JSON envelope carries salt, nonce and ciphertext
//! - A tolerant normalizer repairs anything decoded from disk or import
//!   into a canonical archive before it is trusted

pub mod archive;
pub mod cli;
pub mod codec;
pub mod crypto;
pub mod envelope;
pub mod error;
pub mod session;
pub mod store;

pub use error::{CatVaultError, Result};

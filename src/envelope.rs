//! Versioned envelope for exported archives
//!
//! Wire format (one JSON object, text-transportable):
//!
//! ```json
//! {
//!   "version": 1,
//!   "salt":    "<base64, 16 raw bytes>",
//!   "nonce":   "<base64, 12 raw bytes>",
//!   "payload": "<base64, ciphertext + 16-byte auth tag>"
//! }
//! ```
//!
//! Decoding is strict: structural problems and misshapen fields are
//! `MalformedEnvelope`, an unknown version is `UnsupportedVersion`, and
//! both are detected before any key derivation is attempted.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::crypto::{NONCE_LEN, SALT_LEN, TAG_LEN};
use crate::error::{CatVaultError, Result};

/// The single supported envelope version
pub const ENVELOPE_VERSION: u32 = 1;

/// A decoded envelope: everything needed to decrypt except the password
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub version: u32,
    pub salt: [u8; SALT_LEN],
    pub nonce: [u8; NONCE_LEN],
    pub payload: Vec<u8>,
}

/// Serde-facing shape of the wire object. Base64 stays at this boundary;
/// the rest of the crate only sees raw bytes.
#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct WireEnvelope {
    version: u32,
    salt: String,
    #[serde(alias = "iv")]
    nonce: String,
    payload: String,
}

impl Envelope {
    /// Build a version-1 envelope around freshly produced crypto material
    pub fn new(salt: [u8; SALT_LEN], nonce: [u8; NONCE_LEN], payload: Vec<u8>) -> Self {
        Self {
            version: ENVELOPE_VERSION,
            salt,
            nonce,
            payload,
        }
    }

    /// Serialize to the JSON wire form
    pub fn encode(&self) -> Result<Vec<u8>> {
        let wire = WireEnvelope {
            version: self.version,
            salt: BASE64.encode(self.salt),
            nonce: BASE64.encode(self.nonce),
            payload: BASE64.encode(&self.payload),
        };

        serde_json::to_vec(&wire).map_err(|_| CatVaultError::MalformedEnvelope)
    }

    /// Parse the JSON wire form.
    ///
    /// Checks in order: the container parses, all four fields are present
    /// and well-shaped, then the version is the supported one. Version
    /// gating happens here so an unsupported file never costs a key
    /// derivation.
    pub fn decode(bytes: &[u8]) -> Result<Envelope> {
        let wire: WireEnvelope =
            serde_json::from_slice(bytes).map_err(|_| CatVaultError::MalformedEnvelope)?;

        let salt = decode_fixed::<SALT_LEN>(&wire.salt)?;
        let nonce = decode_fixed::<NONCE_LEN>(&wire.nonce)?;

        let payload = BASE64
            .decode(&wire.payload)
            .map_err(|_| CatVaultError::MalformedEnvelope)?;
        if payload.len() < TAG_LEN {
            return Err(CatVaultError::MalformedEnvelope);
        }

        if wire.version != ENVELOPE_VERSION {
            return Err(CatVaultError::UnsupportedVersion(wire.version));
        }

        Ok(Envelope {
            version: wire.version,
            salt,
            nonce,
            payload,
        })
    }
}

/// Decode a base64 field that must hold exactly N raw bytes
fn decode_fixed<const N: usize>(field: &str) -> Result<[u8; N]> {
    let bytes = BASE64
        .decode(field)
        .map_err(|_| CatVaultError::MalformedEnvelope)?;

    bytes
        .try_into()
        .map_err(|_| CatVaultError::MalformedEnvelope)
}

//! Export/import pipeline for password-protected archives
//!
//! Export: re-normalize → serialize → derive key (fresh salt) → encrypt
//! (fresh nonce) → encode envelope. Import runs the same pipeline in
//! reverse, failing fast on malformed or wrong-version envelopes before
//! any key derivation, and finishing with the normalizer so imported data
//! can never violate archive invariants.
//!
//! Both operations are pure functions over their arguments; concurrent
//! calls share nothing but the OS entropy source.

use serde_json::Value;

use crate::archive::{normalize, Archive};
use crate::crypto;
use crate::envelope::Envelope;
use crate::error::{CatVaultError, Result};

/// Encrypt an archive under a password, producing envelope bytes ready to
/// be written to a file or clipboard.
///
/// Every call draws a fresh salt and nonce, so exporting the same archive
/// twice yields different bytes that both decrypt under the password.
pub fn export_archive(archive: &Archive, password: &str) -> Result<Vec<u8>> {
    // Defensive re-normalization: never ship an archive that drifted from
    // canonical form while held in memory.
    let canonical = normalize(&to_raw(archive)?);
    let plaintext = serde_json::to_vec(&canonical).map_err(invalid_archive)?;

    let salt = crypto::random_salt()?;
    let derived = crypto::derive_key(password.as_bytes(), &salt)?;

    let nonce = crypto::random_nonce()?;
    let ciphertext = crypto::encrypt(&derived.key, &nonce, &plaintext)?;

    Envelope::new(salt, nonce, ciphertext).encode()
}

/// Decrypt envelope bytes under a password and return the canonical archive.
///
/// Malformed envelopes and unsupported versions are reported before any
/// cryptographic work. Past that point, a wrong password and a tampered or
/// unparseable payload collapse into the same `AuthenticationFailure`, so
/// nothing observable separates a bad password from a bad file.
pub fn import_archive(bytes: &[u8], password: &str) -> Result<Archive> {
    let envelope = Envelope::decode(bytes)?;

    let derived = crypto::derive_key(password.as_bytes(), &envelope.salt)?;
    let plaintext = crypto::decrypt(&derived.key, &envelope.nonce, &envelope.payload)?;

    // A decrypted payload that is not JSON gets the same error as a failed
    // tag check: reporting it separately would confirm the password.
    let raw: Value =
        serde_json::from_slice(&plaintext).map_err(|_| CatVaultError::AuthenticationFailure)?;

    Ok(normalize(&raw))
}

fn to_raw(archive: &Archive) -> Result<Value> {
    serde_json::to_value(archive).map_err(invalid_archive)
}

fn invalid_archive(e: serde_json::Error) -> CatVaultError {
    CatVaultError::InvalidStore(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::{Cat, Document};
    use serde_json::json;

    fn sample_archive() -> Archive {
        let mut archive = Archive::default();
        let mut cat = Cat::new("Miso");
        cat.documents.push(Document::new(
            "Vaccination record",
            "vax.pdf",
            "application/pdf",
            &[0x25, 0x50, 0x44, 0x46, 0x00, 0xFF],
        ));
        archive.add_cat(cat);
        archive
    }

    #[test]
    fn test_export_import_roundtrip() {
        let archive = sample_archive();

        let bytes = export_archive(&archive, "correct horse").unwrap();
        let imported = import_archive(&bytes, "correct horse").unwrap();

        assert_eq!(imported, archive);
    }

    #[test]
    fn test_document_content_survives_roundtrip() {
        let content = [0x25, 0x50, 0x44, 0x46, 0x00, 0xFF];
        let archive = sample_archive();

        let bytes = export_archive(&archive, "pw1").unwrap();
        let imported = import_archive(&bytes, "pw1").unwrap();

        let doc = &imported.cats[0].documents[0];
        assert_eq!(doc.content_bytes().unwrap(), content);
    }

    #[test]
    fn test_wrong_password_fails() {
        let archive = sample_archive();

        let bytes = export_archive(&archive, "pw1").unwrap();
        let result = import_archive(&bytes, "pw2");

        assert!(matches!(result, Err(CatVaultError::AuthenticationFailure)));
    }

    #[test]
    fn test_exports_are_nondeterministic_but_both_import() {
        let archive = sample_archive();

        let bytes1 = export_archive(&archive, "pw").unwrap();
        let bytes2 = export_archive(&archive, "pw").unwrap();

        assert_ne!(bytes1, bytes2);
        assert_eq!(import_archive(&bytes1, "pw").unwrap(), archive);
        assert_eq!(import_archive(&bytes2, "pw").unwrap(), archive);
    }

    #[test]
    fn test_tampered_payload_fails() {
        let archive = sample_archive();
        let bytes = export_archive(&archive, "pw1").unwrap();

        // Flip one character inside the base64 payload field
        let mut value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let mut payload: Vec<char> = value["payload"].as_str().unwrap().chars().collect();
        payload[4] = if payload[4] == 'A' { 'B' } else { 'A' };
        value["payload"] = json!(payload.into_iter().collect::<String>());
        let tampered = serde_json::to_vec(&value).unwrap();

        let result = import_archive(&tampered, "pw1");
        assert!(matches!(result, Err(CatVaultError::AuthenticationFailure)));
    }

    #[test]
    fn test_import_normalizes_decrypted_data() {
        // Encrypt a structurally messy but valid JSON payload by hand and
        // make sure the import path repairs it.
        let raw = json!({ "cats": [{ "id": "x" }, { "id": "x" }] });
        let plaintext = serde_json::to_vec(&raw).unwrap();

        let salt = crypto::random_salt().unwrap();
        let derived = crypto::derive_key(b"pw", &salt).unwrap();
        let nonce = crypto::random_nonce().unwrap();
        let ciphertext = crypto::encrypt(&derived.key, &nonce, &plaintext).unwrap();
        let bytes = Envelope::new(salt, nonce, ciphertext).encode().unwrap();

        let imported = import_archive(&bytes, "pw").unwrap();
        assert_eq!(imported.cats.len(), 2);
        assert_ne!(imported.cats[0].id, imported.cats[1].id);
    }

    #[test]
    fn test_unparseable_plaintext_reads_as_authentication_failure() {
        let salt = crypto::random_salt().unwrap();
        let derived = crypto::derive_key(b"pw", &salt).unwrap();
        let nonce = crypto::random_nonce().unwrap();
        let ciphertext = crypto::encrypt(&derived.key, &nonce, b"definitely not json").unwrap();
        let bytes = Envelope::new(salt, nonce, ciphertext).encode().unwrap();

        // Correct password, valid tag, garbage plaintext: same error as a
        // wrong password.
        let result = import_archive(&bytes, "pw");
        assert!(matches!(result, Err(CatVaultError::AuthenticationFailure)));
    }

    #[test]
    fn test_unsupported_version_fails_before_password_work() {
        let bytes = export_archive(&sample_archive(), "pw").unwrap();
        let mut value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        value["version"] = json!(2);
        let bytes = serde_json::to_vec(&value).unwrap();

        // The password is irrelevant: the version gate fires first.
        let result = import_archive(&bytes, "any password");
        assert!(matches!(result, Err(CatVaultError::UnsupportedVersion(2))));
    }

    #[test]
    fn test_malformed_envelope_fails() {
        let result = import_archive(b"{\"version\":1}", "pw");
        assert!(matches!(result, Err(CatVaultError::MalformedEnvelope)));
    }
}

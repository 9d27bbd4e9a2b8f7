use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatVaultError>;

#[derive(Debug, Error)]
pub enum CatVaultError {
    #[error("No archive found. Run 'catvault init' first.")]
    NotInitialized,

    #[error("An archive already exists. Use --force to start over (this discards existing data).")]
    AlreadyInitialized,

    #[error("Password is too short (minimum {0} characters)")]
    PasswordTooShort(usize),

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Export file is not a valid catvault envelope")]
    MalformedEnvelope,

    #[error("Unsupported export file version: {0}")]
    UnsupportedVersion(u32),

    // Covers wrong password, tampered/corrupted ciphertext, and plaintext
    // that fails to parse after decryption. One variant on purpose:
    // distinguishing these would hand an attacker a password oracle.
    #[error("Import failed: check your password and file")]
    AuthenticationFailure,

    #[error("Key derivation unavailable: {0}")]
    KeyDerivationUnavailable(String),

    #[error("Cipher unavailable: {0}")]
    CipherUnavailable(String),

    #[error("Cat '{0}' not found")]
    CatNotFound(String),

    #[error("No cat selected. Pass --cat <id> or run 'catvault cat select'.")]
    NoCatSelected,

    #[error("Archive file is corrupted: {0}")]
    InvalidStore(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

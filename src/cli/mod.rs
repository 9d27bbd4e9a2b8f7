//! CLI command implementations

pub mod cat;
pub mod doc;
pub mod export;
pub mod import;
pub mod init;

use colored::Colorize;

use crate::error::{CatVaultError, Result};
use crate::session::Session;
use crate::store::JsonFileStore;

/// Minimum export password length
pub const MIN_PASSWORD_LEN: usize = 8;

/// Open the session backed by the archive file at `path`
pub fn open_session(path: &std::path::Path) -> Result<Session<JsonFileStore>> {
    let store = JsonFileStore::new(path);
    if !store.exists() {
        return Err(CatVaultError::NotInitialized);
    }
    Session::open(store)
}

/// Prompt for a new export password with confirmation
pub fn prompt_new_password() -> Result<String> {
    println!("{}", "Choose an export password".cyan().bold());
    println!("This password protects the exported archive. Anyone with it can read your records.");
    println!("Minimum length: {} characters\n", MIN_PASSWORD_LEN);

    loop {
        let password = rpassword::prompt_password("Enter password: ")?;
        let confirm = rpassword::prompt_password("Confirm password: ")?;

        match validate_new_password(&password, &confirm) {
            Ok(()) => return Ok(password),
            Err(e) => println!("{} {}", "Error:".red(), e),
        }
    }
}

/// Check a proposed export password and its confirmation
pub fn validate_new_password(password: &str, confirm: &str) -> Result<()> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(CatVaultError::PasswordTooShort(MIN_PASSWORD_LEN));
    }

    if password != confirm {
        return Err(CatVaultError::PasswordMismatch);
    }

    Ok(())
}

/// Prompt for an existing password
pub fn prompt_password() -> Result<String> {
    let password = rpassword::prompt_password("Enter password: ")?;
    Ok(password)
}

/// Ask a yes/no question
pub fn confirm(prompt: &str) -> bool {
    use std::io::{self, Write};

    print!("{} [y/N] ", prompt);
    io::stdout().flush().ok();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return false;
    }

    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_password_rejected() {
        let result = validate_new_password("short", "short");
        assert!(matches!(result, Err(CatVaultError::PasswordTooShort(_))));
    }

    #[test]
    fn test_mismatched_confirmation_rejected() {
        let result = validate_new_password("long enough", "long enuogh");
        assert!(matches!(result, Err(CatVaultError::PasswordMismatch)));
    }

    #[test]
    fn test_matching_password_accepted() {
        assert!(validate_new_password("long enough", "long enough").is_ok());
    }
}

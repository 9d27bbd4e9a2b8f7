//! Create a fresh archive file

use std::path::Path;

use colored::Colorize;

use crate::archive::Archive;
use crate::error::{CatVaultError, Result};
use crate::store::{ArchiveStore, JsonFileStore};

pub fn run(path: &Path, force: bool) -> Result<()> {
    let store = JsonFileStore::new(path);

    if store.exists() && !force {
        return Err(CatVaultError::AlreadyInitialized);
    }

    store.save(&Archive::default())?;

    println!(
        "{} Created empty archive at {}",
        "Done:".green().bold(),
        path.display().to_string().cyan()
    );
    println!("Add your first cat with: {}", "catvault cat add <name>".cyan());

    Ok(())
}

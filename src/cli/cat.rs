//! Cat management commands

use std::path::Path;

use colored::Colorize;

use crate::archive::Cat;
use crate::error::Result;

use super::open_session;

pub fn add(
    path: &Path,
    name: &str,
    breed: Option<&str>,
    birthdate: Option<&str>,
    notes: Option<&str>,
) -> Result<()> {
    let mut session = open_session(path)?;

    let mut cat = Cat::new(name);
    if let Some(breed) = breed {
        cat.breed = breed.to_string();
    }
    if let Some(birthdate) = birthdate {
        cat.birthdate = birthdate.to_string();
    }
    if let Some(notes) = notes {
        cat.notes = notes.to_string();
    }

    let cat = session.add_cat(cat)?;
    println!("{} Added cat '{}' ({})", "Done:".green().bold(), cat.name, cat.id.dimmed());

    Ok(())
}

pub fn list(path: &Path) -> Result<()> {
    let session = open_session(path)?;
    let archive = session.archive();

    if archive.cats.is_empty() {
        println!("No cats yet. Add one with: {}", "catvault cat add <name>".cyan());
        return Ok(());
    }

    for cat in &archive.cats {
        let marker = if archive.selected_cat_id.as_deref() == Some(cat.id.as_str()) {
            "*".green().bold().to_string()
        } else {
            " ".to_string()
        };
        let breed = if cat.breed.is_empty() { "-" } else { &cat.breed };

        println!(
            "{} {}  {}  ({} documents)  {}",
            marker,
            cat.name.bold(),
            breed,
            cat.documents.len(),
            cat.id.dimmed()
        );
    }

    Ok(())
}

pub fn select(path: &Path, id: &str) -> Result<()> {
    let mut session = open_session(path)?;
    session.select_cat(id)?;

    let name = session
        .archive()
        .find_cat(id)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| id.to_string());
    println!("{} Selected '{}'", "Done:".green().bold(), name);

    Ok(())
}

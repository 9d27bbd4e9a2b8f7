//! Document management commands

use std::fs;
use std::path::Path;

use colored::Colorize;

use crate::archive::Document;
use crate::error::{CatVaultError, Result};

use super::open_session;

pub fn add(path: &Path, cat_id: &str, file: &Path, title: Option<&str>) -> Result<()> {
    let mut session = open_session(path)?;

    let bytes = fs::read(file)?;

    let file_name = file
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "document".to_string());

    let file_type = mime_guess::from_path(file).first_or_octet_stream().to_string();

    let title = title
        .map(str::to_string)
        .unwrap_or_else(|| file_name.clone());

    let document = Document::new(title, file_name, file_type, &bytes);
    let doc_title = document.title.clone();
    session.add_document(cat_id, document)?;

    println!(
        "{} Attached '{}' ({} bytes) to cat {}",
        "Done:".green().bold(),
        doc_title,
        bytes.len(),
        cat_id.dimmed()
    );

    Ok(())
}

pub fn list(path: &Path, cat_id: Option<&str>) -> Result<()> {
    let session = open_session(path)?;
    let archive = session.archive();

    // Fall back to the selected cat when none is named
    let cat_id = match cat_id {
        Some(id) => id.to_string(),
        None => archive
            .selected_cat_id
            .clone()
            .ok_or(CatVaultError::NoCatSelected)?,
    };

    let cat = archive
        .find_cat(&cat_id)
        .ok_or_else(|| CatVaultError::CatNotFound(cat_id.clone()))?;

    if cat.documents.is_empty() {
        println!("No documents for '{}' yet.", cat.name);
        return Ok(());
    }

    println!("Documents for {}:", cat.name.bold());
    for doc in &cat.documents {
        println!(
            "  {}  {} ({} bytes, {})  {}",
            doc.title.bold(),
            doc.file_name,
            doc.size,
            doc.file_type,
            doc.id.dimmed()
        );
    }

    Ok(())
}

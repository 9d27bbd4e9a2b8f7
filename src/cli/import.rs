//! Import an encrypted archive, replacing the current one

use std::fs;
use std::path::Path;

use colored::Colorize;

use crate::error::Result;
use crate::session::Session;
use crate::store::JsonFileStore;

use super::{confirm, prompt_password};

pub fn run(path: &Path, input: &Path) -> Result<()> {
    // A brand-new machine has no archive yet; import may create it
    let store = JsonFileStore::new(path);
    let mut session = Session::open(store)?;

    if !session.archive().cats.is_empty() {
        println!(
            "{} Importing replaces the current archive ({} cats).",
            "Warning:".yellow().bold(),
            session.archive().cats.len()
        );
        if !confirm("Continue?") {
            println!("Cancelled.");
            return Ok(());
        }
        println!();
    }

    let bytes = fs::read(input)?;
    let password = prompt_password()?;

    print!("{}", "Decrypting archive (this takes a moment)... ".cyan());
    std::io::Write::flush(&mut std::io::stdout())?;

    let archive = session.import(&bytes, &password)?;
    println!("{}", "done".green());

    let documents: usize = archive.cats.iter().map(|c| c.documents.len()).sum();
    println!(
        "{} Imported {} cat(s) and {} document(s) into {}",
        "Done:".green().bold(),
        archive.cats.len(),
        documents,
        path.display().to_string().cyan()
    );

    Ok(())
}

//! Export the archive to an encrypted file

use std::fs::File;
use std::io::Write;
use std::path::Path;

use colored::Colorize;

use crate::error::Result;

use super::{open_session, prompt_new_password};

pub fn run(path: &Path, output: &Path) -> Result<()> {
    let session = open_session(path)?;

    let cats = session.archive().cats.len();
    println!(
        "Exporting {} cat(s) from {}",
        cats,
        path.display().to_string().cyan()
    );
    println!();

    let password = prompt_new_password()?;
    println!();

    print!("{}", "Deriving encryption key (this takes a moment)... ".cyan());
    std::io::Write::flush(&mut std::io::stdout())?;

    let bytes = session.export(&password)?;
    println!("{}", "done".green());

    let mut file = File::create(output)?;
    file.write_all(&bytes)?;
    file.sync_all()?;

    println!(
        "{} Wrote {} bytes to {}",
        "Done:".green().bold(),
        bytes.len(),
        output.display().to_string().cyan()
    );
    println!("Import on another machine with: {}", "catvault import <file>".cyan());

    Ok(())
}

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;

use catvault::cli;
use catvault::Result;

#[derive(Parser)]
#[command(name = "catvault")]
#[command(version = "0.1.0")]
#[command(about = "Password-protected export and import for per-cat document archives", long_about = None)]
struct Cli {
    /// Path to the archive file
    #[arg(short, long, global = true, default_value = "catvault.json")]
    file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a fresh, empty archive
    Init {
        /// Overwrite an existing archive
        #[arg(long)]
        force: bool,
    },

    /// Manage cats
    Cat {
        #[command(subcommand)]
        action: CatCommands,
    },

    /// Manage documents
    Doc {
        #[command(subcommand)]
        action: DocCommands,
    },

    /// Encrypt the archive into a portable file
    Export {
        /// Where to write the encrypted archive
        output: PathBuf,
    },

    /// Decrypt a portable file and replace the archive
    Import {
        /// The encrypted archive file to read
        input: PathBuf,
    },
}

#[derive(Subcommand)]
enum CatCommands {
    /// Add a new cat
    Add {
        name: String,
        #[arg(long)]
        breed: Option<String>,
        #[arg(long)]
        birthdate: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// List all cats
    List,
    /// Select a cat by id
    Select { id: String },
}

#[derive(Subcommand)]
enum DocCommands {
    /// Attach a file to a cat
    Add {
        /// Id of the owning cat
        cat: String,
        /// File to attach
        path: PathBuf,
        #[arg(long)]
        title: Option<String>,
    },
    /// List documents of a cat (default: the selected one)
    List {
        #[arg(long)]
        cat: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Cli) -> Result<()> {
    let file = &args.file;

    match args.command {
        Commands::Init { force } => cli::init::run(file, force),
        Commands::Cat { action } => match action {
            CatCommands::Add {
                name,
                breed,
                birthdate,
                notes,
            } => cli::cat::add(
                file,
                &name,
                breed.as_deref(),
                birthdate.as_deref(),
                notes.as_deref(),
            ),
            CatCommands::List => cli::cat::list(file),
            CatCommands::Select { id } => cli::cat::select(file, &id),
        },
        Commands::Doc { action } => match action {
            DocCommands::Add { cat, path, title } => {
                cli::doc::add(file, &cat, &path, title.as_deref())
            }
            DocCommands::List { cat } => cli::doc::list(file, cat.as_deref()),
        },
        Commands::Export { output } => cli::export::run(file, &output),
        Commands::Import { input } => cli::import::run(file, &input),
    }
}

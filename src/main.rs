mod balance;
mod calendar;
mod cli;
mod error;
mod fmt;
mod hash;
mod importer;
mod models;
mod settings;
mod storage;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Report {
            files,
            year,
            opening_balance,
            language,
            format,
            details,
            json,
        } => cli::report::run(
            &files,
            year,
            opening_balance,
            language.as_deref(),
            format.as_deref(),
            details,
            json,
        ),
        Commands::Parse {
            file,
            year,
            language,
            format,
            json,
        } => cli::parse::run(&file, year, language.as_deref(), format.as_deref(), json),
        Commands::Disclaimer { accept } => cli::disclaimer::run(accept),
        Commands::Init { language } => cli::init::run(language.as_deref()),
        Commands::Status => cli::status::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

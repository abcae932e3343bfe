mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    apply, export, import, init, new_page, serve, validate, ApplyArgs, ExportArgs, ImportArgs,
    InitArgs, NewArgs, ServeArgs, ValidateArgs,
};
use tracing_subscriber::EnvFilter;

/// MetaNord CLI - page builder content tools
#[derive(Parser, Debug)]
#[command(name = "metanord")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new MetaNord project
    Init(InitArgs),

    /// Serve the pages directory over HTTP
    Serve(ServeArgs),

    /// Create an empty page
    New(NewArgs),

    /// Check page files for structural problems
    Validate(ValidateArgs),

    /// Write a page to a JSON file
    Export(ExportArgs),

    /// Add a page from a JSON file
    Import(ImportArgs),

    /// Apply a mutation script to a page
    Apply(ApplyArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| {
            let cwd = cwd.display().to_string();
            match cli.command {
                Command::Init(args) => init(args, &cwd),
                Command::Serve(args) => serve(args, &cwd),
                Command::New(args) => new_page(args, &cwd),
                Command::Validate(args) => validate(args, &cwd),
                Command::Export(args) => export(args, &cwd),
                Command::Import(args) => import(args, &cwd),
                Command::Apply(args) => apply(args, &cwd),
            }
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}

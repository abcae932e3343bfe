use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use metanord_editor::{Document, EditSession, Mutation};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Slug of the page to edit
    pub slug: String,

    /// JSON file holding an array of mutations
    pub script: PathBuf,

    /// Apply and report without saving
    #[arg(long)]
    pub dry_run: bool,
}

/// Run a mutation script against a page as one undoable edit
pub fn apply(args: ApplyArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let path = config.page_path(cwd, &args.slug);
    if !path.exists() {
        return Err(anyhow!("Page not found: {}", args.slug));
    }

    let mutations: Vec<Mutation> = serde_json::from_str(&fs::read_to_string(&args.script)?)?;
    let doc = Document::load(path)?;
    let mut session = EditSession::with_history_limit("cli".to_string(), doc, config.history_limit);

    println!(
        "{}",
        format!("✏️  Applying {} mutation(s) to {}...", mutations.len(), args.slug)
            .bright_blue()
            .bold()
    );

    session.begin_batch(format!("Apply {}", args.script.display()));
    for (index, mutation) in mutations.into_iter().enumerate() {
        let description = mutation.description();
        session
            .apply(mutation)
            .map_err(|e| anyhow!("mutation {} ({}) failed: {}", index + 1, description, e))?;
        println!("  {} {}", "✓".green(), description);
    }
    session.end_batch();

    if args.dry_run {
        println!();
        println!("{}", "Dry run, nothing saved".yellow());
        return Ok(());
    }

    session.save()?;
    println!();
    println!("{}", "✅ Page saved".green().bold());
    Ok(())
}

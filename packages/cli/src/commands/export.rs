use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use metanord_editor::Document;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Slug of the page to export
    pub slug: String,

    /// Output file
    pub out: PathBuf,

    /// Write the resolved view for one language instead of the editable tree
    #[arg(short, long)]
    pub lang: Option<String>,
}

pub fn export(args: ExportArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let path = config.page_path(cwd, &args.slug);
    if !path.exists() {
        return Err(anyhow!("Page not found: {}", args.slug));
    }

    let doc = Document::load(path)?;
    match &args.lang {
        Some(lang) => {
            let view = doc.page().localize(lang);
            fs::write(&args.out, serde_json::to_string_pretty(&view)?)?;
        }
        None => doc.export_to(&args.out)?,
    }

    println!(
        "  {} {} → {}",
        "✓".green(),
        args.slug,
        args.out.display()
    );
    Ok(())
}

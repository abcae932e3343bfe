use crate::config::Config;
use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use metanord_common::{is_valid_slug, repair_ownership, validate};
use metanord_editor::Document;
use metanord_model::Page;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Page JSON file to import
    pub file: PathBuf,

    /// Fix components whose parentSectionId disagrees with their section
    #[arg(long)]
    pub repair: bool,

    /// Overwrite an existing page with the same slug
    #[arg(short, long)]
    pub force: bool,
}

pub fn import(args: ImportArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;

    let json = fs::read_to_string(&args.file)?;
    let mut page: Page = serde_json::from_str(&json)?;

    if args.repair {
        let repaired = repair_ownership(&mut page);
        if repaired > 0 {
            println!(
                "  {} Repaired ownership of {} component(s)",
                "!".yellow(),
                repaired
            );
        }
    }
    validate(&page)?;

    if !is_valid_slug(&page.slug) {
        bail!("Invalid slug {:?}", page.slug);
    }

    let target = config.page_path(cwd, &page.slug);
    if target.exists() && !args.force {
        bail!(
            "Page {:?} already exists, use --force to overwrite",
            page.slug
        );
    }
    fs::create_dir_all(config.get_pages_dir(cwd))?;

    let slug = page.slug.clone();
    Document::from_page(target.clone(), page).export_to(&target)?;

    println!(
        "  {} {} → {}",
        "✓".green(),
        args.file.display(),
        target.display()
    );
    tracing::debug!(slug = %slug, "imported page");
    Ok(())
}

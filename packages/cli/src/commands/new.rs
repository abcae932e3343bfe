use crate::config::Config;
use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use metanord_common::is_valid_slug;
use metanord_editor::Document;
use metanord_model::{get_page_seed, Page};
use std::fs;

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Page slug (lowercase letters, digits and dashes)
    pub slug: String,

    /// Page title (defaults to the slug in title case)
    #[arg(short, long)]
    pub title: Option<String>,
}

pub fn new_page(args: NewArgs, cwd: &str) -> Result<()> {
    if !is_valid_slug(&args.slug) {
        bail!(
            "Invalid slug {:?}: use lowercase letters, digits and dashes",
            args.slug
        );
    }

    let config = Config::load(cwd)?;
    let path = config.page_path(cwd, &args.slug);
    if path.exists() {
        bail!("Page already exists: {}", path.display());
    }
    fs::create_dir_all(config.get_pages_dir(cwd))?;

    let title = args.title.unwrap_or_else(|| title_from_slug(&args.slug));
    let page = Page::new(format!("page-{}", get_page_seed(&args.slug)), &args.slug, title);
    Document::from_page(path.clone(), page).export_to(&path)?;

    println!("  {} Created {}", "✓".green(), path.display());
    Ok(())
}

/// `about-us` → `About Us`
fn title_from_slug(slug: &str) -> String {
    slug.split('-')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

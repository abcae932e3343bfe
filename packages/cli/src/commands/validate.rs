use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use metanord_common::{read_page, Visitor};
use metanord_model::{normalize_lang, LocalizedText, Page};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Page files to check (defaults to every page in the pages directory)
    pub files: Vec<PathBuf>,
}

pub fn validate(args: ValidateArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;

    let files = if args.files.is_empty() {
        find_page_files(&config.get_pages_dir(cwd))?
    } else {
        args.files
    };

    if files.is_empty() {
        println!("{}", "⚠️  No page files found".yellow());
        return Ok(());
    }

    println!("{}", "🔍 Validating pages...".bright_blue().bold());

    let mut error_count = 0;
    for file in &files {
        match read_page(file) {
            Ok(page) => {
                println!("  {} {}", "✓".green(), file.display());
                for (lang, missing) in missing_translations(&page, &config) {
                    println!(
                        "      {} {} text field(s) without a {} translation",
                        "!".yellow(),
                        missing,
                        lang.cyan()
                    );
                }
            }
            Err(e) => {
                error_count += 1;
                eprintln!("  {} {} - {}", "✗".red(), file.display(), e);
            }
        }
    }

    println!();
    if error_count > 0 {
        return Err(anyhow!(
            "{} of {} page(s) failed validation",
            error_count,
            files.len()
        ));
    }

    println!("{}", "✅ All pages valid".green().bold());
    Ok(())
}

fn find_page_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Err(anyhow!("Pages directory does not exist: {}", dir.display()));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().map(|e| e == "json").unwrap_or(false) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Non-empty text fields lacking a translation, per configured language
fn missing_translations(page: &Page, config: &Config) -> BTreeMap<String, usize> {
    let default_language = normalize_lang(&config.default_language);
    let mut languages: Vec<String> = config
        .languages
        .iter()
        .map(|lang| normalize_lang(lang))
        .filter(|lang| *lang != default_language)
        .collect();
    languages.sort();
    languages.dedup();

    let mut coverage = Coverage {
        languages,
        missing: BTreeMap::new(),
    };
    coverage.visit_page(page);
    coverage.missing
}

struct Coverage {
    languages: Vec<String>,
    missing: BTreeMap<String, usize>,
}

impl Visitor for Coverage {
    fn visit_text(&mut self, _field: &str, text: &LocalizedText) {
        if text.is_empty() {
            return;
        }
        for lang in &self.languages {
            if !text.languages().any(|l| l == lang.as_str()) {
                *self.missing.entry(lang.clone()).or_insert(0) += 1;
            }
        }
    }
}

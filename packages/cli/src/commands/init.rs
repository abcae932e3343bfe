use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use metanord_editor::{Document, EditSession, Mutation};
use metanord_model::{get_page_seed, ComponentKind, LocalizedText, Page};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Pages directory
    #[arg(short, long, default_value = "pages")]
    pub pages_dir: String,

    /// Default content language
    #[arg(short, long, default_value = "en")]
    pub language: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!(
        "{}",
        "📝 Initializing MetaNord project...".bright_blue().bold()
    );

    let config = Config {
        pages_dir: args.pages_dir.clone(),
        default_language: args.language.clone(),
        languages: vec![args.language.clone()],
        ..Config::default()
    };

    // Create pages directory if it doesn't exist
    let pages_dir = config.get_pages_dir(cwd);
    if !pages_dir.exists() {
        fs::create_dir_all(&pages_dir)?;
        println!("  {} Created {}/", "✓".green(), args.pages_dir);
    }

    // Create sample home page
    let home = config.page_path(cwd, "home");
    if !home.exists() {
        let session = sample_home(home.clone())?;
        session.export_to(&home)?;
        println!("  {} Created home.json", "✓".green());
    }

    // Write config file
    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit {}/home.json", args.pages_dir);
    println!("  2. Run: metanord validate");
    println!("  3. Run: metanord serve");

    Ok(())
}

/// Hero section with a heading, a paragraph and a call to action
fn sample_home(path: PathBuf) -> Result<EditSession> {
    let page = Page::new(format!("page-{}", get_page_seed("home")), "home", "Home");
    let mut session = EditSession::new("init".to_string(), Document::from_page(path, page));

    session.begin_batch("Create sample page");
    let hero = session.add_section("Hero", None)?;
    let heading = session.add_component(&hero, ComponentKind::Heading, None)?;
    let text = session.add_component(&hero, ComponentKind::Text, None)?;
    session.add_component(&hero, ComponentKind::Cta, None)?;

    for (id, field, value) in [
        (heading, "text", "Welcome to MetaNord"),
        (text, "text", "Edit this page in the builder or in pages/home.json."),
    ] {
        session.apply(Mutation::UpdateComponent {
            component_id: id,
            content: BTreeMap::from([(field.to_string(), LocalizedText::new(value))]),
            props: Default::default(),
            styles: BTreeMap::new(),
        })?;
    }
    session.end_batch();

    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use metanord_common::validate;

    #[test]
    fn test_init_writes_config_and_sample() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();

        init(
            InitArgs {
                pages_dir: "site".to_string(),
                language: "et".to_string(),
                force: false,
            },
            &cwd,
        )
        .unwrap();

        let config = Config::load(&cwd).unwrap();
        assert_eq!(config.pages_dir, "site");
        assert_eq!(config.default_language, "et");

        let json = fs::read_to_string(config.page_path(&cwd, "home")).unwrap();
        let page: Page = serde_json::from_str(&json).unwrap();
        validate(&page).unwrap();
        assert_eq!(page.sections.len(), 1);
        assert_eq!(page.component_count(), 3);
        assert_eq!(
            page.sections[0].components[0].text("text").map(|t| t.value.as_str()),
            Some("Welcome to MetaNord")
        );
    }
}

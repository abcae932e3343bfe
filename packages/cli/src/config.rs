use metanord_editor::DEFAULT_MAX_LEVELS;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "metanord.config.json";

/// MetaNord configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding one JSON file per page
    #[serde(default = "default_pages_dir")]
    pub pages_dir: String,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Language used when no `lang` is requested
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Languages the site is translated into
    #[serde(default)]
    pub languages: Vec<String>,

    /// Undo levels kept by editing sessions
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_pages_dir() -> String {
    "pages".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3030
}

fn default_language() -> String {
    "en".to_string()
}

fn default_history_limit() -> usize {
    DEFAULT_MAX_LEVELS
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Get absolute path to the pages directory
    pub fn get_pages_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.pages_dir)
    }

    /// File backing a page slug
    pub fn page_path(&self, cwd: &str, slug: &str) -> PathBuf {
        self.get_pages_dir(cwd).join(format!("{}.json", slug))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pages_dir: default_pages_dir(),
            host: default_host(),
            port: default_port(),
            default_language: default_language(),
            languages: vec![],
            history_limit: default_history_limit(),
        }
    }
}

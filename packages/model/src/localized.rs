//! Localized text fields.
//!
//! A localized field carries a non-localized default plus per-language
//! overrides keyed by language code. Resolution falls back from the exact
//! code to its primary subtag and finally to the default.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Text whose value varies by language code
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LocalizedText {
    /// Non-localized default
    pub value: String,

    /// Per-language overrides (language code → text)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub translations: BTreeMap<String, String>,
}

impl LocalizedText {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            translations: BTreeMap::new(),
        }
    }

    /// Builder-style translation
    pub fn with(mut self, lang: impl Into<String>, text: impl Into<String>) -> Self {
        self.set(lang, text);
        self
    }

    /// Set (or replace) the translation for a language
    pub fn set(&mut self, lang: impl Into<String>, text: impl Into<String>) {
        self.translations.insert(normalize_lang(&lang.into()), text.into());
    }

    /// Resolve the text for a language.
    ///
    /// Tries the exact code (`et-ee`), then the primary subtag (`et`), then
    /// the default value. Empty translations count as missing.
    pub fn resolve(&self, lang: &str) -> &str {
        let lang = normalize_lang(lang);

        if let Some(text) = self.non_empty(&lang) {
            return text;
        }

        if let Some((primary, _)) = lang.split_once('-') {
            if let Some(text) = self.non_empty(primary) {
                return text;
            }
        }

        &self.value
    }

    /// Languages with a non-empty translation
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.translations
            .iter()
            .filter(|(_, text)| !text.is_empty())
            .map(|(lang, _)| lang.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty() && self.translations.values().all(|t| t.is_empty())
    }

    fn non_empty(&self, lang: &str) -> Option<&str> {
        self.translations
            .get(lang)
            .map(String::as_str)
            .filter(|text| !text.is_empty())
    }
}

impl From<&str> for LocalizedText {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for LocalizedText {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Lowercase and use `-` as the subtag separator (`et_EE` → `et-ee`)
pub fn normalize_lang(lang: &str) -> String {
    lang.trim().replace('_', "-").to_ascii_lowercase()
}

// Accept either a bare string or the full object form.
#[derive(Deserialize)]
#[serde(untagged)]
enum LocalizedTextRepr {
    Plain(String),
    Full {
        #[serde(default)]
        value: String,
        #[serde(default)]
        translations: BTreeMap<String, String>,
    },
}

impl<'de> Deserialize<'de> for LocalizedText {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match LocalizedTextRepr::deserialize(deserializer)? {
            LocalizedTextRepr::Plain(value) => LocalizedText::new(value),
            LocalizedTextRepr::Full { value, translations } => LocalizedText {
                value,
                translations: translations
                    .into_iter()
                    .map(|(lang, text)| (normalize_lang(&lang), text))
                    .collect(),
            },
        })
    }
}

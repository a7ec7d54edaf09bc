// SPDX-License-Identifier: MPL-2.0
//! The locale table: one flat dictionary per supported locale.
//!
//! Dictionaries are loaded from TOML files embedded under `assets/i18n/`,
//! one file per locale, named by its language identifier (e.g. `zh-CN.toml`).
//! Nested tables are flattened into dotted key paths, so
//!
//! ```toml
//! [ledger]
//! balance = "结余"
//! ```
//!
//! becomes the entry `ledger.balance`. The reserved path [`DISPLAY_NAME_KEY`]
//! carries the locale's human-readable name for language pickers.
//!
//! The table is immutable after construction; the first-listed locale is the
//! primary one and doubles as the fallback for missing translations.

use crate::error::Result;
use rust_embed::RustEmbed;
use std::collections::HashMap;
use unic_langid::LanguageIdentifier;

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Asset;

/// The primary (and fallback) locale shipped with the application.
pub const PRIMARY_LOCALE: &str = "zh-CN";

/// Reserved dictionary entry holding the locale's display name.
pub const DISPLAY_NAME_KEY: &str = "meta.name";

/// Flat translation dictionary for a single locale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionary {
    entries: HashMap<String, String>,
}

impl Dictionary {
    /// Parses a nested TOML document into a flat dotted-path dictionary.
    ///
    /// Only string values become entries; values of other types are skipped.
    pub fn from_toml(source: &str) -> Result<Self> {
        let table: toml::Table = source.parse()?;
        let mut entries = HashMap::new();
        flatten(&table, "", &mut entries);
        Ok(Self { entries })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// The locale's display name, if the dictionary carries one.
    pub fn display_name(&self) -> Option<&str> {
        self.get(DISPLAY_NAME_KEY)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn flatten(table: &toml::Table, prefix: &str, out: &mut HashMap<String, String>) {
    for (key, value) in table {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            toml::Value::Table(nested) => flatten(nested, &path, out),
            toml::Value::String(text) => {
                out.insert(path, text.clone());
            }
            _ => {}
        }
    }
}

/// Immutable mapping from locale code to [`Dictionary`], in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    dictionaries: HashMap<LanguageIdentifier, Dictionary>,
    // Listing and fallback selection follow this order, not the map's.
    codes: Vec<LanguageIdentifier>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the catalog from the embedded `assets/i18n/` locale files.
    ///
    /// The primary locale is moved to the front of the table so it is both
    /// the static default and the fallback for missing translations.
    ///
    /// # Panics
    ///
    /// Panics if an embedded locale file is not valid TOML. The assets are
    /// fixed at compile time, so this only fires on a broken build.
    pub fn bundled() -> Self {
        let mut pairs = Vec::new();
        for file in Asset::iter() {
            let filename = file.as_ref();
            if let Some(stem) = filename.strip_suffix(".toml") {
                if let Ok(code) = stem.parse::<LanguageIdentifier>() {
                    if let Some(content) = Asset::get(filename) {
                        let source = String::from_utf8_lossy(content.data.as_ref());
                        let dictionary = Dictionary::from_toml(&source)
                            .expect("Failed to parse embedded locale file.");
                        pairs.push((code, dictionary));
                    }
                }
            }
        }

        if let Some(pos) = pairs
            .iter()
            .position(|(code, _)| code.to_string() == PRIMARY_LOCALE)
        {
            let primary = pairs.remove(pos);
            pairs.insert(0, primary);
        }

        let mut catalog = Self::new();
        for (code, dictionary) in pairs {
            catalog.insert(code, dictionary);
        }
        catalog
    }

    /// Adds a locale to the table. Re-inserting an existing code replaces its
    /// dictionary without changing the listing order.
    pub fn insert(&mut self, code: LanguageIdentifier, dictionary: Dictionary) {
        if !self.dictionaries.contains_key(&code) {
            self.codes.push(code.clone());
        }
        self.dictionaries.insert(code, dictionary);
    }

    pub fn contains(&self, code: &LanguageIdentifier) -> bool {
        self.dictionaries.contains_key(code)
    }

    pub fn get(&self, code: &LanguageIdentifier) -> Option<&Dictionary> {
        self.dictionaries.get(code)
    }

    /// Supported locale codes in insertion order.
    pub fn codes(&self) -> &[LanguageIdentifier] {
        &self.codes
    }

    /// The fallback locale: the first-listed code. `None` only for an empty
    /// table.
    pub fn fallback(&self) -> Option<&LanguageIdentifier> {
        self.codes.first()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

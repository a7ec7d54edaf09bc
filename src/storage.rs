// SPDX-License-Identifier: MPL-2.0
//! Key-value preference persistence.
//!
//! The locale preference survives restarts through a [`PreferenceStore`], a
//! small fallible get/set capability. The production implementation keeps a
//! flat string map in a `preferences.toml` file under the platform config
//! directory; [`MemoryStore`] backs tests and headless embeddings.
//!
//! Callers of this module own the failure policy. The resolver and switcher
//! treat a failed read as "no preference" and a failed write as acceptable
//! loss; nothing here logs or retries.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Store key under which the active locale code is persisted.
pub const LOCALE_KEY: &str = "locale";

const PREFS_FILE: &str = "preferences.toml";
const APP_NAME: &str = "HomeLedger";

/// Fallible key-value persistence for user preferences.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Volatile store for tests and environments without a config directory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// On-disk preferences serialized as a flat TOML string map.
#[derive(Debug, Default, Serialize, Deserialize)]
struct PrefsFile {
    #[serde(flatten)]
    values: HashMap<String, String>,
}

/// Preference store backed by a TOML file.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    /// Store at the platform default location
    /// (`<config_dir>/HomeLedger/preferences.toml`). `None` when the platform
    /// exposes no config directory.
    pub fn new() -> Option<Self> {
        dirs::config_dir().map(|mut path| {
            path.push(APP_NAME);
            path.push(PREFS_FILE);
            Self { path }
        })
    }

    /// Store at an explicit path, for tests and portable deployments.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // A missing or unparseable file reads as an empty map; preferences are
    // reconstructible state, not worth failing startup over.
    fn read_all(&self) -> Result<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        let parsed: PrefsFile = toml::from_str(&content).unwrap_or_default();
        Ok(parsed.values)
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(&PrefsFile { values })?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

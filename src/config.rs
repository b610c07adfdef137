//! Persistent user settings.
//!
//! The config file is a single JSON object. A missing file is the first-run
//! case and yields [`Config::default`]; unknown keys are ignored and missing
//! keys fall back to their defaults.

use crate::error::Result;
use crate::storage;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_CONFIG_FILE: &str = "~/.config/deepler/config.json";
pub const DEFAULT_HIST_FILE: &str = "~/.config/deepler/counts.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Words never kept in the histogram
    pub ignores: BTreeSet<String>,
    /// Histogram location, `~` is expanded on use
    pub hist_file: String,
    /// Words with fewer characters are not kept in the histogram
    pub min_length: usize,
    pub source_lang: String,
    pub target_lang: String,
    /// Counting the translation only happens when the target's base language equals this
    pub count_lang: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            ignores: BTreeSet::new(),
            hist_file: DEFAULT_HIST_FILE.to_string(),
            min_length: 4,
            source_lang: "EN".to_string(),
            target_lang: "JA".to_string(),
            count_lang: "EN".to_string(),
        }
    }
}

/// Resolve the config location, falling back to [`DEFAULT_CONFIG_FILE`].
pub fn resolve_path(path: Option<&Path>) -> Result<PathBuf> {
    match path {
        Some(p) if !p.as_os_str().is_empty() => storage::expand_home(p),
        _ => storage::expand_home(Path::new(DEFAULT_CONFIG_FILE)),
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let path = resolve_path(path)?;
        match storage::read_json(&path)? {
            Some(config) => {
                debug!(path = %path.display(), "loaded config");
                Ok(config)
            }
            None => {
                debug!(path = %path.display(), "no config file, using defaults");
                Ok(Config::default())
            }
        }
    }

    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let path = resolve_path(path)?;
        storage::write_json(&path, self, true)?;
        info!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Pretty JSON, the same text that is written to disk.
    pub fn dump(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn hist_path(&self) -> Result<PathBuf> {
        storage::expand_home(Path::new(&self.hist_file))
    }
}

/// Changes requested by `configure`. `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct ConfigUpdate {
    pub ignore_add: Vec<String>,
    pub ignore_delete: Vec<String>,
    pub min_length: Option<usize>,
    pub source_lang: Option<String>,
    pub target_lang: Option<String>,
    pub count_lang: Option<String>,
}

impl ConfigUpdate {
    /// Apply on top of `config`. The ignore-list becomes
    /// `(current ∪ add) − delete`, so the order of the flags never matters.
    pub fn apply_to(&self, config: &mut Config) {
        config.ignores.extend(self.ignore_add.iter().cloned());
        for word in &self.ignore_delete {
            config.ignores.remove(word);
        }

        if let Some(min_length) = self.min_length {
            config.min_length = min_length;
        }
        if let Some(lang) = &self.source_lang {
            config.source_lang = lang.clone();
        }
        if let Some(lang) = &self.target_lang {
            config.target_lang = lang.clone();
        }
        if let Some(lang) = &self.count_lang {
            config.count_lang = lang.clone();
        }
    }
}

/// Load, apply `update`, save and return the new config.
pub fn update(path: Option<&Path>, update: &ConfigUpdate) -> Result<Config> {
    let mut config = Config::load(path)?;
    update.apply_to(&mut config);
    config.save(path)?;
    Ok(config)
}

//! Label dictionaries used as classification candidates.
//!
//! Two ordered lists are loaded once at startup: content triggers and
//! themes. They are never mutated afterwards and are shared between
//! requests behind an `Arc`.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::classifier::classify;
use crate::config::LabelsConfig;

/// Errors that can occur when loading a label dictionary.
#[derive(Debug, Error)]
pub enum LabelError {
    #[error("Failed to read label dictionary {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Label dictionary {path} is not a JSON array of strings: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The trigger and theme dictionaries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelDictionaries {
    triggers: Vec<String>,
    themes: Vec<String>,
}

impl LabelDictionaries {
    pub fn new(triggers: Vec<String>, themes: Vec<String>) -> Self {
        Self { triggers, themes }
    }

    /// Load both dictionaries from JSON files.
    pub fn load(triggers_path: &Path, themes_path: &Path) -> Result<Self, LabelError> {
        let triggers = read_dictionary(triggers_path)?;
        let themes = read_dictionary(themes_path)?;

        info!(
            "Loaded {} trigger labels and {} theme labels",
            triggers.len(),
            themes.len()
        );

        Ok(Self { triggers, themes })
    }

    /// Load both dictionaries from the configured paths.
    pub fn from_config(config: &LabelsConfig) -> Result<Self, LabelError> {
        Self::load(&config.triggers_path, &config.themes_path)
    }

    pub fn triggers(&self) -> &[String] {
        &self.triggers
    }

    pub fn themes(&self) -> &[String] {
        &self.themes
    }

    /// Trigger labels for the given text.
    pub fn classify_triggers(&self, text: &str) -> Vec<String> {
        classify(text, &self.triggers)
    }

    /// Theme labels for the given text.
    pub fn classify_themes(&self, text: &str) -> Vec<String> {
        classify(text, &self.themes)
    }
}

fn read_dictionary(path: &Path) -> Result<Vec<String>, LabelError> {
    let raw = std::fs::read_to_string(path).map_err(|source| LabelError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&raw).map_err(|source| LabelError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

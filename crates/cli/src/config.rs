//! Configuration file support

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tidyup_clean::CleanConfig;
use tidyup_formats::default_null_markers;
use tidyup_organize::ExtensionTable;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Category name → extension list; empty means the built-in table
    #[serde(default)]
    pub categories: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub cleaning: CleaningOptions,
}

/// Cleaning pipeline options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningOptions {
    #[serde(default = "default_null_markers")]
    pub null_markers: Vec<String>,
    #[serde(default = "default_placeholder")]
    pub text_placeholder: String,
    #[serde(default = "default_true")]
    pub lowercase_text: bool,
    #[serde(default = "default_true")]
    pub trim_whitespace: bool,
}

fn default_placeholder() -> String {
    "unknown".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for CleaningOptions {
    fn default() -> Self {
        Self {
            null_markers: default_null_markers(),
            text_placeholder: default_placeholder(),
            lowercase_text: true,
            trim_whitespace: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from a file (YAML or TOML)
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");

        match extension {
            "yaml" | "yml" => serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display())),
            "toml" => toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display())),
            _ => Err(anyhow::anyhow!(
                "Unsupported config file format: {extension}. Use .yaml, .yml, or .toml"
            )),
        }
    }

    /// Load from an optional path, falling back to defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Save configuration to a file
    #[allow(dead_code)]
    pub fn save(&self, path: &Path) -> Result<()> {
        let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");

        let content = match extension {
            "yaml" | "yml" => serde_yaml::to_string(self)?,
            "toml" => toml::to_string_pretty(self)?,
            _ => {
                return Err(anyhow::anyhow!(
                    "Unsupported config file format: {extension}. Use .yaml, .yml, or .toml"
                ))
            }
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Build the extension table from the configured categories
    pub fn extension_table(&self) -> ExtensionTable {
        if self.categories.is_empty() {
            ExtensionTable::default_table()
        } else {
            ExtensionTable::from_categories(
                self.categories
                    .iter()
                    .map(|(category, exts)| (category.clone(), exts.clone())),
            )
        }
    }

    /// Build the cleaning configuration
    pub fn clean_config(&self) -> CleanConfig {
        CleanConfig {
            null_markers: self.cleaning.null_markers.clone(),
            text_placeholder: self.cleaning.text_placeholder.clone(),
            lowercase_text: self.cleaning.lowercase_text,
            trim_whitespace: self.cleaning.trim_whitespace,
        }
    }
}

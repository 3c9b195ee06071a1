//! Configuration handling for the playground form

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{InputProps, Rule};

/// Form definition loaded from the user's config directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaygroundConfig {
    /// Title shown above the form
    pub title: String,
    /// Fields in display order
    pub fields: Vec<InputProps>,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            title: "Payment".to_string(),
            fields: vec![
                InputProps::text("name", "Full name")
                    .required()
                    .with_rule(Rule::min_length(3)),
                InputProps::text("phone", "Phone")
                    .with_format("(99) 99999-9999")
                    .with_placeholder("(00) 00000-0000")
                    .with_rule(Rule::min_digits(11).with_message("Phone number is incomplete")),
                InputProps::text("plate", "License plate").with_format("AAA-9S99"),
                InputProps::money("amount", "Amount").with_value(100),
            ],
        }
    }
}

impl PlaygroundConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "masked-input", "masked-input")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Parse a config document
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load configuration from file, or the built-in demo form
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from `path`, falling back to the demo form when it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            self.save_to(&path)?;
        }
        Ok(())
    }

    /// Write the config as pretty JSON, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

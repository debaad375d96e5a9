//! Configuration handling for azlog
//!
//! Configuration is read from the first of:
//! - an explicit path (`--config` or `$AZLOG_CONFIG`)
//! - the nearest `azlog.toml` in the current directory or its ancestors
//! - `~/.config/azlog/config.toml` (global)
//!
//! Missing files mean defaults.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::OutputFormat;
use crate::domain::{is_valid_format_name, Arity, FormatCatalog};

/// File name searched for in the current directory and its ancestors
pub const PROJECT_CONFIG_FILE: &str = "azlog.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Which built-in format catalog to start from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CatalogVariant {
    /// `endgroup`, `command`, `group`, `debug`, `error`, `warning`
    #[default]
    Standard,
    /// Standard plus `section`
    Extended,
}

/// Format catalog settings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct FormatsConfig {
    /// Built-in catalog to start from
    pub variant: CatalogVariant,

    /// Additional formats, or arity overrides for built-in ones
    pub custom: BTreeMap<String, Arity>,
}

impl FormatsConfig {
    /// Builds the format catalog these settings describe
    pub fn catalog(&self) -> Result<FormatCatalog, ConfigError> {
        let mut catalog = match self.variant {
            CatalogVariant::Standard => FormatCatalog::standard(),
            CatalogVariant::Extended => FormatCatalog::extended(),
        };

        for (name, arity) in &self.custom {
            if !is_valid_format_name(name) {
                return Err(ConfigError::Invalid(format!(
                    "format name '{}' must be non-empty and contain no whitespace or brackets",
                    name
                )));
            }
            catalog.insert(name.as_str(), *arity);
        }

        Ok(catalog)
    }
}

/// Contents of a configuration file
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Output format for listings and errors (text or json)
    pub default_format: OutputFormat,

    /// Format catalog settings
    pub formats: FormatsConfig,
}

/// Loaded configuration and where it came from
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub settings: Settings,
    pub source: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from an explicit path or the default locations
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        if let Some(path) = Self::find_project_file(&cwd) {
            return Self::from_file(&path);
        }

        match Self::global_config_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Loads configuration from a specific file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let settings = Self::parse(&content)
            .with_context(|| format!("Failed to load config: {}", path.display()))?;

        Ok(Self {
            settings,
            source: Some(path.to_path_buf()),
        })
    }

    /// Parses and checks configuration text
    pub fn parse(content: &str) -> Result<Settings, ConfigError> {
        let settings: Settings =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        settings.formats.catalog()?;
        Ok(settings)
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "azlog", "azlog").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Finds the nearest `azlog.toml`, starting at `start` and walking up
    pub fn find_project_file(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            let candidate = current.join(PROJECT_CONFIG_FILE);
            if candidate.is_file() {
                return Some(candidate);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// The format catalog selected by this configuration
    pub fn format_catalog(&self) -> Result<FormatCatalog, ConfigError> {
        self.settings.formats.catalog()
    }
}

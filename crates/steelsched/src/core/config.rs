//! Configuration loading and management.
//!
//! Validation options can be loaded from TOML, YAML or JSON files, discovered from a
//! `steelsched.toml` in the project hierarchy, or built programmatically.

use crate::{Result, SteelschedError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name searched for by [`ValidationConfig::discover`].
pub const CONFIG_FILE_NAME: &str = "steelsched.toml";

/// Options for schedule validation.
///
/// Every field has a default, so a config file only needs the options it changes.
///
/// # Example
///
/// ```rust
/// use steelsched::core::config::ValidationConfig;
///
/// // Create with defaults
/// let config = ValidationConfig::default();
/// assert!(config.cross_row_checks);
/// assert!(!config.context_corrections);
///
/// // Load from TOML file
/// // let config = ValidationConfig::from_toml_file("steelsched.toml")?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Compare quantities across rows of the same mark family (beam schedules only)
    #[serde(default = "default_true")]
    pub cross_row_checks: bool,

    /// Higher-quantity siblings needed before an otherwise valid row gets a quantity warning
    #[serde(default = "default_min_higher_qty_siblings")]
    pub min_higher_qty_siblings: usize,

    /// Record text confidence for every present field
    #[serde(default = "default_true")]
    pub annotate_confidence: bool,

    /// Attach advisory review findings (OCR suspects, misaligned columns)
    #[serde(default = "default_true")]
    pub review_flags: bool,

    /// Rewrite suspect sizes using sibling rows of the same schedule
    #[serde(default)]
    pub context_corrections: bool,
}

fn default_true() -> bool {
    true
}
fn default_min_higher_qty_siblings() -> usize {
    2
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            cross_row_checks: true,
            min_higher_qty_siblings: default_min_higher_qty_siblings(),
            annotate_confidence: true,
            review_flags: true,
            context_corrections: false,
        }
    }
}

impl ValidationConfig {
    /// Check option values that deserialize but make no sense.
    pub fn validate(&self) -> Result<()> {
        if self.min_higher_qty_siblings == 0 {
            return Err(SteelschedError::validation(
                "min_higher_qty_siblings must be at least 1",
            ));
        }
        Ok(())
    }

    fn checked(self, path: &Path) -> Result<Self> {
        self.validate()
            .map_err(|e| SteelschedError::validation(format!("Invalid config in {}: {}", path.display(), e)))?;
        Ok(self)
    }

    fn read(path: &Path) -> Result<String> {
        std::fs::read_to_string(path)
            .map_err(|e| SteelschedError::validation(format!("Failed to read config file {}: {}", path.display(), e)))
    }

    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = Self::read(path)?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| SteelschedError::validation(format!("Invalid TOML in {}: {}", path.display(), e)))?;
        config.checked(path)
    }

    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = Self::read(path)?;

        let config: Self = serde_yaml_ng::from_str(&content)
            .map_err(|e| SteelschedError::validation(format!("Invalid YAML in {}: {}", path.display(), e)))?;
        config.checked(path)
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = Self::read(path)?;

        let config: Self = serde_json::from_str(&content)
            .map_err(|e| SteelschedError::validation(format!("Invalid JSON in {}: {}", path.display(), e)))?;
        config.checked(path)
    }

    /// Load configuration, choosing the format from the file extension.
    ///
    /// `.toml`, `.yaml`/`.yml` and `.json` are recognized.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("toml") => Self::from_toml_file(path),
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(SteelschedError::validation(format!(
                "Unsupported config file format: {} (expected .toml, .yaml, .yml or .json)",
                path.display()
            ))),
        }
    }

    /// Discover configuration file in parent directories.
    ///
    /// Searches for `steelsched.toml` in current directory and parent directories.
    ///
    /// # Returns
    ///
    /// - `Some(config)` if found
    /// - `None` if no config file found
    pub fn discover() -> Result<Option<Self>> {
        let mut current = std::env::current_dir().map_err(SteelschedError::Io)?;

        loop {
            let candidate = current.join(CONFIG_FILE_NAME);
            if candidate.exists() {
                tracing::debug!(path = %candidate.display(), "Discovered config file");
                return Ok(Some(Self::from_toml_file(candidate)?));
            }

            if let Some(parent) = current.parent() {
                current = parent.to_path_buf();
            } else {
                break;
            }
        }

        Ok(None)
    }
}

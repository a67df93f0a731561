//! Rendering settings with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/outline-tree/outline-tree.toml`
//! 3. Explicit config file passed by the caller
//! 4. Environment variables: `OUTLINE_TREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::errors::{TreeError, TreeResult};

/// How outline lines are rendered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutlineSettings {
    /// Indentation marker repeated once per level (default: "-")
    pub marker: String,
    /// Prefix each value with its depth, e.g. `--1.Smartphone`
    pub level_prefix: bool,
    /// Indent roots by one marker, i.e. `depth + 1` markers per line
    pub indent_root: bool,
}

impl Default for OutlineSettings {
    fn default() -> Self {
        Self {
            marker: "-".into(),
            level_prefix: false,
            indent_root: true,
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub marker: Option<String>,
    pub level_prefix: Option<bool>,
    pub indent_root: Option<bool>,
}

/// Get the XDG config directory for outline-tree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "outline-tree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("outline-tree.toml"))
}

fn config_err(e: ConfigError) -> TreeError {
    TreeError::Config(e.to_string())
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> TreeResult<RawSettings> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| TreeError::Config(format!("read {}: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| TreeError::Config(format!("parse {}: {}", path.display(), e)))
}

impl OutlineSettings {
    /// Overlay wins where it specifies a value.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            marker: overlay.marker.clone().unwrap_or_else(|| self.marker.clone()),
            level_prefix: overlay.level_prefix.unwrap_or(self.level_prefix),
            indent_root: overlay.indent_root.unwrap_or(self.indent_root),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; must exist if given
    #[instrument(level = "debug")]
    pub fn load(config_file: Option<&Path>) -> TreeResult<Self> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("loading global config {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(path) = config_file {
            current = current.merge_with(&load_raw_settings(path)?);
        }

        current = Self::apply_env_overrides(current)?;
        current.validate()?;
        Ok(current)
    }

    /// Rejects settings that would render an outline without indentation.
    pub fn validate(&self) -> TreeResult<()> {
        if self.marker.is_empty() {
            return Err(TreeError::Config("marker must not be empty".into()));
        }
        Ok(())
    }

    /// Apply OUTLINE_TREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> TreeResult<Self> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("OUTLINE_TREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("marker") {
            settings.marker = val;
        }
        if let Ok(val) = config.get_bool("level_prefix") {
            settings.level_prefix = val;
        }
        if let Ok(val) = config.get_bool("indent_root") {
            settings.indent_root = val;
        }

        Ok(settings)
    }
}

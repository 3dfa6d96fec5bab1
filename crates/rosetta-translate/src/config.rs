//! Configuration for sample translation.
//!
//! Loads config from:
//! 1. Global: ~/.config/rosetta/config.toml
//! 2. Per-project: .rosetta/config.toml (overrides global)
//!
//! Example config.toml:
//! ```toml
//! [python]
//! builtins = { "console.warn" = "logging.warning" }
//!
//! [document]
//! parallel = false
//! ```

use crate::error::ConfigError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Python target configuration.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct PythonConfig {
    /// Extra builtin-call mappings, merged over the built-in table.
    pub builtins: BTreeMap<String, String>,
}

/// Document translation configuration.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct DocumentConfig {
    /// Translate code blocks in parallel (default: true).
    pub parallel: Option<bool>,
}

impl DocumentConfig {
    pub fn parallel(&self) -> bool {
        self.parallel.unwrap_or(true)
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TranslateConfig {
    pub python: PythonConfig,
    pub document: DocumentConfig,
}

impl TranslateConfig {
    /// Load configuration for a project.
    ///
    /// Loads global config from ~/.config/rosetta/config.toml,
    /// then merges with per-project config from .rosetta/config.toml.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        Self::load_with_global(Self::global_config_path().as_deref(), root)
    }

    /// Like [`load`](Self::load) with an explicit global config path.
    pub fn load_with_global(global: Option<&Path>, root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(global_path) = global {
            if let Some(global) = Self::load_file(global_path)? {
                config = config.merge(global);
            }
        }

        let project_path = root.join(".rosetta").join("config.toml");
        if let Some(project) = Self::load_file(&project_path)? {
            config = config.merge(project);
        }

        Ok(config)
    }

    /// Get the global config path.
    pub fn global_config_path() -> Option<PathBuf> {
        let config_home = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))?;
        Some(config_home.join("rosetta").join("config.toml"))
    }

    /// Load config from a file path; a missing file is not an error.
    pub fn load_file(path: &Path) -> Result<Option<Self>, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        debug!(path = %path.display(), "loading config");
        toml::from_str(&content)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Merge another config into this one; values set in `other` win.
    pub fn merge(mut self, other: Self) -> Self {
        self.python.builtins.extend(other.python.builtins);
        if other.document.parallel.is_some() {
            self.document.parallel = other.document.parallel;
        }
        self
    }
}

//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/rsnote/rsnote.toml`
//! 3. Local config: an explicit file passed to [`Settings::load`]
//! 4. Environment variables: `RSNOTE_*` prefix, `__` between sections

use std::path::{Path, PathBuf};

use config::{Config, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::domain::RenderSettings;
use crate::util::path::expand_path;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("environment override: {0}")]
    Env(#[from] config::ConfigError),

    #[error("render settings: {0}")]
    Render(#[from] toml::ser::Error),
}

/// Raw render settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawRenderSettings {
    pub marker: Option<String>,
    pub label: Option<String>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub render: RawRenderSettings,
}

/// Unified configuration for rsnote.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    /// Separator labels of the deep copy dump
    pub render: RenderSettings,
}

/// Get the XDG config directory for rsnote.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "rsnote").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("rsnote.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, SettingsError> {
    let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

impl Settings {
    /// Overlay wins wherever it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            render: RenderSettings {
                marker: overlay
                    .render
                    .marker
                    .clone()
                    .unwrap_or_else(|| self.render.marker.clone()),
                label: overlay
                    .render
                    .label
                    .clone()
                    .unwrap_or_else(|| self.render.label.clone()),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local` - Optional config file; `~` and `$VAR` are expanded. A
    ///   missing local file is skipped like a missing global one.
    #[instrument(level = "debug")]
    pub fn load(local: Option<&Path>) -> Result<Self, SettingsError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!(path = %global_path.display(), "applying global config");
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(local) = local {
            let local_path = expand_path(local);
            if local_path.exists() {
                debug!(path = %local_path.display(), "applying local config");
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        Self::apply_env_overrides(current)
    }

    /// Apply RSNOTE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, SettingsError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("RSNOTE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        if let Ok(val) = config.get_string("render.marker") {
            settings.render.marker = val;
        }
        if let Ok(val) = config.get_string("render.label") {
            settings.render.label = val;
        }

        Ok(settings)
    }

    /// Effective settings as TOML, e.g. to seed a config file.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

// SPDX-License-Identifier: MIT
//
// Config file — optional TOML settings for the label host.
//
// Looked up at `$XDG_CONFIG_HOME/big-label/config.toml`, falling back to
// `~/.config/big-label/config.toml`. A missing default file means default
// settings. A file named explicitly with `--config` must exist.
//
//   fallback_label = "HOST"   # label when nothing else names the pane
//   foreground = 15           # xterm-256 index of the letters
//   panes = 3                 # pane count when --panes is not given

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use bl_core::options::{DEFAULT_FALLBACK_LABEL, LabelOptions};
use bl_core::palette::DEFAULT_LIGHT;

// ─── Errors ─────────────────────────────────────────────────────────────────

/// Why a config file could not be used.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

// ─── Config ─────────────────────────────────────────────────────────────────

/// Settings read from the config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Label used when no argument, session or window name is available.
    pub fallback_label: String,
    /// xterm-256 index of lit pixels and fallback text.
    pub foreground: u8,
    /// Pane count when the command line does not give one.
    pub panes: Option<u8>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fallback_label: DEFAULT_FALLBACK_LABEL.to_owned(),
            foreground: DEFAULT_LIGHT,
            panes: None,
        }
    }
}

impl Config {
    /// Parse TOML text.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Load settings.
    ///
    /// With `explicit`, that file is read and must exist. Otherwise the
    /// default location is tried and a missing file yields defaults.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Read`] if the file cannot be read, [`ConfigError::Parse`]
    /// if it is not valid config TOML.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::read(path),
            None => match default_path() {
                Some(path) if path.is_file() => Self::read(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        let config = Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// The subsystem options these settings describe.
    #[must_use]
    pub fn label_options(&self) -> LabelOptions {
        LabelOptions {
            fallback_label: self.fallback_label.clone(),
            foreground: self.foreground,
        }
    }
}

// ─── Location ───────────────────────────────────────────────────────────────

/// Default config path from the environment.
#[must_use]
pub fn default_path() -> Option<PathBuf> {
    default_path_from(
        std::env::var_os("XDG_CONFIG_HOME"),
        std::env::var_os("HOME"),
    )
}

fn default_path_from(xdg_config_home: Option<OsString>, home: Option<OsString>) -> Option<PathBuf> {
    let base = match xdg_config_home.filter(|dir| !dir.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => PathBuf::from(home.filter(|dir| !dir.is_empty())?).join(".config"),
    };
    Some(base.join("big-label").join("config.toml"))
}

// ─── Tests ──────────────────────────────────────────────────────────────────

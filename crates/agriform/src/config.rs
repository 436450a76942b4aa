//! CLI configuration loading
//!
//! Optional TOML file, read from the platform config directory unless a
//! `--config` path overrides it. A missing file yields the defaults; a
//! present but unreadable or malformed file is an error, on the theory
//! that a config the user wrote deserves a diagnostic rather than silent
//! fallback.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Settings the `agf` binary reads before dispatching.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Form used when `--form` is not given; `scheme` when unset
    pub default_form: Option<String>,
    /// Session store file path; the platform data directory when unset
    pub session_file: Option<PathBuf>,
    /// Whether output defaults to JSON without `--json`
    pub json: bool,
}

impl Config {
    /// Load configuration from `override_path`, or from the platform
    /// config directory when none is given.
    ///
    /// # Errors
    ///
    /// Fails when an explicitly given path does not exist, or when any
    /// present file cannot be read or parsed.
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let path = match override_path {
            Some(path) => {
                anyhow::ensure!(path.exists(), "config file not found: {}", path.display());
                Some(path.to_path_buf())
            }
            None => Self::default_path().filter(|p| p.exists()),
        };

        path.map_or_else(|| Ok(Self::default()), |path| Self::from_file(&path))
    }

    /// The form to operate on given an optional `--form` argument
    #[must_use]
    pub fn form_name<'a>(&'a self, arg: Option<&'a str>) -> &'a str {
        arg.or(self.default_form.as_deref()).unwrap_or("scheme")
    }

    /// Whether output should be JSON given the `--json` flag
    #[must_use]
    pub const fn json_output(&self, flag: bool) -> bool {
        flag || self.json
    }

    fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Path to the global config file
    fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "agriform")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

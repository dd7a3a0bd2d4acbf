//! User configuration.
//!
//! Read from `<config dir>/claw-import/config.toml` (override with
//! `CLAW_IMPORT_CONFIG`). Every field is optional; command-line flags win over
//! file values, which win over the built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::transcript::{DEFAULT_MODEL, DEFAULT_PROVIDER};

/// Environment variable pointing at an alternative config file.
pub const CONFIG_ENV: &str = "CLAW_IMPORT_CONFIG";

/// Default OpenClaw agent id.
pub const DEFAULT_AGENT: &str = "main";

/// Default working directory written into session headers.
pub const DEFAULT_CWD: &str = "/home/user";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// OpenClaw agent the session belongs to
    pub agent: String,
    /// Working directory recorded in the session header
    pub cwd: String,
    /// Drop local-command noise from user turns
    pub filter_commands: bool,
    /// OpenClaw state directory (default `~/.openclaw`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_dir: Option<PathBuf>,
    /// Model announced when a transcript names none
    pub fallback_model: String,
    /// Provider for model ids without a `provider/` prefix
    pub provider: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            agent: DEFAULT_AGENT.to_string(),
            cwd: DEFAULT_CWD.to_string(),
            filter_commands: true,
            state_dir: None,
            fallback_model: DEFAULT_MODEL.to_string(),
            provider: DEFAULT_PROVIDER.to_string(),
        }
    }
}

impl Config {
    /// Path of the config file, honouring `CLAW_IMPORT_CONFIG`.
    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        let dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(dir.join("claw-import").join("config.toml"))
    }

    /// Load the config file, falling back to defaults when it does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {:?}", path))?;
        Self::parse(&content).with_context(|| format!("Failed to parse config: {:?}", path))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// OpenClaw state directory.
    pub fn state_dir(&self) -> Result<PathBuf> {
        match &self.state_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(dirs::home_dir()
                .context("Could not determine home directory")?
                .join(".openclaw")),
        }
    }
}

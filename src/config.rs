//! Configuration module for Deckhand
//!
//! Implements the configuration hierarchy:
//! 1. CLI flags (highest priority, applied in main)
//! 2. Environment variables (DECKHAND_*)
//! 3. Config file (deckhand.toml in the working directory)
//! 4. Built-in defaults (lowest priority)

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DeckhandError, DeckhandResult};

/// Name of the config file looked up in the working directory
pub const CONFIG_FILE: &str = "deckhand.toml";

/// Base URL the pinned artifact is downloaded from
const DIST_BASE_URL: &str = "https://knb.ecoinformatics.org/software/dist";

/// Deployment configuration, loaded once at startup and passed into
/// each procedure. Read-only thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Pinned artifact name and version, e.g. "metacat-bin-2.8.4"
    #[serde(default = "default_package")]
    pub package: String,

    /// Suppress remote command output for non-interactive commands
    #[serde(default)]
    pub quiet: bool,

    /// Bootstrap the locally generated CA rather than only the
    /// distribution snake-oil pair
    #[serde(default = "default_true")]
    pub use_local_ca: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            package: default_package(),
            quiet: false,
            use_local_ca: true,
        }
    }
}

fn default_package() -> String {
    "metacat-bin-2.8.4".to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> DeckhandResult<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| DeckhandError::InvalidConfig {
            file: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load from `deckhand.toml` in `dir` (the working directory when
    /// `None`), falling back to defaults. A malformed file is reported
    /// and ignored rather than aborting before any command has run.
    pub fn load_or_default(dir: Option<&Path>) -> Self {
        let path = match dir {
            Some(dir) => dir.join(CONFIG_FILE),
            None => Path::new(CONFIG_FILE).to_path_buf(),
        };

        if !path.exists() {
            return Self::default();
        }

        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("warning: ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Apply environment variable overrides (DECKHAND_* prefix)
    pub fn apply_env_overrides(&mut self) {
        if let Ok(package) = std::env::var("DECKHAND_PACKAGE") {
            if !package.is_empty() {
                self.package = package;
            }
        }

        if let Ok(val) = std::env::var("DECKHAND_QUIET") {
            if let Some(quiet) = parse_bool(&val) {
                self.quiet = quiet;
            }
        }

        if let Ok(val) = std::env::var("DECKHAND_USE_LOCAL_CA") {
            if let Some(use_local_ca) = parse_bool(&val) {
                self.use_local_ca = use_local_ca;
            }
        }
    }

    /// Fixed download URL for the pinned artifact
    pub fn package_url(&self) -> String {
        format!("{}/{}.tar.gz", DIST_BASE_URL, self.package)
    }

    /// Versioned extraction directory under the service account's home
    pub fn package_dir(&self) -> String {
        format!("/home/metacat/{}", self.package)
    }
}

fn parse_bool(val: &str) -> Option<bool> {
    match val.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

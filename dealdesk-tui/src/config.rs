//! Configuration file handling.
//!
//! Read from `<config dir>/dealdesk/config.json`. A missing or unreadable
//! file falls back to defaults, which run the dashboard against in-memory
//! sample data instead of a backend.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Dashboard configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Backend origin, e.g. `https://api.example.com`. `None` means
    /// offline mode with sample data.
    pub base_url: Option<String>,
    /// Bearer token sent with every request, if the backend needs one.
    pub api_token: Option<String>,
    /// Records per page.
    pub page_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: None,
            api_token: None,
            page_size: 10,
        }
    }
}

/// Path of the config file, if a config directory exists on this platform.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("dealdesk").join("config.json"))
}

/// Load the configuration, falling back to defaults on any problem.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };
    let Ok(contents) = fs::read_to_string(&path) else {
        return Config::default();
    };
    match serde_json::from_str(&contents) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("ignoring malformed config at {}: {e}", path.display());
            Config::default()
        }
    }
}

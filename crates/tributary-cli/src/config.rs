//! Optional per-directory configuration.
//!
//! `tributary init` writes `.tributary/config.json`; data commands
//! read it when present so operators don't repeat the file paths on
//! every invocation. Command-line flags always win.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;
use tributary_graph::EdgeModel;

pub const CONFIG_DIR: &str = ".tributary";
pub const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Combined mapping table path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mappings: Option<PathBuf>,

    /// Split-input paths, used together.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub targets: Option<PathBuf>,

    /// Edge model override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<EdgeModel>,

    /// Default traversal depth for trace.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

impl Config {
    /// Path of the config file under `dir`.
    pub fn file_path(dir: &Path) -> PathBuf {
        dir.join(CONFIG_DIR).join(CONFIG_FILE)
    }

    /// Loads the config from `dir`, if one exists.
    ///
    /// A malformed file is reported and treated as absent rather than
    /// blocking the command.
    pub fn load(dir: &Path) -> Config {
        let path = Self::file_path(dir);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(_) => return Config::default(),
        };

        match serde_json::from_str(&contents) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring malformed config");
                Config::default()
            }
        }
    }
}

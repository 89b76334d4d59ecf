//! Where the recipe database lives on disk.
//!
//! Resolution order, first hit wins:
//! - `--home` on the command line
//! - `RECIPES_HOME` (and `RECIPES_EXPORT` for the export file)
//! - `<config dir>/recipe-keeper/config.json`
//! - the platform data directory for `recipe-keeper`

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::store::Layout;

const APP_NAME: &str = "recipe-keeper";
const CONFIG_FILE: &str = "config.json";
const EXPORT_FILE: &str = "export-all.json";

pub const HOME_ENV: &str = "RECIPES_HOME";
pub const EXPORT_ENV: &str = "RECIPES_EXPORT";

/// Optional overrides read from `config.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    /// Root of the recipe database.
    #[serde(default)]
    pub home: Option<PathBuf>,
    /// Destination of `export`. Defaults to `<home>/export-all.json`.
    #[serde(default)]
    pub export_path: Option<PathBuf>,
}

impl FileConfig {
    /// Load from the user's config directory. A missing file yields the
    /// defaults; an unreadable one is logged and ignored.
    pub fn load() -> Self {
        match get_config_path().and_then(|path| Self::load_from(&path)) {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load config, using defaults: {:#}", e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config = serde_json::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub home: PathBuf,
    pub export_path: PathBuf,
}

impl Config {
    /// Resolve the configuration from the CLI flag, environment and config file.
    pub fn resolve(home_flag: Option<PathBuf>) -> Result<Self> {
        let env_home = std::env::var_os(HOME_ENV).map(PathBuf::from);
        let env_export = std::env::var_os(EXPORT_ENV).map(PathBuf::from);
        Self::from_sources(home_flag, env_home, env_export, FileConfig::load())
    }

    /// Combine already-gathered sources, highest precedence first.
    pub fn from_sources(
        home_flag: Option<PathBuf>,
        env_home: Option<PathBuf>,
        env_export: Option<PathBuf>,
        file: FileConfig,
    ) -> Result<Self> {
        let home = match home_flag.or(env_home).or(file.home) {
            Some(home) => home,
            None => default_home()?,
        };
        let export_path = env_export
            .or(file.export_path)
            .unwrap_or_else(|| home.join(EXPORT_FILE));

        Ok(Self { home, export_path })
    }

    pub fn layout(&self) -> Layout {
        Layout::new(&self.home)
    }
}

fn default_home() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", APP_NAME)
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(dirs.data_dir().to_path_buf())
}

fn get_config_path() -> Result<PathBuf> {
    let mut path =
        config_dir().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_beats_env_and_file() {
        let file = FileConfig {
            home: Some(PathBuf::from("/from/file")),
            export_path: None,
        };
        let config = Config::from_sources(
            Some(PathBuf::from("/from/flag")),
            Some(PathBuf::from("/from/env")),
            None,
            file,
        )
        .unwrap();
        assert_eq!(config.home, PathBuf::from("/from/flag"));
        assert_eq!(config.export_path, PathBuf::from("/from/flag/export-all.json"));
    }

    #[test]
    fn test_file_used_when_nothing_else_set() {
        let file = FileConfig {
            home: Some(PathBuf::from("/from/file")),
            export_path: Some(PathBuf::from("/exports/all.json")),
        };
        let config = Config::from_sources(None, None, None, file).unwrap();
        assert_eq!(config.home, PathBuf::from("/from/file"));
        assert_eq!(config.export_path, PathBuf::from("/exports/all.json"));
    }

    #[test]
    fn test_env_export_overrides_file() {
        let file = FileConfig {
            home: None,
            export_path: Some(PathBuf::from("/exports/all.json")),
        };
        let config = Config::from_sources(
            Some(PathBuf::from("/h")),
            None,
            Some(PathBuf::from("/tmp/out.json")),
            file,
        )
        .unwrap();
        assert_eq!(config.export_path, PathBuf::from("/tmp/out.json"));
    }

    #[test]
    fn test_missing_config_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = FileConfig::load_from(&dir.path().join("config.json")).unwrap();
        assert!(config.home.is_none());
    }

    #[test]
    fn test_config_file_parses_partial_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"home": "/srv/recipes"}"#).unwrap();

        let config = FileConfig::load_from(&path).unwrap();
        assert_eq!(config.home, Some(PathBuf::from("/srv/recipes")));
        assert!(config.export_path.is_none());
    }
}

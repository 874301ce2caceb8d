use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "orgchart";
const CONFIG_FILE: &str = "config.json";

/// Log filter used when neither `RUST_LOG` nor the config file sets one.
pub const DEFAULT_LOG_FILTER: &str = "orgchart=warn";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `tracing_subscriber::EnvFilter` directives, e.g. `orgchart=debug`
    pub log_filter: String,
    /// Skip malformed record lines instead of rejecting the file
    pub skip_malformed: bool,
    /// Print the whole hierarchy before the paths
    pub tree: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            skip_malformed: false,
            tree: false,
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from the user's config directory.
    /// Returns default config if file doesn't exist or fails to parse.
    pub fn load(path: Option<&Path>) -> Self {
        let result = match path {
            Some(path) => Self::try_load_from(path),
            None => get_config_path().and_then(|path| Self::try_load_from(&path)),
        };
        match result {
            Ok(config) => config,
            Err(e) => {
                // Logging is configured from this file, so it isn't up yet
                eprintln!("Failed to load config, using defaults: {:#}", e);
                Self::default()
            }
        }
    }

    fn try_load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).context("Failed to read config file")?;

        let config = serde_json::from_str(&content).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Save the configuration to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }
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
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        let config = Config::load(Some(path.as_path()));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);
        let config = Config {
            log_filter: "orgchart=debug".to_string(),
            skip_malformed: true,
            tree: true,
        };

        config.save(&path).unwrap();
        assert_eq!(Config::load(Some(path.as_path())), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, r#"{ "tree": true }"#).unwrap();

        let config = Config::load(Some(path.as_path()));
        assert!(config.tree);
        assert!(!config.skip_malformed);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_invalid_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "not json").unwrap();

        assert_eq!(Config::load(Some(path.as_path())), Config::default());
    }
}

use anyhow::{Context, Result};
use logscribe_engine::Visibility;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::args::MAX_LENGTH_LIMIT;

/// Default `--max-length` when truncation is on
pub const DEFAULT_MAX_LENGTH: usize = 1000;

/// Settings read from `config.toml`. Command-line flags take precedence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub projects_dir: Option<String>,
    pub exclude_agents: bool,
    pub auto_pick_newest: bool,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DisplayConfig {
    pub thinking: Visibility,
    pub tool_calls: Visibility,
    pub tool_results: Visibility,
    pub system: Visibility,
    pub timestamps: bool,
    pub truncate: bool,
    pub max_length: Option<usize>,
}

impl Config {
    /// Load from `path`; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the explicit path, or the default location if there is one.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("logscribe").join("config.toml"))
    }

    fn validate(&self) -> Result<()> {
        if let Some(n) = self.display.max_length
            && !(1..=MAX_LENGTH_LIMIT).contains(&n)
        {
            anyhow::bail!(
                "display.max_length must be between 1 and {}, got {}",
                MAX_LENGTH_LIMIT,
                n
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.display.thinking, Visibility::Hide);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
exclude_agents = true

[display]
thinking = "show"
tool_results = "suppress"
max_length = 200
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(config.exclude_agents);
        assert!(!config.auto_pick_newest);
        assert_eq!(config.display.thinking, Visibility::Show);
        assert_eq!(config.display.tool_calls, Visibility::Hide);
        assert_eq!(config.display.tool_results, Visibility::Suppress);
        assert_eq!(config.display.max_length, Some(200));
    }

    #[test]
    fn test_invalid_values_are_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        std::fs::write(&path, "[display]\nthinking = \"loud\"\n").unwrap();
        assert!(Config::load_from(&path).is_err());

        std::fs::write(&path, "[display]\nmax_length = 0\n").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("max_length"));
    }
}

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Environment variable that overrides the API key stored in the config file.
pub const ENV_API_KEY: &str = "OPENWEATHER_API_KEY";

/// Unit system selector sent to the provider with every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn as_str(self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    /// Suffix for rendered temperatures.
    pub fn suffix(self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Units::Metric => f.write_str("Metric (°C)"),
            Units::Imperial => f.write_str("Imperial (°F)"),
        }
    }
}

fn default_city() -> String {
    "Toronto".to_owned()
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// default_city = "Toronto"
/// units = "metric"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api_key: Option<String>,

    /// City fetched on startup before the user has searched for anything.
    #[serde(default = "default_city")]
    pub default_city: String,

    #[serde(default)]
    pub units: Units,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            default_city: default_city(),
            units: Units::default(),
        }
    }
}

impl Config {
    /// API key to use: the environment variable wins over the config file.
    pub fn resolved_api_key(&self) -> Result<String> {
        resolve_api_key(std::env::var(ENV_API_KEY).ok(), self.api_key.as_deref())
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skywatch", "skywatch")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

fn resolve_api_key(env_key: Option<String>, file_key: Option<&str>) -> Result<String> {
    env_key
        .filter(|key| !key.trim().is_empty())
        .or_else(|| file_key.map(str::to_owned))
        .ok_or_else(|| {
            anyhow!(
                "No API key configured.\n\
                 Hint: run `skywatch configure`, or set the {ENV_API_KEY} environment variable."
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_first_run_behavior() {
        let cfg = Config::default();

        assert_eq!(cfg.api_key, None);
        assert_eq!(cfg.default_city, "Toronto");
        assert_eq!(cfg.units, Units::Metric);
    }

    #[test]
    fn load_returns_default_when_file_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = Config::load_from(&dir.path().join("config.toml")).expect("load must succeed");

        assert_eq!(cfg.default_city, "Toronto");
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");

        let cfg = Config {
            api_key: Some("KEY".to_owned()),
            default_city: "Kyiv".to_owned(),
            units: Units::Imperial,
        };
        cfg.save_to(&path).expect("save must succeed");

        let loaded = Config::load_from(&path).expect("load must succeed");
        assert_eq!(loaded.api_key.as_deref(), Some("KEY"));
        assert_eq!(loaded.default_city, "Kyiv");
        assert_eq!(loaded.units, Units::Imperial);
    }

    #[test]
    fn env_key_wins_over_file_key() {
        let key = resolve_api_key(Some("ENV_KEY".to_owned()), Some("FILE_KEY"))
            .expect("key must resolve");
        assert_eq!(key, "ENV_KEY");
    }

    #[test]
    fn blank_env_key_falls_back_to_file_key() {
        let key =
            resolve_api_key(Some("  ".to_owned()), Some("FILE_KEY")).expect("key must resolve");
        assert_eq!(key, "FILE_KEY");
    }

    #[test]
    fn missing_key_everywhere_errors_with_hint() {
        let err = resolve_api_key(None, None).unwrap_err();

        assert!(err.to_string().contains("No API key configured"));
        assert!(err.to_string().contains("skywatch configure"));
    }
}

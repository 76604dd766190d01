//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use estimai_client::ClientConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Origin used for share links when a profile sets none
pub const DEFAULT_SHARE_ORIGIN: &str = "http://localhost:8080";

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name
    #[serde(default = "default_profile")]
    pub active_profile: String,

    /// Available profiles
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// File this configuration was loaded from
    #[serde(skip)]
    source: Option<PathBuf>,

    /// Set when `source` exists but could not be read
    #[serde(skip)]
    unreadable: bool,
}

/// Service profile.
///
/// A profile with no `api_url` submits in simulated mode.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    /// Estimation service base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Result storage base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_url: Option<String>,

    /// API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Web origin hosting the results page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_origin: Option<String>,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Profile {
    /// Client settings described by this profile.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            api_url: self.api_url.clone(),
            storage_url: self.storage_url.clone(),
            api_key: self.api_key.clone(),
        }
        .normalized()
    }

    /// Origin for share links.
    pub fn share_origin(&self) -> &str {
        self.share_origin.as_deref().unwrap_or(DEFAULT_SHARE_ORIGIN)
    }
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".estimai").join("config.toml"))
    }

    /// Load configuration from `path` or create default.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = fs::read_to_string(path)?;
            toml::from_str::<Config>(&contents)?
        } else {
            Self::default()
        };
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Default configuration standing in for an unreadable file at `path`.
    ///
    /// Saving it is refused so the broken file is never overwritten.
    pub fn unreadable_at(path: &Path) -> Self {
        Self {
            source: Some(path.to_path_buf()),
            unreadable: true,
            ..Self::default()
        }
    }

    /// Save configuration to the file it was loaded from.
    pub fn save(&self) -> Result<()> {
        let path = match &self.source {
            Some(path) => path.clone(),
            None => Self::path()?,
        };

        if self.unreadable {
            return Err(CliError::NotPermitted(format!(
                "{} could not be read; fix or remove it before changing profiles",
                path.display()
            )));
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, contents)?;
        Ok(())
    }

    /// Get the active profile.
    pub fn get_active_profile(&self) -> Result<&Profile> {
        self.profiles
            .get(&self.active_profile)
            .ok_or_else(|| CliError::Config(format!("Profile '{}' not found", self.active_profile)))
    }

    /// Add or update a profile.
    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Switch to a different profile.
    pub fn switch_profile(&mut self, name: String) -> Result<()> {
        if !self.profiles.contains_key(&name) {
            return Err(CliError::Config(format!("Profile '{}' does not exist", name)));
        }
        self.active_profile = name;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        let mut profiles = HashMap::new();
        profiles.insert("default".to_string(), Profile::default());

        Self {
            active_profile: "default".to_string(),
            profiles,
            settings: Settings::default(),
            source: None,
            unreadable: false,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_profile() -> String {
    "default".to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_simulated() {
        let config = Config::default();
        let profile = config.get_active_profile().unwrap();
        assert!(!profile.client_config().is_remote());
        assert_eq!(profile.share_origin(), DEFAULT_SHARE_ORIGIN);
    }

    #[test]
    fn test_missing_file_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.active_profile, "default");
        assert_eq!(config.settings.format, OutputFormat::Table);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::load_from(&path).unwrap();
        config.set_profile(
            "prod".to_string(),
            Profile {
                api_url: Some("https://api.example.com/".to_string()),
                storage_url: Some("https://bucket.example.com".to_string()),
                api_key: Some("secret".to_string()),
                share_origin: Some("https://estimai.app".to_string()),
            },
        );
        config.switch_profile("prod".to_string()).unwrap();
        config.save().unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.active_profile, "prod");
        let client = reloaded.get_active_profile().unwrap().client_config();
        assert_eq!(client.api_url.as_deref(), Some("https://api.example.com"));
        assert_eq!(client.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_switch_to_unknown_profile_fails() {
        let mut config = Config::default();
        assert!(matches!(config.switch_profile("nope".to_string()), Err(CliError::Config(_))));
        assert_eq!(config.active_profile, "default");
    }

    #[test]
    fn test_unreadable_config_is_never_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "active_profile = [not toml").unwrap();
        assert!(Config::load_from(&path).is_err());

        let mut config = Config::unreadable_at(&path);
        config.set_profile("prod".to_string(), Profile::default());

        assert!(matches!(config.save(), Err(CliError::NotPermitted(_))));
        assert_eq!(fs::read_to_string(&path).unwrap(), "active_profile = [not toml");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[settings]\nformat = \"json\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.settings.format, OutputFormat::Json);
        assert!(config.settings.color);
        assert!(config.profiles.is_empty());
        assert!(config.get_active_profile().is_err());
    }
}

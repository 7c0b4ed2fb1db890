//! Client settings resolved from flags, environment and the config file

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{LudusError, LudusResult};

/// Server URL used when nothing else is configured
pub const DEFAULT_URL: &str = "https://198.51.100.1:8080";

/// Config file name inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.yml";

/// `$HOME/.config/ludus`
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("ludus"))
}

/// `$HOME/.config/ludus/config.yml`
pub fn default_config_path() -> Option<PathBuf> {
    default_config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

/// A partial set of settings; `None` means "not given at this layer"
///
/// Used both for the YAML config file and for command-line/environment
/// overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verify: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verbose: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl SettingsOverrides {
    /// Fill every unset field from `fallback`
    pub fn or(self, fallback: SettingsOverrides) -> SettingsOverrides {
        SettingsOverrides {
            url: non_empty(self.url).or(non_empty(fallback.url)),
            proxy: non_empty(self.proxy).or(non_empty(fallback.proxy)),
            verify: self.verify.or(fallback.verify),
            json: self.json.or(fallback.json),
            verbose: self.verbose.or(fallback.verbose),
            user: non_empty(self.user).or(non_empty(fallback.user)),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Fully resolved client settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub url: String,
    pub proxy: Option<String>,
    pub verify: bool,
    pub json: bool,
    pub verbose: bool,
    /// User ID to act as (admins only)
    pub user: Option<String>,
    /// Config file the settings were read from, if any
    pub config_file: Option<PathBuf>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self::from_overrides(SettingsOverrides::default())
    }
}

impl ClientSettings {
    /// Apply built-in defaults to whatever is still unset
    pub fn from_overrides(overrides: SettingsOverrides) -> Self {
        Self {
            url: overrides.url.unwrap_or_else(|| DEFAULT_URL.to_string()),
            proxy: overrides.proxy,
            verify: overrides.verify.unwrap_or(false),
            json: overrides.json.unwrap_or(false),
            verbose: overrides.verbose.unwrap_or(false),
            user: overrides.user,
            config_file: None,
        }
    }

    /// Resolve settings: `overrides` win over the config file, which wins
    /// over defaults
    ///
    /// With no explicit `config_path` the default location is used, and a
    /// missing file there is not an error.
    pub fn load(config_path: Option<&Path>, overrides: SettingsOverrides) -> LudusResult<Self> {
        let path = match config_path {
            Some(path) => Some(path.to_path_buf()),
            None => default_config_path(),
        };

        let file = match &path {
            Some(path) => load_settings_file(path, config_path.is_some())?,
            None => None,
        };

        let mut settings = match (file, path) {
            (Some(file), Some(path)) => {
                debug!("Using config file: {}", path.display());
                let mut settings = Self::from_overrides(overrides.or(file));
                settings.config_file = Some(path);
                settings
            }
            _ => {
                debug!("No config file found - using defaults");
                Self::from_overrides(overrides)
            }
        };
        settings.url = settings.url.trim().to_string();

        debug!("--- Configuration from cli and read from file ---");
        debug!("\turl = {}", settings.url);
        debug!("\tproxy = {}", settings.proxy.as_deref().unwrap_or(""));
        debug!("\tverify = {}", settings.verify);
        debug!("\tjson = {}", settings.json);
        debug!("\tuser = {}", settings.user.as_deref().unwrap_or(""));
        debug!("---");

        Ok(settings)
    }
}

/// Read a YAML settings file
///
/// Returns `Ok(None)` when the file does not exist, unless `required`.
pub fn load_settings_file(path: &Path, required: bool) -> LudusResult<Option<SettingsOverrides>> {
    if !path.exists() {
        if required {
            return Err(LudusError::config_with_context(
                "Config file not found",
                path.display().to_string(),
            ));
        }
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| LudusError::io_with_path(e.to_string(), path.display().to_string()))?;
    if content.trim().is_empty() {
        return Ok(Some(SettingsOverrides::default()));
    }

    let parsed = serde_yaml::from_str(&content).map_err(|e| {
        LudusError::config_with_context(
            format!("Invalid config file: {e}"),
            path.display().to_string(),
        )
    })?;
    Ok(Some(parsed))
}

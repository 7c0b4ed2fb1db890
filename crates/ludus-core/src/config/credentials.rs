//! API key storage
//!
//! Keys are stored per server URL in a YAML file readable only by the
//! current user. The `LUDUS_API_KEY` environment variable takes precedence.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::settings::default_config_dir;
use crate::error::{LudusError, LudusResult};
use crate::rest::redact_api_key;

/// Environment variable checked before the credentials file
pub const API_KEY_ENV: &str = "LUDUS_API_KEY";

pub const CREDENTIALS_FILE_NAME: &str = "credentials.yml";

/// `$HOME/.config/ludus/credentials.yml`
pub fn default_credentials_path() -> Option<PathBuf> {
    default_config_dir().map(|dir| dir.join(CREDENTIALS_FILE_NAME))
}

/// API keys indexed by server URL
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialsFile {
    #[serde(default)]
    pub api_keys: BTreeMap<String, String>,
}

impl CredentialsFile {
    /// Load credentials; a missing file yields an empty set
    pub fn load(path: &Path) -> LudusResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| LudusError::io_with_path(e.to_string(), path.display().to_string()))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content).map_err(|e| {
            LudusError::config_with_context(
                format!("Invalid credentials file: {e}"),
                path.display().to_string(),
            )
        })
    }

    /// Save credentials, creating parent directories as needed
    pub fn save(&self, path: &Path) -> LudusResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)
            .map_err(|e| LudusError::io_with_path(e.to_string(), path.display().to_string()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }

    pub fn get_api_key(&self, url: &str) -> Option<&str> {
        self.api_keys.get(url).map(|s| s.as_str())
    }

    pub fn set_api_key(&mut self, url: impl Into<String>, key: impl Into<String>) {
        self.api_keys.insert(url.into(), key.into());
    }
}

/// Pick the API key for `url`: the environment value if non-empty, else
/// the stored key
pub fn resolve_api_key(
    env_value: Option<String>,
    credentials: &CredentialsFile,
    url: &str,
) -> Option<String> {
    let key = env_value
        .filter(|k| !k.is_empty())
        .or_else(|| credentials.get_api_key(url).map(str::to_string));

    match &key {
        Some(key) => debug!("Got API key: {}", redact_api_key(key)),
        None => debug!("No API key loaded for {}", url),
    }
    key
}

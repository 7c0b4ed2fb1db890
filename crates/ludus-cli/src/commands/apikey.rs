//! `ludus apikey`

use ludus_core::config::{API_KEY_ENV, CredentialsFile, default_credentials_path};
use ludus_core::rest::redact_api_key;
use ludus_core::{LudusError, LudusResult};
use std::path::Path;
use tracing::info;

use super::Session;
use crate::console;

/// Prompt for an API key and store it for the session's URL
pub async fn execute(session: &Session) -> LudusResult<()> {
    let path = default_credentials_path()
        .ok_or_else(|| LudusError::config("Could not determine the home directory"))?;

    let key = console::read_secret(&format!(
        "Enter your Ludus API Key for {}",
        session.settings.url
    ))?;
    store_api_key(&path, &session.settings.url, key.trim())?;

    info!("Ludus API key set successfully");
    Ok(())
}

/// Save `key` for `url` in the credentials file at `path`
pub fn store_api_key(path: &Path, url: &str, key: &str) -> LudusResult<()> {
    if key.is_empty() {
        return Err(LudusError::config("No API key entered"));
    }

    let mut credentials = CredentialsFile::load(path)?;
    credentials.set_api_key(url, key);
    credentials.save(path).map_err(|e| {
        LudusError::config(format!(
            "Failed to store the API key.\nYou can set the {API_KEY_ENV} env variable if you are on a headless system.\n\n{e}"
        ))
    })?;

    tracing::debug!("Stored API key {} for {}", redact_api_key(key), url);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_store_api_key_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.yml");

        store_api_key(&path, "https://10.0.0.1:8080", "JD.secret").unwrap();
        store_api_key(&path, "https://10.0.0.2:8080", "BOB.other").unwrap();

        let creds = CredentialsFile::load(&path).unwrap();
        assert_eq!(creds.get_api_key("https://10.0.0.1:8080"), Some("JD.secret"));
        assert_eq!(creds.get_api_key("https://10.0.0.2:8080"), Some("BOB.other"));
    }

    #[test]
    fn test_empty_key_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.yml");
        assert!(store_api_key(&path, "https://x", "").is_err());
        assert!(!path.exists());
    }
}

//! CLI commands

pub mod apikey;
pub mod power;
pub mod range;
pub mod users;
pub mod version;

use ludus_core::config::{API_KEY_ENV, CredentialsFile, default_credentials_path, resolve_api_key};
use ludus_core::{CLIENT_VERSION, ClientOptions, ClientSettings, LudusError, LudusResult, RestClient};

/// Resolved settings plus the API key, shared by every command
#[derive(Debug, Clone)]
pub struct Session {
    pub settings: ClientSettings,
    pub api_key: Option<String>,
}

impl Session {
    /// Resolve the API key for `settings.url` from the environment or the
    /// credentials file
    pub fn resolve(settings: ClientSettings) -> LudusResult<Self> {
        let credentials = match default_credentials_path() {
            Some(path) => CredentialsFile::load(&path)?,
            None => CredentialsFile::default(),
        };
        let api_key = resolve_api_key(std::env::var(API_KEY_ENV).ok(), &credentials, &settings.url);
        Ok(Self { settings, api_key })
    }

    /// Build a REST client, failing with a hint when no key is available
    pub fn client(&self) -> LudusResult<RestClient> {
        let api_key = self.api_key.clone().ok_or_else(|| {
            LudusError::config(format!(
                "No Ludus API key found for {}.\nSet one using the `apikey` command.\n\
                 You can also set the {} env variable if you are on a headless system.",
                self.settings.url, API_KEY_ENV
            ))
        })?;

        let options = ClientOptions::new(self.settings.url.clone(), api_key)
            .with_proxy(self.settings.proxy.clone())
            .with_verify(self.settings.verify)
            .with_version(CLIENT_VERSION);
        RestClient::new(options)
    }

    pub fn json(&self) -> bool {
        self.settings.json
    }

    /// Append `userID=<id>` for the impersonated user, if any
    pub fn scoped(&self, path: &str) -> String {
        scoped_path(path, self.settings.user.as_deref())
    }
}

/// Add a `userID` query parameter to `path` when `user` is set
pub fn scoped_path(path: &str, user: Option<&str>) -> String {
    match user.filter(|u| !u.is_empty()) {
        Some(user) => {
            let separator = if path.contains('?') { '&' } else { '?' };
            format!("{path}{separator}userID={user}")
        }
        None => path.to_string(),
    }
}

#[cfg(test)]
pub(crate) fn test_session(url: &str, user: Option<&str>) -> Session {
    let overrides = ludus_core::SettingsOverrides {
        url: Some(url.to_string()),
        user: user.map(str::to_string),
        ..Default::default()
    };
    Session {
        settings: ClientSettings::from_overrides(overrides),
        api_key: Some("JD.secret".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoped_path() {
        assert_eq!(scoped_path("/range", None), "/range");
        assert_eq!(scoped_path("/range", Some("")), "/range");
        assert_eq!(scoped_path("/range", Some("ALICE")), "/range?userID=ALICE");
        assert_eq!(
            scoped_path("/range/logs?tail=10", Some("ALICE")),
            "/range/logs?tail=10&userID=ALICE"
        );
    }

    #[test]
    fn test_client_requires_api_key() {
        let session = Session {
            settings: ClientSettings::default(),
            api_key: None,
        };
        let err = session.client().unwrap_err();
        assert!(err.to_string().contains("apikey"));
    }

    #[test]
    fn test_client_builds_with_key() {
        let session = Session {
            settings: ClientSettings::default(),
            api_key: Some("JD.secret".to_string()),
        };
        assert_eq!(session.client().unwrap().user(), "JD");
    }
}

//! Configuration for the Ludus client

mod credentials;
mod settings;

pub use credentials::{
    API_KEY_ENV, CREDENTIALS_FILE_NAME, CredentialsFile, default_credentials_path,
    resolve_api_key,
};
pub use settings::{
    CONFIG_FILE_NAME, ClientSettings, DEFAULT_URL, SettingsOverrides, default_config_dir,
    default_config_path, load_settings_file,
};

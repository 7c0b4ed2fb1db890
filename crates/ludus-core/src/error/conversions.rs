//! Conversions from foreign error types

use super::types::LudusError;

impl From<reqwest::Error> for LudusError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport {
            message: err.to_string(),
            url: err.url().map(|u| u.to_string()),
        }
    }
}

impl From<std::io::Error> for LudusError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

impl From<serde_json::Error> for LudusError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(err.to_string())
    }
}

impl From<serde_yaml::Error> for LudusError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::parse(err.to_string())
    }
}

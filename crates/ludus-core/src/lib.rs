//! Ludus Client Core Library
//!
//! This crate provides the pieces every Ludus client command is built on:
//! the REST client with its status classification, the waiting spinner,
//! settings and credential loading, and logging setup.

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod rest;

// Re-export commonly used types
pub use config::{ClientSettings, CredentialsFile, SettingsOverrides};
pub use error::{LudusError, LudusResult};
pub use rest::{ClientOptions, ErrorBody, RestClient};

/// Version string sent in the user agent and printed by `ludus version`
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

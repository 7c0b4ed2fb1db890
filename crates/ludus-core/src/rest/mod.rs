//! REST access to the Ludus server

mod classify;
mod client;
mod redact;
mod spinner;

pub use classify::{ErrorBody, HTTPS_MISMATCH_BODY, HTTPS_MISMATCH_HINT, classify};
pub use client::{API_KEY_HEADER, ClientOptions, RestClient};
pub use redact::{KEY_NOT_SET, REDACTED_SUFFIX, redact_api_key, user_from_api_key};
pub use spinner::{WAITING_MESSAGE, WaitSpinner};

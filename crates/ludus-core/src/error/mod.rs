//! Error types for the Ludus client
//!
//! Every failure a REST call can produce is a `LudusError` variant; callers
//! decide whether it is fatal.

mod constructors;
mod conversions;
mod types;

pub use types::{LudusError, LudusResult};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_message_names_user() {
        let err = LudusError::Unauthorized {
            user: "JD".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "User JD is not authorized for this action! Check your API key."
        );
        assert!(err.is_auth_error());
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_unparseable_error_adds_hint() {
        let err = LudusError::UnparseableError {
            status: 404,
            body: "404 page not found".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("404 page not found\n"));
        assert!(msg.contains("Check the IP/hostname and port"));
    }

    #[test]
    fn test_error_codes_and_context() {
        let err = LudusError::config_with_context("No API key", "url=https://x");
        assert_eq!(err.error_code(), "LUDUS_CONFIG");
        assert_eq!(err.context(), Some("url=https://x"));
        assert_eq!(err.status(), None);

        let err = LudusError::io_with_path("denied", "/tmp/out.zip");
        assert_eq!(err.context(), Some("/tmp/out.zip"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: LudusError = io.into();
        assert_eq!(err.error_code(), "LUDUS_IO");
    }
}

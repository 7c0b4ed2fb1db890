//! Core error types for the Ludus client

use thiserror::Error;

/// Result type alias for Ludus client operations
pub type LudusResult<T> = Result<T, LudusError>;

/// Main error type for the Ludus client
///
/// The REST variants mirror the status buckets the server uses; the
/// remaining variants cover configuration and local I/O.
#[derive(Error, Debug, Clone)]
pub enum LudusError {
    /// The request never produced an HTTP response
    #[error("{message}")]
    Transport {
        message: String,
        url: Option<String>,
    },

    /// 401 from the server
    #[error("User {user} is not authorized for this action! Check your API key.")]
    Unauthorized { user: String },

    /// 400 from the server
    #[error("Bad Request: {message}")]
    BadRequest { message: String },

    /// 403, 404 or 409 from the server
    #[error("{message}")]
    Api { status: u16, message: String },

    /// 500 from the server
    #[error("Error from server! {message}")]
    Server { message: String },

    /// Error status whose body was not the expected JSON error payload
    #[error(
        "{body}\nCheck the IP/hostname and port in the URL provided to ludus to ensure it is correct."
    )]
    UnparseableError { status: u16, body: String },

    /// Any status the client has no handling for
    #[error("Received non-200 status code: {status}")]
    UnexpectedStatus { status: u16 },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        context: Option<String>,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },

    /// JSON or YAML (de)serialization errors
    #[error("Parse error: {message}")]
    Parse { message: String },
}

impl LudusError {
    /// Stable code for programmatic error handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "LUDUS_TRANSPORT",
            Self::Unauthorized { .. } => "LUDUS_UNAUTHORIZED",
            Self::BadRequest { .. } => "LUDUS_BAD_REQUEST",
            Self::Api { .. } => "LUDUS_API",
            Self::Server { .. } => "LUDUS_SERVER",
            Self::UnparseableError { .. } => "LUDUS_UNPARSEABLE_ERROR",
            Self::UnexpectedStatus { .. } => "LUDUS_UNEXPECTED_STATUS",
            Self::Config { .. } => "LUDUS_CONFIG",
            Self::Io { .. } => "LUDUS_IO",
            Self::Parse { .. } => "LUDUS_PARSE",
        }
    }

    /// HTTP status carried by the error, if it came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::BadRequest { .. } => Some(400),
            Self::Api { status, .. } => Some(*status),
            Self::Server { .. } => Some(500),
            Self::UnparseableError { status, .. } => Some(*status),
            Self::UnexpectedStatus { status } => Some(*status),
            _ => None,
        }
    }

    /// Whether the server rejected the API key
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Additional context attached to the error, if any
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::Config { context, .. } => context.as_deref(),
            Self::Transport { url, .. } => url.as_deref(),
            Self::Io { path, .. } => path.as_deref(),
            _ => None,
        }
    }
}

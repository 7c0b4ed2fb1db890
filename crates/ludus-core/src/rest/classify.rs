//! Status code classification for server responses

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LudusError, LudusResult};

/// Body Go's TLS listener sends back when it receives plain HTTP
pub const HTTPS_MISMATCH_BODY: &str = "Client sent an HTTP request to an HTTPS server.";

/// Message shown instead of [`HTTPS_MISMATCH_BODY`]
pub const HTTPS_MISMATCH_HINT: &str =
    "Your Ludus server is using HTTPS. Make sure your URL includes 'https://'";

/// Error payload returned by the server: `{"error": "<message>"}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: String,
}

/// Pull a human-readable message out of an error response body
fn error_message(status: u16, body: &[u8]) -> LudusResult<String> {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();

    if text == HTTPS_MISMATCH_BODY {
        return Ok(HTTPS_MISMATCH_HINT.to_string());
    }

    serde_json::from_str::<ErrorBody>(text)
        .map(|parsed| parsed.error)
        .map_err(|_| LudusError::UnparseableError {
            status,
            body: text.to_string(),
        })
}

/// Turn a status code and body into either the body bytes or an error
///
/// `user` names the API key owner in authorization failures.
pub fn classify(status: u16, body: Vec<u8>, user: &str) -> LudusResult<Vec<u8>> {
    debug!(status, bytes = body.len(), "Classifying response");

    match status {
        200 | 201 => Ok(body),
        202..=299 => Ok(Vec::new()),
        401 => Err(LudusError::Unauthorized {
            user: user.to_string(),
        }),
        400 => {
            let message = error_message(status, &body)?;
            Err(LudusError::BadRequest { message })
        }
        403 | 404 | 409 => {
            let message = error_message(status, &body)?;
            Err(LudusError::Api { status, message })
        }
        500 => {
            let message = error_message(status, &body)?;
            Err(LudusError::Server { message })
        }
        _ => Err(LudusError::UnexpectedStatus { status }),
    }
}

// ── Core error types ──
//
// Errors the booking pipeline surfaces to its front-ends. Consumers see
// domain-level variants; raw reqwest and serde failures are translated
// by the `From<jetquote_api::Error>` impl below.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach the booking API at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Booking API request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── API errors ───────────────────────────────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if the server answered at all).
        status: Option<u16>,
    },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Airport dataset error: {message}")]
    Dataset { message: String },

    #[error("Airport not found: {identifier}")]
    AirportNotFound { identifier: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<jetquote_api::Error> for CoreError {
    fn from(err: jetquote_api::Error) -> Self {
        match err {
            jetquote_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            jetquote_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            jetquote_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            jetquote_api::Error::Api { status, message } => CoreError::Api {
                message: message.unwrap_or_else(|| format!("HTTP {status}")),
                status: Some(status),
            },
            jetquote_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_keeps_server_message_and_status() {
        let err = CoreError::from(jetquote_api::Error::Api {
            status: 422,
            message: Some("Unknown airport".into()),
        });
        match err {
            CoreError::Api { message, status } => {
                assert_eq!(message, "Unknown airport");
                assert_eq!(status, Some(422));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn api_error_without_message_names_status() {
        let err = CoreError::from(jetquote_api::Error::Api {
            status: 502,
            message: None,
        });
        assert_eq!(err.to_string(), "API error: HTTP 502");
    }
}

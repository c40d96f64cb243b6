// ── Core error types ──
//
// User-facing errors from rentley-core. These are NOT API-specific --
// consumers never see HTTP status codes or JSON parse failures directly.
// The `From<rentley_api::Error>` impl translates transport-layer errors
// into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Session / auth ───────────────────────────────────────────────
    #[error("Not logged in -- authentication required")]
    AuthenticationRequired,

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Session expired -- please log in again")]
    SessionExpired,

    // ── Access control ───────────────────────────────────────────────
    #[error("Access denied: role '{role}' is not permitted here")]
    AccessDenied { role: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Vehicle not found: {identifier}")]
    VehicleNotFound { identifier: String },

    #[error("Rental not found: {identifier}")]
    RentalNotFound { identifier: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("Operation rejected: {message}")]
    Rejected { message: String },

    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach the rental service at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    Timeout,

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<rentley_api::Error> for CoreError {
    fn from(err: rentley_api::Error) -> Self {
        match err {
            rentley_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            rentley_api::Error::SessionExpired => CoreError::SessionExpired,
            rentley_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(|u| u.to_string())
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            rentley_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            rentley_api::Error::Api { message, status } => CoreError::Api {
                message,
                status: Some(status),
            },
            rentley_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

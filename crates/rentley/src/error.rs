//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable
//! help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use rentley_core::CoreError;

/// Exit codes per the CLI contract.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the rental service at {url}")]
    #[diagnostic(
        code(rentley::connection_failed),
        help(
            "Check that the server is running and the URL is correct.\n\
             URL: {url}\n\
             Try: rentley vehicles list --server <url>"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Not logged in")]
    #[diagnostic(
        code(rentley::not_logged_in),
        help("Log in first: rentley login")
    )]
    NotLoggedIn,

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(rentley::auth_failed),
        help("Verify your username and password, then retry: rentley login")
    )]
    AuthFailed { message: String },

    #[error("Session expired")]
    #[diagnostic(
        code(rentley::session_expired),
        help("The stored token was rejected and has been cleared. Log in again: rentley login")
    )]
    SessionExpired,

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(rentley::no_credentials),
        help(
            "Configure credentials with: rentley config init\n\
             Or set the RENTLEY_PASSWORD environment variable."
        )
    )]
    NoCredentials { profile: String },

    // ── Access control ───────────────────────────────────────────────

    #[error("Access denied: this command requires one of: {required}")]
    #[diagnostic(
        code(rentley::access_denied),
        help("Your account's role is '{role}'. Ask an administrator if you need access.")
    )]
    AccessDenied { role: String, required: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(rentley::not_found),
        help("Run: rentley {list_command} to see available entries")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Booking ──────────────────────────────────────────────────────

    #[error("Booking failed: {reason}")]
    #[diagnostic(
        code(rentley::booking_failed),
        help("The draft is unchanged -- adjust the dates or vehicle and retry.")
    )]
    BookingFailed { reason: String },

    // ── API ──────────────────────────────────────────────────────────

    #[error("API error: {message}")]
    #[diagnostic(code(rentley::api_error))]
    ApiError { message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(rentley::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(rentley::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: rentley config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No server configured")]
    #[diagnostic(
        code(rentley::no_config),
        help(
            "Create a config with: rentley config init\n\
             Or pass --server <url>. Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(rentley::config))]
    Config(Box<figment::Error>),

    // ── Timeout ──────────────────────────────────────────────────────

    #[error("Request timed out")]
    #[diagnostic(
        code(rentley::timeout),
        help("Increase the timeout with --timeout or check server responsiveness.")
    )]
    Timeout,

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(rentley::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::NotLoggedIn
            | Self::AuthFailed { .. }
            | Self::SessionExpired
            | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::AccessDenied { .. } => exit_code::PERMISSION,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::BookingFailed { .. } => exit_code::CONFLICT,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::AuthenticationRequired => CliError::NotLoggedIn,

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::SessionExpired => CliError::SessionExpired,

            CoreError::AccessDenied { role } => CliError::AccessDenied {
                role,
                required: "a back-office role".into(),
            },

            CoreError::VehicleNotFound { identifier } => CliError::NotFound {
                resource_type: "vehicle".into(),
                identifier,
                list_command: "vehicles list".into(),
            },

            CoreError::RentalNotFound { identifier } => CliError::NotFound {
                resource_type: "rental".into(),
                identifier,
                list_command: "rentals list".into(),
            },

            CoreError::ValidationFailed { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::Rejected { message } => CliError::ApiError { message },

            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::Timeout => CliError::Timeout,

            CoreError::Api { message, status } => match status {
                Some(404) => CliError::NotFound {
                    resource_type: "resource".into(),
                    identifier: String::new(),
                    list_command: "vehicles list".into(),
                },
                Some(403) => CliError::AccessDenied {
                    role: "current".into(),
                    required: "a permitted role".into(),
                },
                _ => CliError::ApiError { message },
            },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },

            CoreError::Internal(message) => CliError::ApiError { message },
        }
    }
}

impl From<rentley_api::Error> for CliError {
    fn from(err: rentley_api::Error) -> Self {
        CoreError::from(err).into()
    }
}

impl From<rentley_config::ConfigError> for CliError {
    fn from(err: rentley_config::ConfigError) -> Self {
        match err {
            rentley_config::ConfigError::NoCredentials { profile } => {
                CliError::NoCredentials { profile }
            }
            rentley_config::ConfigError::Validation { field, reason } => {
                CliError::Validation { field, reason }
            }
            rentley_config::ConfigError::Figment(e) => CliError::Config(e),
            rentley_config::ConfigError::Serialization(e) => CliError::Validation {
                field: "config".into(),
                reason: e.to_string(),
            },
            rentley_config::ConfigError::Io(e) => CliError::Io(e),
        }
    }
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

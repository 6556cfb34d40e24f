//! CLI error types with miette diagnostics.
//!
//! Maps core, config and submission failures into user-facing errors with
//! actionable help text and stable exit codes.

use jetquote_config::ConfigError;
use jetquote_core::{CoreError, StagingError, SubmitError, UnauthorizedReason, ValidationErrors};
use miette::Diagnostic;
use thiserror::Error;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const REDIRECT: i32 = 9;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the booking API at {url}")]
    #[diagnostic(
        code(jetquote::connection_failed),
        help(
            "Check the API URL and your network connection.\n\
             URL: {url}\n\
             Override with --api-url or edit the profile: jetquote config show"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(jetquote::timeout),
        help("Increase the timeout with --timeout or try again later.")
    )]
    Timeout { seconds: u64 },

    // ── Booking flow ─────────────────────────────────────────────────
    #[error("The booking form is incomplete or invalid")]
    #[diagnostic(code(jetquote::invalid_booking), help("{errors}"))]
    InvalidBooking { errors: ValidationErrors },

    #[error("The contact details are incomplete or invalid")]
    #[diagnostic(code(jetquote::invalid_details), help("{errors}"))]
    InvalidDetails { errors: ValidationErrors },

    #[error("No valid booking in progress ({reason}); returning home")]
    #[diagnostic(
        code(jetquote::redirect_home),
        help(
            "Bookings expire and are discarded when they are missing, damaged or stale.\n\
             Start a new one with: jetquote book one-way --help"
        )
    )]
    Redirected { reason: UnauthorizedReason },

    #[error("{message}")]
    #[diagnostic(
        code(jetquote::submission_failed),
        help("Your booking is still staged. Run `jetquote submit` again to retry.")
    )]
    SubmissionFailed { message: String, status: Option<u16> },

    #[error("Could not access the staged booking")]
    #[diagnostic(
        code(jetquote::state),
        help("Check that the state directory is writable, or pass --state-dir.")
    )]
    State(#[from] StagingError),

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(jetquote::not_found),
        help("Run: jetquote {list_command} to see matching {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("Airport dataset could not be loaded: {message}")]
    #[diagnostic(
        code(jetquote::dataset),
        help("Check the `airports` / `search_airports` paths under [booking] in your config.")
    )]
    Dataset { message: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error: {message}")]
    #[diagnostic(code(jetquote::api_error))]
    ApiError { message: String, status: Option<u16> },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(jetquote::validation))]
    Validation { field: String, reason: String },

    #[error("A value for {field} is required")]
    #[diagnostic(
        code(jetquote::input_required),
        help("Pass it as a flag, or run without --no-input to be prompted.")
    )]
    InputRequired { field: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(jetquote::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: jetquote config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No booking API configured")]
    #[diagnostic(
        code(jetquote::no_config),
        help(
            "Create a profile with: jetquote config init\n\
             Or pass --api-url (JETQUOTE_API_URL).\n\
             Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(jetquote::config))]
    Config(ConfigError),

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Redirected { .. } => exit_code::REDIRECT,
            Self::InvalidBooking { .. }
            | Self::InvalidDetails { .. }
            | Self::Validation { .. }
            | Self::InputRequired { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── Conversions ──────────────────────────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::ProfileNotFound { name } => CliError::ProfileNotFound {
                name,
                available: String::new(),
            },
            other => CliError::Config(other),
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },

            CoreError::Api { message, status } => CliError::ApiError { message, status },

            CoreError::Dataset { message } => CliError::Dataset { message },

            CoreError::AirportNotFound { identifier } => CliError::NotFound {
                resource_type: "airport".into(),
                list_command: format!("airports search {identifier}"),
                identifier,
            },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },

            CoreError::Io(e) => CliError::Io(e),

            CoreError::Internal(message) => CliError::ApiError {
                message,
                status: None,
            },
        }
    }
}

impl From<SubmitError> for CliError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Gate(reason) => CliError::Redirected { reason },
            SubmitError::Validation(errors) => CliError::InvalidDetails { errors },
            SubmitError::Transform(e) => CliError::Validation {
                field: "airports".into(),
                reason: e.to_string(),
            },
            SubmitError::Api {
                message,
                status,
                source,
            } => {
                if source.is_connection() || source.is_timeout() {
                    CliError::from(CoreError::from(source))
                } else {
                    CliError::SubmissionFailed { message, status }
                }
            }
            SubmitError::Staging(e) => CliError::State(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_the_table() {
        let redirect = CliError::Redirected {
            reason: UnauthorizedReason::Expired,
        };
        assert_eq!(redirect.exit_code(), exit_code::REDIRECT);

        let invalid = CliError::InvalidBooking {
            errors: ValidationErrors::single("x"),
        };
        assert_eq!(invalid.exit_code(), exit_code::USAGE);

        let failed = CliError::SubmissionFailed {
            message: "nope".into(),
            status: Some(500),
        };
        assert_eq!(failed.exit_code(), exit_code::GENERAL);
    }

    #[test]
    fn gate_failure_becomes_redirect() {
        let err = CliError::from(SubmitError::Gate(UnauthorizedReason::Missing));
        assert!(matches!(err, CliError::Redirected { .. }));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn missing_airport_maps_to_not_found() {
        let err = CliError::from(CoreError::AirportNotFound {
            identifier: "ZZZ".into(),
        });
        assert_eq!(err.exit_code(), exit_code::NOT_FOUND);
    }
}

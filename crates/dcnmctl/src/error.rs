//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a process exit code.

use miette::Diagnostic;
use thiserror::Error;

use dcnm_config::ConfigError;
use dcnm_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const UNSUPPORTED: i32 = 5;
    pub const CONNECTION: i32 = 7;
    pub const CONFIG: i32 = 9;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to controller at {url}")]
    #[diagnostic(
        code(dcnmctl::connection_failed),
        help(
            "Check that the controller is reachable and DCNM_HOST is correct.\n\
             Self-signed certificates are accepted unless --secure is given."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(dcnmctl::auth_failed),
        help("Verify DCNM_USER / DCNM_PASS in the connection file or environment.")
    )]
    AuthFailed { message: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error(transparent)]
    #[diagnostic(
        code(dcnmctl::config),
        help(
            "Provide a connection file with --conn (default: server.json) or set\n\
             DCNM_HOST, DCNM_USER and DCNM_PASS in the environment."
        )
    )]
    Config(ConfigError),

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(code(dcnmctl::not_found), help("{hint}"))]
    NotFound {
        resource_type: String,
        identifier: String,
        hint: String,
    },

    /// None of the selected switches are awaiting POAP.
    #[error("No switches found")]
    #[diagnostic(
        code(dcnmctl::no_switches),
        help("None of the selected switches are awaiting POAP in fabric '{fabric}'.")
    )]
    NoSwitches { fabric: String },

    // ── API ──────────────────────────────────────────────────────────

    #[error("API error: {message}")]
    #[diagnostic(code(dcnmctl::api_error))]
    ApiError { message: String },

    #[error("Unexpected controller response: {message}")]
    #[diagnostic(
        code(dcnmctl::protocol),
        help("The controller answered in a shape this tool does not recognise. Check --dcnm-version.")
    )]
    Protocol { message: String },

    // ── Unsupported ──────────────────────────────────────────────────

    #[error("Operation '{operation}' is not supported by this controller")]
    #[diagnostic(code(dcnmctl::unsupported), help("This command requires {required}."))]
    Unsupported { operation: String, required: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(dcnmctl::validation))]
    Validation { field: String, reason: String },

    // ── IO ───────────────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::Config(_) => exit_code::CONFIG,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Unsupported { .. } => exit_code::UNSUPPORTED,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::FabricNotFound { fabric } => CliError::NotFound {
                resource_type: "fabric".into(),
                identifier: fabric,
                hint: "The fabric has no entry in the switch data file (--swdata).".into(),
            },
            ConfigError::Validation { field, reason } => CliError::Validation {
                field: field.into(),
                reason,
            },
            other => CliError::Config(other),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed { url, reason },

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::ProtocolMismatch { message } => CliError::Protocol { message },

            CoreError::Unsupported {
                operation,
                required,
            } => CliError::Unsupported {
                operation,
                required,
            },

            CoreError::NoPoapSwitches { fabric } => CliError::NoSwitches { fabric },

            CoreError::Api {
                message,
                status: Some(404),
            } => CliError::NotFound {
                resource_type: "resource".into(),
                identifier: message,
                hint: "Run: dcnmctl fabric list to see available fabrics".into(),
            },

            CoreError::Api { message, .. } | CoreError::Internal(message) => {
                CliError::ApiError { message }
            }
        }
    }
}

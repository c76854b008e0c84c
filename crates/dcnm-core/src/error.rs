// ── Core error types ──
//
// Failures surfaced to the CLI. The `From<dcnm_api::Error>` impl sorts
// transport-layer errors into domain classes; the HTTP status and the
// controller's message are carried through untouched.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to controller at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    // ── Protocol errors ──────────────────────────────────────────────
    #[error("Unexpected controller response: {message}")]
    ProtocolMismatch { message: String },

    #[error("Operation not supported: {operation} (requires {required})")]
    Unsupported { operation: String, required: String },

    // ── Domain errors ────────────────────────────────────────────────
    /// None of the requested serial numbers are awaiting POAP in the fabric.
    #[error("No switches awaiting POAP in fabric '{fabric}' match the switch data")]
    NoPoapSwitches { fabric: String },

    // ── API errors ───────────────────────────────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// HTTP status carried by an API error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => *status,
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<dcnm_api::Error> for CoreError {
    fn from(err: dcnm_api::Error) -> Self {
        use dcnm_api::Error as E;

        if err.is_auth_failure() {
            return Self::AuthenticationFailed {
                message: err.to_string(),
            };
        }

        match err {
            E::Transport(ref e) if e.is_connect() || e.is_timeout() => Self::ConnectionFailed {
                url: e.url().map(ToString::to_string).unwrap_or_default(),
                reason: e.to_string(),
            },
            E::Tls(reason) => Self::ConnectionFailed {
                url: String::new(),
                reason,
            },
            E::ProtocolMismatch { .. } | E::Deserialization { .. } => Self::ProtocolMismatch {
                message: err.to_string(),
            },
            E::UnsupportedDialect { version } => Self::Unsupported {
                operation: format!("controller version {version}"),
                required: "DCNM 11.x or NDFC 12.x".into(),
            },
            E::UnsupportedOperation { operation, dialect } => Self::Unsupported {
                operation: format!("{operation} on {dialect}"),
                required: "NDFC 12.x".into(),
            },
            E::NotResolved | E::InvalidUrl(_) => Self::Internal(err.to_string()),
            other => Self::Api {
                status: other.status(),
                message: other.to_string(),
            },
        }
    }
}

use thiserror::Error;

use crate::dialect::Dialect;

/// Top-level error type for the `dcnm-api` crate.
///
/// Every variant is a distinct failure class so callers (the action
/// layer and the CLI) can map each one to its own message and exit code.
/// Nothing here is retried.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Logon rejected by the controller (non-2xx on the logon endpoint).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Protocol ────────────────────────────────────────────────────
    /// A field the dialect requires was absent from a decoded response
    /// (`Dcnm-Version`, `Dcnm-Token`, `jwttoken`, `serialNumber`).
    #[error("Controller response is missing '{field}' (keys present: {keys:?})")]
    ProtocolMismatch { field: String, keys: Vec<String> },

    /// The controller reported a version no known dialect handles.
    #[error("Unsupported controller version '{version}'")]
    UnsupportedDialect { version: String },

    /// The endpoint does not exist in the resolved dialect.
    #[error("{operation} is not supported by {dialect}")]
    UnsupportedOperation {
        operation: &'static str,
        dialect: Dialect,
    },

    /// A call needed the resolved dialect before resolution happened.
    #[error("Controller dialect has not been resolved")]
    NotResolved,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or HTTP client construction failure.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Non-2xx response on an API call, passed through unmodified.
    #[error("HTTP {status} from {url}: {body}")]
    Http {
        status: u16,
        url: String,
        body: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the controller rejected the credentials or never
    /// issued a token.
    pub fn is_auth_failure(&self) -> bool {
        match self {
            Self::Authentication { .. } => true,
            Self::ProtocolMismatch { field, .. } => {
                field == crate::dialect::dcnm::TOKEN_FIELD
                    || field == crate::dialect::ndfc::TOKEN_FIELD
            }
            Self::Http { status, .. } => *status == 401 || *status == 403,
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Http { status: 404, .. } => true,
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            _ => false,
        }
    }

    /// Returns `true` if the controller could not be reached at all.
    pub fn is_connection_failure(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_connect() || e.is_timeout(),
            Self::Tls(_) => true,
            _ => false,
        }
    }

    /// HTTP status code carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Build a `ProtocolMismatch` listing the keys the response did carry.
    pub(crate) fn missing_field(field: &str, body: &serde_json::Value) -> Self {
        let keys = body
            .as_object()
            .map(|obj| obj.keys().cloned().collect())
            .unwrap_or_default();
        Self::ProtocolMismatch {
            field: field.to_owned(),
            keys,
        }
    }
}

/// First 200 characters of a response body, for error messages.
pub(crate) fn preview(body: &str) -> &str {
    match body.char_indices().nth(200) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

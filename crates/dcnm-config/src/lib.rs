//! Connection parameters and switch data for the dcnm-lan-fabric tools.
//!
//! Connection parameters come from a JSON connection file when one exists,
//! otherwise from the process environment; command-line overrides are
//! layered on top. Switch data is a JSON object mapping fabric names to
//! lists of switch records.

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized},
};
use indexmap::IndexMap;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use dcnm_core::{SessionConfig, SwitchRecord};

pub const HOST_KEY: &str = "DCNM_HOST";
pub const USER_KEY: &str = "DCNM_USER";
pub const PASS_KEY: &str = "DCNM_PASS";
pub const VERIFY_KEY: &str = "DCNM_VERIFY";
pub const VERSION_KEY: &str = "DCNM_VERSION";

const KEYS: [&str; 5] = [HOST_KEY, USER_KEY, PASS_KEY, VERIFY_KEY, VERSION_KEY];

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("connection data {field} missing")]
    MissingField { field: &'static str },

    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("switch file {} missing", path.display())]
    SwitchFileMissing { path: PathBuf },

    #[error("fabric {fabric} missing from switch data")]
    FabricNotFound { fabric: String },

    #[error("malformed switch data in {}: {source}", path.display())]
    SwitchData {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Connection parameters ───────────────────────────────────────────

/// Where the connection parameters were read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Environment,
}

/// Resolved controller connection parameters.
#[derive(Debug)]
pub struct Connection {
    pub host: String,
    pub username: String,
    pub password: SecretString,
    /// `DCNM_VERIFY`, when given.
    pub verify: Option<bool>,
    /// `DCNM_VERSION`: skips or seeds version discovery.
    pub version: Option<String>,
    pub source: Source,
}

impl Connection {
    /// Session parameters for this connection.
    ///
    /// TLS verification is on when either `secure` or `DCNM_VERIFY` asks
    /// for it.
    pub fn session_config(&self, secure: bool, timeout: Duration) -> SessionConfig {
        let mut config = SessionConfig::new(&self.host, &self.username, self.password.clone())
            .with_tls_verify(secure || self.verify.unwrap_or(false))
            .with_timeout(timeout);
        if let Some(ref version) = self.version {
            config = config.with_version_hint(version);
        }
        config
    }
}

/// Values that take precedence over the connection file and environment.
#[derive(Debug, Default, Serialize)]
pub struct Overrides {
    #[serde(rename = "DCNM_HOST", skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(rename = "DCNM_USER", skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(rename = "DCNM_PASS", skip_serializing_if = "Option::is_none")]
    pub pass: Option<String>,
    #[serde(rename = "DCNM_VERSION", skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Raw key/value shape shared by the file and environment sources.
#[derive(Debug, Default, Deserialize)]
struct RawConnection {
    #[serde(rename = "DCNM_HOST")]
    host: Option<Scalar>,
    #[serde(rename = "DCNM_USER")]
    user: Option<Scalar>,
    #[serde(rename = "DCNM_PASS")]
    pass: Option<Scalar>,
    #[serde(rename = "DCNM_VERIFY")]
    verify: Option<Scalar>,
    #[serde(rename = "DCNM_VERSION")]
    version: Option<Scalar>,
}

/// File values keep their JSON type (`"DCNM_PASS": 12345` is a number);
/// environment values are always [`Scalar::Text`].
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Int(n) => n.to_string(),
            Self::Float(n) => n.to_string(),
            Self::Text(s) => s,
        }
    }

    fn into_flag(self, field: &'static str) -> Result<bool, ConfigError> {
        match self {
            Self::Bool(b) => Ok(b),
            Self::Int(n) => Ok(n != 0),
            Self::Text(s) => match s.to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => Ok(true),
                "false" | "no" | "0" | "" => Ok(false),
                _ => Err(ConfigError::Validation {
                    field,
                    reason: format!("expected a boolean, got '{s}'"),
                }),
            },
            Self::Float(n) => Err(ConfigError::Validation {
                field,
                reason: format!("expected a boolean, got '{n}'"),
            }),
        }
    }
}

/// Load connection parameters from `path`, or the environment when
/// `path` does not exist.
pub fn load_connection(path: &Path) -> Result<Connection, ConfigError> {
    load_connection_with(path, &Overrides::default())
}

/// As [`load_connection`], with `overrides` layered on top.
///
/// The file, when present, is the only source besides the overrides:
/// environment variables are not consulted at all in that case.
pub fn load_connection_with(path: &Path, overrides: &Overrides) -> Result<Connection, ConfigError> {
    let (figment, source) = if path.exists() {
        debug!(path = %path.display(), "reading connection file");
        (
            Figment::from(Json::file(path)),
            Source::File(path.to_path_buf()),
        )
    } else {
        debug!(path = %path.display(), "no connection file, reading environment");
        (
            Figment::from(Serialized::globals(environment())),
            Source::Environment,
        )
    };

    let raw: RawConnection = figment.merge(Serialized::globals(overrides)).extract()?;
    let required = |value: Option<Scalar>, field| {
        value
            .map(Scalar::into_text)
            .filter(|text| !text.is_empty())
            .ok_or(ConfigError::MissingField { field })
    };

    Ok(Connection {
        host: required(raw.host, HOST_KEY)?,
        username: required(raw.user, USER_KEY)?,
        password: SecretString::from(required(raw.pass, PASS_KEY)?),
        verify: raw
            .verify
            .map(|flag| flag.into_flag(VERIFY_KEY))
            .transpose()?,
        version: raw
            .version
            .map(Scalar::into_text)
            .filter(|v| !v.is_empty()),
        source,
    })
}

/// The `DCNM_*` variables exactly as set.
///
/// `Env` as a provider parses values (`007` becomes `7`, `[x]` an array),
/// so only its key filtering is used here.
fn environment() -> IndexMap<String, String> {
    Env::raw()
        .only(&KEYS)
        .iter()
        .map(|(key, value)| (key.as_str().to_ascii_uppercase(), value))
        .collect()
}

// ── Switch data ─────────────────────────────────────────────────────

/// Switch records from the switch data file.
///
/// `fabric` limits the result to one fabric (which must exist); `switch`
/// keeps only the record with that hostname. Records keep file order.
pub fn load_switch_data(
    path: &Path,
    fabric: Option<&str>,
    switch: Option<&str>,
) -> Result<Vec<SwitchRecord>, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::SwitchFileMissing {
            path: path.to_path_buf(),
        });
    }

    let text = std::fs::read_to_string(path)?;
    let mut fabrics: IndexMap<String, Vec<SwitchRecord>> =
        serde_json::from_str(&text).map_err(|source| ConfigError::SwitchData {
            path: path.to_path_buf(),
            source,
        })?;

    let selected = match fabric {
        Some(name) => {
            let records = fabrics
                .shift_remove(name)
                .ok_or_else(|| ConfigError::FabricNotFound {
                    fabric: name.to_owned(),
                })?;
            vec![records]
        }
        None => fabrics.into_values().collect(),
    };

    let records: Vec<SwitchRecord> = selected
        .into_iter()
        .flatten()
        .filter(|record| switch.is_none_or(|name| record.hostname == name))
        .collect();
    debug!(count = records.len(), "switch data loaded");
    Ok(records)
}

// Controller version resolution
//
// DCNM answers an unauthenticated `GET /rest/dcnm-version`. NDFC has no
// such endpoint, so a configured 12.x version is trusted without a probe.
// The result is memoised on the session.

use serde_json::Value;
use tracing::debug;

use crate::dialect::Dialect;
use crate::error::Error;
use crate::session::{Session, decode_response};

/// Unauthenticated version endpoint, rooted at the controller host.
pub const VERSION_PROBE_PATH: &str = "/rest/dcnm-version";

/// Field of the probe response carrying the version string.
pub const VERSION_FIELD: &str = "Dcnm-Version";

impl Session {
    /// Determine the controller's version string, at most once per session.
    pub async fn resolve_version(&mut self) -> Result<String, Error> {
        if let Some(version) = &self.version {
            return Ok(version.clone());
        }

        let version = match self.trusted_hint() {
            Some(hint) => {
                debug!(version = %hint, "using configured controller version");
                hint
            }
            None => self.probe_version().await?,
        };

        self.version = Some(version.clone());
        Ok(version)
    }

    /// The configured hint, if its dialect can be used without probing.
    fn trusted_hint(&self) -> Option<String> {
        let hint = self.version_hint.as_deref()?;
        match Dialect::from_version(hint) {
            Ok(dialect) if !dialect.requires_version_probe() => Some(hint.to_owned()),
            _ => None,
        }
    }

    async fn probe_version(&self) -> Result<String, Error> {
        let url = self.host_url().join(VERSION_PROBE_PATH)?;
        debug!("probing controller version at {url}");

        let resp = self.http().get(url).send().await?;
        let body: Value = decode_response(resp).await?;

        body.get(VERSION_FIELD)
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| Error::missing_field(VERSION_FIELD, &body))
    }
}

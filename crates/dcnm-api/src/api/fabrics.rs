// Fabric endpoints
//
// `GET {fabrics}` lists every fabric; `GET {fabrics}/{name}` fetches one.

use serde_json::Value;
use tracing::debug;

use super::Api;
use crate::error::Error;

impl Api<'_> {
    /// Fetch one fabric by name, or the full list when `name` is `None`.
    ///
    /// Returns loosely-typed JSON because the field set varies by
    /// fabric template and controller release.
    pub async fn get_fabrics(&mut self, name: Option<&str>) -> Result<Value, Error> {
        let path = match name {
            Some(name) => Self::named(self.endpoints.fabrics, name),
            None => self.endpoints.fabrics.to_owned(),
        };
        debug!(fabric = ?name, "fetching fabrics");
        self.get(&path).await
    }
}

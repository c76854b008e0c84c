// Configuration template endpoints (NDFC 12 only)
//
// `GET {templates}[?filterStr=...]` lists template summaries;
// `GET {templates}/{name}[?populate=...]` fetches one template.

use serde_json::Value;
use tracing::debug;

use super::Api;
use crate::error::Error;

impl Api<'_> {
    /// List template summaries, optionally narrowed by a controller-side
    /// filter expression such as `name=Default_VRF`.
    pub async fn get_templates(&mut self, filter: Option<&str>) -> Result<Vec<Value>, Error> {
        let path = self.require(self.endpoints.templates, "template listing")?;
        debug!(?filter, "listing templates");
        match filter {
            Some(filter) => {
                self.session
                    .get_with_query(path, &[("filterStr", filter.to_owned())])
                    .await
            }
            None => self.get(path).await,
        }
    }

    /// Fetch a single template. With `populate` the controller fills in
    /// the parameter defaults and annotations.
    pub async fn get_template_by_name(&mut self, name: &str, populate: bool) -> Result<Value, Error> {
        let base = self.require(self.endpoints.templates, "template retrieval")?;
        let path = Self::named(base, name);
        debug!(name, populate, "fetching template");
        self.session
            .get_with_query(&path, &[("populate", populate.to_string())])
            .await
    }
}

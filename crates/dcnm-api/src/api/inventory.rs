// Switch inventory, POAP and role endpoints
//
// POAP lives under the fabric: `{fabrics}/{fabric}/inventory/poap`.
// Roles and inventory are controller-scoped.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::Api;
use super::models::{BootstrapDevices, InventorySwitch, SwitchRole};
use crate::error::Error;

/// Field used as the key of the bootstrap-device mapping.
const SERIAL_FIELD: &str = "serialNumber";

impl Api<'_> {
    fn poap_path(&self, fabric: &str) -> String {
        format!("{}/inventory/poap", Self::named(self.endpoints.fabrics, fabric))
    }

    /// Devices of `fabric` currently in POAP, keyed by serial number.
    ///
    /// `GET {fabrics}/{fabric}/inventory/poap`. An unknown fabric comes
    /// back from the controller as HTTP 404 and is propagated.
    pub async fn get_bootstrap_devices(&mut self, fabric: &str) -> Result<BootstrapDevices, Error> {
        let path = self.poap_path(fabric);
        debug!(fabric, "fetching bootstrap devices");
        let records: Vec<Map<String, Value>> = self.get(&path).await?;
        bootstrap_mapping(records)
    }

    /// Register a batch of devices awaiting POAP.
    ///
    /// `POST {fabrics}/{fabric}/inventory/poap`
    pub async fn create_bootstrap_devices<R>(
        &mut self,
        fabric: &str,
        records: &[R],
    ) -> Result<Value, Error>
    where
        R: Serialize + Sync,
    {
        let path = self.poap_path(fabric);
        debug!(fabric, count = records.len(), "registering bootstrap devices");
        self.post(&path, records).await
    }

    /// Assign roles to a batch of switches.
    ///
    /// `POST {switch_roles}`
    pub async fn set_switch_roles(&mut self, roles: &[SwitchRole]) -> Result<Value, Error> {
        let path = self.endpoints.switch_roles;
        debug!(count = roles.len(), "assigning switch roles");
        self.post(path, roles).await
    }

    /// Every switch the controller manages, across all fabrics.
    ///
    /// `GET {inventory}`
    pub async fn get_switch_inventory(&mut self) -> Result<Vec<InventorySwitch>, Error> {
        let path = self.endpoints.inventory;
        debug!("fetching switch inventory");
        self.get(path).await
    }
}

fn bootstrap_mapping(records: Vec<Map<String, Value>>) -> Result<BootstrapDevices, Error> {
    records
        .into_iter()
        .map(|mut record| match record.remove(SERIAL_FIELD) {
            Some(Value::String(serial)) => Ok((serial, record)),
            _ => Err(Error::missing_field(SERIAL_FIELD, &Value::Object(record))),
        })
        .collect()
}

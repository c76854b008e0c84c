// Typed shapes for the few controller payloads the SDK inspects.
// Everything else is passed through as `serde_json::Value`.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Devices awaiting POAP, keyed by serial number. The serial number is
/// removed from each attribute map; controller order is preserved.
pub type BootstrapDevices = IndexMap<String, Map<String, Value>>;

/// One entry of a role-assignment batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchRole {
    pub serial_number: String,
    pub role: String,
}

/// A switch from the controller inventory.
///
/// Switches still being discovered can report null names or addresses;
/// those read as empty strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySwitch {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub logical_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub ip_address: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub fabric_name: String,
    #[serde(default)]
    pub serial_number: Option<String>,
    /// Remaining controller fields (model, release, status, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// ── Switch identity ──

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Desired identity of one switch, as listed in the switch data file.
///
/// The discovery password doubles as the switch admin password when the
/// record is submitted for POAP.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchRecord {
    pub serial_number: String,
    pub hostname: String,
    pub ip_address: String,
    pub discovery_username: String,
    pub discovery_password: SecretString,
    #[serde(rename = "switchRole", default)]
    pub role: String,
}

impl SwitchRecord {
    pub fn new(
        serial_number: impl Into<String>,
        hostname: impl Into<String>,
        ip_address: impl Into<String>,
        discovery_username: impl Into<String>,
        discovery_password: impl Into<SecretString>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            serial_number: serial_number.into(),
            hostname: hostname.into(),
            ip_address: ip_address.into(),
            discovery_username: discovery_username.into(),
            discovery_password: discovery_password.into(),
            role: role.into(),
        }
    }

    /// The record in the shape the controller's POAP endpoint expects.
    pub fn submission(&self) -> Map<String, Value> {
        let password = self.discovery_password.expose_secret();
        let mut map = Map::new();
        map.insert("serialNumber".into(), self.serial_number.clone().into());
        map.insert("hostname".into(), self.hostname.clone().into());
        map.insert("ipAddress".into(), self.ip_address.clone().into());
        map.insert("password".into(), password.into());
        map.insert("discoveryUsername".into(), self.discovery_username.clone().into());
        map.insert("discoveryPassword".into(), password.into());
        map.insert("switchRole".into(), self.role.clone().into());
        map
    }
}

impl std::fmt::Display for SwitchRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}, {}, {}",
            self.hostname, self.serial_number, self.ip_address, self.discovery_username
        )
    }
}

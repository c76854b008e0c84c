// ── Inventory projections ──

use serde::Serialize;

/// One line of the switch listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwitchSummary {
    pub name: String,
    pub ip: String,
    pub fabric: String,
}

/// Outcome of a role assignment for one requested switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignedRole {
    pub hostname: String,
    pub serial_number: String,
    pub role: String,
    /// Whether the controller listed the serial number as updated.
    pub updated: bool,
}

/// What the session learned about the controller.
#[derive(Debug, Clone, Serialize)]
pub struct ControllerInfo {
    pub host: String,
    pub version: String,
    pub dialect: String,
    pub supports_templates: bool,
}

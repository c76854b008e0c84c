// ── Actions ──
//
// Multi-step workflows over one authenticated session. Each action
// borrows the session mutably for its whole duration.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::{debug, info};

use dcnm_api::{BootstrapDevices, Session, SwitchRole};

use crate::error::CoreError;
use crate::model::{AssignedRole, ControllerInfo, SwitchRecord, SwitchSummary, Template};

/// Status reported for a POAP registration whose response had none.
pub const NO_STATUS: &str = "No output returned on success";

// ── POAP registration ────────────────────────────────────────────────

/// Register every requested switch that is awaiting POAP in `fabric`.
///
/// Returns hostname → controller status, in the order of `switches`.
/// Fails with [`CoreError::NoPoapSwitches`] before posting anything when
/// none of the serial numbers are awaiting POAP.
pub async fn poap_register_switches(
    session: &mut Session,
    fabric: &str,
    switches: &[SwitchRecord],
) -> Result<IndexMap<String, String>, CoreError> {
    let mut api = session.api().await?;
    let devices = api.get_bootstrap_devices(fabric).await?;

    let records = merge_poap_records(&devices, switches);
    if records.is_empty() {
        return Err(CoreError::NoPoapSwitches {
            fabric: fabric.to_owned(),
        });
    }
    debug!(
        fabric,
        requested = switches.len(),
        eligible = records.len(),
        "merged switch data with POAP devices"
    );

    let mut output = IndexMap::with_capacity(records.len());
    for record in records {
        let hostname = record
            .get("hostname")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();
        let response = api
            .create_bootstrap_devices(fabric, std::slice::from_ref(&record))
            .await?;
        let status = poap_status(&response);
        info!(%hostname, %status, "POAP registration submitted");
        output.insert(hostname, status);
    }
    Ok(output)
}

/// Pair requested switches with POAP devices by serial number.
///
/// Each record starts from the switch's own fields; attributes the
/// controller reports for the POAP device replace them. Switches not
/// awaiting POAP are skipped.
pub fn merge_poap_records(
    devices: &BootstrapDevices,
    switches: &[SwitchRecord],
) -> Vec<Map<String, Value>> {
    switches
        .iter()
        .filter_map(|switch| {
            let device = devices.get(&switch.serial_number)?;
            let mut record = switch.submission();
            record.extend(device.clone());
            Some(record)
        })
        .collect()
}

fn poap_status(response: &Value) -> String {
    match response.get("status") {
        Some(Value::String(status)) => status.clone(),
        Some(Value::Null) | None => NO_STATUS.to_owned(),
        Some(other) => other.to_string(),
    }
}

// ── Role assignment ──────────────────────────────────────────────────

/// Assign roles to `switches`; `role_override` replaces every record's role.
///
/// A switch is reported `updated` when its serial number appears in the
/// controller's `successList`.
pub async fn assign_switch_roles(
    session: &mut Session,
    role_override: Option<&str>,
    switches: &[SwitchRecord],
) -> Result<Vec<AssignedRole>, CoreError> {
    let roles = role_assignments(role_override, switches);
    let response = session.api().await?.set_switch_roles(&roles).await?;
    let updated = parse_success_list(&response);
    debug!(requested = roles.len(), updated = updated.len(), "roles assigned");

    Ok(switches
        .iter()
        .zip(roles)
        .map(|(switch, role)| AssignedRole {
            hostname: switch.hostname.clone(),
            updated: updated.iter().any(|serial| *serial == role.serial_number),
            serial_number: role.serial_number,
            role: role.role,
        })
        .collect())
}

/// `{serialNumber, role}` pairs for each switch.
pub fn role_assignments(role_override: Option<&str>, switches: &[SwitchRecord]) -> Vec<SwitchRole> {
    switches
        .iter()
        .map(|switch| SwitchRole {
            serial_number: switch.serial_number.clone(),
            role: role_override.unwrap_or(&switch.role).to_owned(),
        })
        .collect()
}

/// Serial numbers in `successList`, which arrives either as a
/// comma-joined string or as an array.
pub fn parse_success_list(response: &Value) -> Vec<String> {
    match response.get("successList") {
        Some(Value::String(list)) => list
            .split(',')
            .map(str::trim)
            .filter(|serial| !serial.is_empty())
            .map(str::to_owned)
            .collect(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_owned)
            .collect(),
        _ => Vec::new(),
    }
}

// ── Inventory ────────────────────────────────────────────────────────

/// Switches in the controller inventory, optionally limited to one fabric.
pub async fn list_switches(
    session: &mut Session,
    fabric: Option<&str>,
) -> Result<Vec<SwitchSummary>, CoreError> {
    let inventory = session.api().await?.get_switch_inventory().await?;
    Ok(inventory
        .into_iter()
        .filter(|sw| fabric.is_none_or(|name| sw.fabric_name == name))
        .map(|sw| SwitchSummary {
            name: sw.logical_name,
            ip: sw.ip_address,
            fabric: sw.fabric_name,
        })
        .collect())
}

/// Fabrics as the controller describes them; a named lookup yields one.
pub async fn list_fabrics(
    session: &mut Session,
    name: Option<&str>,
) -> Result<Vec<Value>, CoreError> {
    let fabrics = session.api().await?.get_fabrics(name).await?;
    Ok(match fabrics {
        Value::Array(list) => list,
        Value::Null => Vec::new(),
        single => vec![single],
    })
}

// ── Templates ────────────────────────────────────────────────────────

/// Templates known to the controller, sorted by name.
///
/// `name` narrows the list to templates matching that name search.
pub async fn list_templates(
    session: &mut Session,
    name: Option<&str>,
) -> Result<Vec<Template>, CoreError> {
    let filter = name.map(|name| format!("name={name}"));
    let raw = session
        .api()
        .await?
        .get_templates(filter.as_deref())
        .await?;
    let mut templates: Vec<Template> = raw.into_iter().map(Template::from_json).collect();
    templates.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(templates)
}

pub async fn get_template(
    session: &mut Session,
    name: &str,
    populate: bool,
) -> Result<Template, CoreError> {
    let raw = session
        .api()
        .await?
        .get_template_by_name(name, populate)
        .await?;
    Ok(Template::from_json(raw))
}

// ── Controller ───────────────────────────────────────────────────────

/// Version and dialect of the controller, resolving them if needed.
pub async fn controller_info(session: &mut Session) -> Result<ControllerInfo, CoreError> {
    let dialect = session.resolve_dialect().await?;
    Ok(ControllerInfo {
        host: session.host_url().to_string(),
        version: session.version().unwrap_or_default().to_owned(),
        dialect: dialect.to_string(),
        supports_templates: dialect.endpoints().templates.is_some(),
    })
}

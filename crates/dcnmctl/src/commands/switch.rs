//! Switch command handlers: POAP registration, role assignment, listing.

use indexmap::IndexMap;
use serde::Serialize;
use tabled::Tabled;

use dcnm_core::{AssignedRole, Session, SwitchRecord, SwitchSummary};

use crate::cli::{GlobalOpts, SwitchArgs, SwitchCommand, SwitchDataArgs};
use crate::error::CliError;
use crate::output;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct SwitchRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Fabric")]
    fabric: String,
}

impl From<&SwitchSummary> for SwitchRow {
    fn from(s: &SwitchSummary) -> Self {
        Self {
            name: s.name.clone(),
            ip: s.ip.clone(),
            fabric: s.fabric.clone(),
        }
    }
}

#[derive(Serialize)]
struct PoapResult {
    hostname: String,
    status: String,
}

#[derive(Tabled)]
struct PoapRow {
    #[tabled(rename = "Hostname")]
    hostname: String,
    #[tabled(rename = "Status")]
    status: String,
}

#[derive(Tabled)]
struct RoleRow {
    #[tabled(rename = "Hostname")]
    hostname: String,
    #[tabled(rename = "Serial")]
    serial: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Updated")]
    updated: String,
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    session: &mut Session,
    args: SwitchArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        SwitchCommand::Poap(data) => {
            let switches = load(&data)?;
            let results =
                dcnm_core::poap_register_switches(session, &data.fabric, &switches).await?;
            let out = render_poap(&results, global);
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SwitchCommand::Role { data, role } => {
            let switches = load(&data)?;
            let assigned =
                dcnm_core::assign_switch_roles(session, role.as_deref(), &switches).await?;
            let color = output::should_color(&global.color);
            let out = output::render_list(
                &global.output,
                &assigned,
                |a| RoleRow {
                    hostname: a.hostname.clone(),
                    serial: a.serial_number.clone(),
                    role: a.role.clone(),
                    updated: output::status_text(
                        if a.updated { "yes" } else { "no" },
                        a.updated,
                        color,
                    ),
                },
                role_line,
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SwitchCommand::List { fabric } => {
            let switches = dcnm_core::list_switches(session, fabric.as_deref()).await?;
            let out = output::render_list(&global.output, &switches, |s| SwitchRow::from(s), |s| {
                s.name.clone()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

/// Switch data is read before any controller call is made.
fn load(data: &SwitchDataArgs) -> Result<Vec<SwitchRecord>, CliError> {
    let records =
        dcnm_config::load_switch_data(&data.swdata, Some(&data.fabric), data.switch.as_deref())?;
    tracing::debug!(count = records.len(), fabric = %data.fabric, "switches selected");
    Ok(records)
}

fn render_poap(results: &IndexMap<String, String>, global: &GlobalOpts) -> String {
    let rows: Vec<PoapResult> = results
        .iter()
        .map(|(hostname, status)| PoapResult {
            hostname: hostname.clone(),
            status: status.clone(),
        })
        .collect();
    output::render_list(
        &global.output,
        &rows,
        |r| PoapRow {
            hostname: r.hostname.clone(),
            status: r.status.clone(),
        },
        |r| format!("{}: {}", r.hostname, r.status),
    )
}

fn role_line(assigned: &AssignedRole) -> String {
    if assigned.updated {
        format!("{}: {} assignment success", assigned.hostname, assigned.role)
    } else {
        format!("{}: {} not assigned", assigned.hostname, assigned.role)
    }
}

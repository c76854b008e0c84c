//! Fabric command handlers.

use serde_json::Value;
use tabled::Tabled;

use dcnm_core::Session;

use crate::cli::{FabricArgs, FabricCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct FabricRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Type")]
    fabric_type: String,
    #[tabled(rename = "Technology")]
    technology: String,
}

impl From<&Value> for FabricRow {
    fn from(f: &Value) -> Self {
        Self {
            name: field(f, "fabricName"),
            id: field(f, "fabricId"),
            fabric_type: field(f, "fabricType"),
            technology: field(f, "fabricTechnology"),
        }
    }
}

fn field(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

pub async fn handle(
    session: &mut Session,
    args: FabricArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        FabricCommand::List { name } => {
            let fabrics = dcnm_core::list_fabrics(session, name.as_deref()).await?;
            let out = output::render_list(&global.output, &fabrics, |f| FabricRow::from(f), |f| {
                field(f, "fabricName")
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

//! `server` command: controller version and dialect.

use dcnm_core::{ControllerInfo, Session};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

pub async fn handle(session: &mut Session, global: &GlobalOpts) -> Result<(), CliError> {
    let info = dcnm_core::controller_info(session).await?;
    let out = output::render_single(&global.output, &info, detail, |i| i.version.clone());
    output::print_output(&out, global.quiet);
    Ok(())
}

fn detail(info: &ControllerInfo) -> String {
    [
        format!("Host:      {}", info.host),
        format!("Version:   {}", info.version),
        format!("Dialect:   {}", info.dialect),
        format!(
            "Templates: {}",
            if info.supports_templates { "supported" } else { "not supported" }
        ),
    ]
    .join("\n")
}

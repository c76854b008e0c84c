// ── Domain model ──
//
// Immutable records: switch identities read from the switch data file,
// and read-only projections of controller responses.

mod inventory;
mod switch;
mod template;

pub use inventory::{AssignedRole, ControllerInfo, SwitchSummary};
pub use switch::SwitchRecord;
pub use template::{Template, TemplateParameter};

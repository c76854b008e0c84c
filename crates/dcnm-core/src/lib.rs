//! Domain model and actions between `dcnm-api` and the `dcnmctl` CLI.
//!
//! - **Actions** ([`actions`]): multi-step workflows over an authenticated
//!   [`dcnm_api::Session`]: POAP registration, role assignment, switch
//!   listing, and template retrieval.
//!
//! - **Domain model** ([`model`]): immutable records read from the switch
//!   data file ([`SwitchRecord`]) or projected from controller responses
//!   ([`Template`], [`SwitchSummary`], [`ControllerInfo`]).
//!
//! - **[`CoreError`]**: the API layer's failures translated into domain
//!   terms, plus the "no eligible switches" condition.

pub mod actions;
pub mod error;
pub mod model;

pub use actions::{
    assign_switch_roles, controller_info, get_template, list_fabrics, list_switches,
    list_templates, poap_register_switches,
};
pub use error::CoreError;
pub use model::{
    AssignedRole, ControllerInfo, SwitchRecord, SwitchSummary, Template, TemplateParameter,
};

// The session layer is part of this crate's public surface.
pub use dcnm_api::{Dialect, Session, SessionConfig};

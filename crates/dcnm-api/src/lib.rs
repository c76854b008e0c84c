// dcnm-api: Async Rust client for the Cisco DCNM / NDFC REST API
//
// A `Session` owns the HTTP transport and the credential state for one
// controller. It resolves the controller's API dialect once, logs on with
// the dialect's handshake, refreshes the token transparently before each
// call, and hands out the dialect's endpoint façade via `Session::api()`.

pub mod api;
pub mod auth;
pub mod dialect;
pub mod error;
pub mod session;
pub mod transport;
pub mod version;

pub use api::models::{BootstrapDevices, InventorySwitch, SwitchRole};
pub use api::{Api, Endpoints};
pub use auth::{AuthState, AuthToken, Credential, EXPIRY_MARGIN};
pub use dialect::Dialect;
pub use error::Error;
pub use session::{Session, SessionConfig};
pub use transport::{TlsMode, TransportConfig};

#![allow(dead_code, clippy::unwrap_used)]
// Shared mock-controller setup for the dcnm-api integration tests.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

use dcnm_api::SessionConfig;

pub const NDFC_BASE: &str = "/appcenter/cisco/ndfc/api/v1";

/// Matches requests that carry no `Authorization` header.
pub struct NoAuthorization;

impl Match for NoAuthorization {
    fn matches(&self, request: &Request) -> bool {
        !request.headers.contains_key("authorization")
    }
}

pub fn config(server: &MockServer) -> SessionConfig {
    SessionConfig::new(server.uri(), "admin", "secret").with_tls_verify(false)
}

pub fn ndfc_config(server: &MockServer) -> SessionConfig {
    config(server).with_version_hint("12.1.2e")
}

/// Mount the DCNM version probe reporting `version`.
pub async fn mount_dcnm_version(server: &MockServer, version: &str) {
    Mock::given(method("GET"))
        .and(path("/rest/dcnm-version"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Dcnm-Version": version })))
        .mount(server)
        .await;
}

/// Mount a DCNM 11.5 controller: version probe plus a logon issuing `token`.
pub async fn mount_dcnm(server: &MockServer, token: &str) {
    mount_dcnm_version(server, "11.5(1)").await;
    Mock::given(method("POST"))
        .and(path("/rest/logon"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Dcnm-Token": token })))
        .mount(server)
        .await;
}

/// Mount an NDFC login that sets a session cookie.
pub async fn mount_ndfc(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "AuthCookie=jwt-abc; Path=/")
                .set_body_json(json!({ "jwttoken": "jwt-abc" })),
        )
        .mount(server)
        .await;
}

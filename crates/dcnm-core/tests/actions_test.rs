#![allow(clippy::unwrap_used)]
// Action-layer tests against a mock NDFC / DCNM controller.

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dcnm_core::{
    CoreError, Session, SessionConfig, SwitchRecord, assign_switch_roles, controller_info,
    get_template, list_fabrics, list_switches, list_templates, poap_register_switches,
};

const NDFC_BASE: &str = "/appcenter/cisco/ndfc/api/v1";

// ── Helpers ─────────────────────────────────────────────────────────

async fn ndfc_session() -> (MockServer, Session) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "AuthCookie=jwt-abc; Path=/")
                .set_body_json(json!({ "jwttoken": "jwt-abc" })),
        )
        .mount(&server)
        .await;
    let config = SessionConfig::new(server.uri(), "admin", "secret")
        .with_tls_verify(false)
        .with_version_hint("12.1.2e");
    let session = Session::new(config).unwrap();
    (server, session)
}

async fn dcnm_session() -> (MockServer, Session) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/dcnm-version"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Dcnm-Version": "11.5(1)" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/logon"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Dcnm-Token": "tok" })))
        .mount(&server)
        .await;
    let config = SessionConfig::new(server.uri(), "admin", "secret").with_tls_verify(false);
    let session = Session::new(config).unwrap();
    (server, session)
}

fn ndfc_path(suffix: &str) -> String {
    format!("{NDFC_BASE}{suffix}")
}

fn poap_path() -> String {
    ndfc_path("/lan-fabric/rest/control/fabrics/site-1/inventory/poap")
}

fn switch(serial: &str, hostname: &str, role: &str) -> SwitchRecord {
    serde_json::from_value(json!({
        "serialNumber": serial,
        "hostname": hostname,
        "ipAddress": "10.1.1.1/24",
        "discoveryUsername": "admin",
        "discoveryPassword": "C1sco12345",
        "switchRole": role
    }))
    .unwrap()
}

// ── POAP registration ───────────────────────────────────────────────

#[tokio::test]
async fn test_poap_posts_each_merged_record_alone() {
    let (server, mut session) = ndfc_session().await;
    Mock::given(method("GET"))
        .and(path(poap_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "serialNumber": "A1", "model": "N9K-C93180YC-EX", "version": "10.2(3)" }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(poap_path()))
        .and(body_json(json!([{
            "serialNumber": "A1",
            "hostname": "leaf-1",
            "ipAddress": "10.1.1.1/24",
            "password": "C1sco12345",
            "discoveryUsername": "admin",
            "discoveryPassword": "C1sco12345",
            "switchRole": "leaf",
            "model": "N9K-C93180YC-EX",
            "version": "10.2(3)"
        }])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "Success" })))
        .expect(1)
        .mount(&server)
        .await;

    let switches = [switch("A1", "leaf-1", "leaf"), switch("B2", "leaf-2", "leaf")];
    let output = poap_register_switches(&mut session, "site-1", &switches)
        .await
        .unwrap();

    assert_eq!(output.len(), 1);
    assert_eq!(output["leaf-1"], "Success");
}

#[tokio::test]
async fn test_poap_device_attributes_replace_local_fields() {
    let (server, mut session) = ndfc_session().await;
    Mock::given(method("GET"))
        .and(path(poap_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "serialNumber": "A1", "hostname": "switch", "model": "N9K-C93180YC-EX" }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(poap_path()))
        .and(body_partial_json(json!([{
            "serialNumber": "A1",
            "hostname": "switch",
            "ipAddress": "10.1.1.1/24",
            "switchRole": "leaf"
        }])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "Success" })))
        .expect(1)
        .mount(&server)
        .await;

    let output = poap_register_switches(&mut session, "site-1", &[switch("A1", "leaf-1", "leaf")])
        .await
        .unwrap();

    assert_eq!(output["switch"], "Success");
}

#[tokio::test]
async fn test_poap_empty_response_reports_default_status() {
    let (server, mut session) = ndfc_session().await;
    Mock::given(method("GET"))
        .and(path(poap_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "serialNumber": "A1" },
            { "serialNumber": "B2" }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(poap_path()))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;

    let switches = [switch("B2", "leaf-2", "leaf"), switch("A1", "leaf-1", "leaf")];
    let output = poap_register_switches(&mut session, "site-1", &switches)
        .await
        .unwrap();

    let hostnames: Vec<&str> = output.keys().map(String::as_str).collect();
    assert_eq!(hostnames, ["leaf-2", "leaf-1"]);
    assert!(output.values().all(|s| s == dcnm_core::actions::NO_STATUS));
}

#[tokio::test]
async fn test_poap_no_eligible_switches_is_distinct() {
    let (server, mut session) = ndfc_session().await;
    Mock::given(method("GET"))
        .and(path(poap_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "serialNumber": "Z9" }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(poap_path()))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = poap_register_switches(&mut session, "site-1", &[switch("A1", "leaf-1", "leaf")])
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::NoPoapSwitches { ref fabric } if fabric == "site-1"));
}

#[tokio::test]
async fn test_poap_unknown_fabric_propagates_404() {
    let (server, mut session) = ndfc_session().await;
    Mock::given(method("GET"))
        .and(path(poap_path()))
        .respond_with(ResponseTemplate::new(404).set_body_string("Fabric site-1 not found"))
        .mount(&server)
        .await;

    let err = poap_register_switches(&mut session, "site-1", &[switch("A1", "leaf-1", "leaf")])
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
}

// ── Role assignment ─────────────────────────────────────────────────

#[tokio::test]
async fn test_roles_marks_only_success_list() {
    let (server, mut session) = ndfc_session().await;
    Mock::given(method("POST"))
        .and(path(ndfc_path("/lan-fabric/rest/control/switches/roles")))
        .and(body_json(json!([
            { "serialNumber": "A1", "role": "border" },
            { "serialNumber": "B2", "role": "border" }
        ])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "successList": "A1" })))
        .expect(1)
        .mount(&server)
        .await;

    let switches = [switch("A1", "leaf-1", "leaf"), switch("B2", "leaf-2", "leaf")];
    let assigned = assign_switch_roles(&mut session, Some("border"), &switches)
        .await
        .unwrap();

    assert_eq!(assigned.len(), 2);
    assert!(assigned[0].updated);
    assert!(!assigned[1].updated);
    assert_eq!(assigned[1].hostname, "leaf-2");
}

#[tokio::test]
async fn test_roles_without_success_list_updates_nothing() {
    let (server, mut session) = dcnm_session().await;
    Mock::given(method("POST"))
        .and(path("/rest/control/switches/roles"))
        .and(body_json(json!([{ "serialNumber": "S1", "role": "spine" }])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let assigned = assign_switch_roles(&mut session, None, &[switch("S1", "spine-1", "spine")])
        .await
        .unwrap();

    assert!(!assigned[0].updated);
    assert_eq!(assigned[0].role, "spine");
}

// ── Inventory ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_switches_filters_by_fabric() {
    let (server, mut session) = dcnm_session().await;
    Mock::given(method("GET"))
        .and(path("/rest/inventory/switches"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "logicalName": "leaf-1", "ipAddress": "10.1.1.1", "fabricName": "site-1", "model": "N9K" },
            { "logicalName": "leaf-9", "ipAddress": "10.9.9.9", "fabricName": "site-9" }
        ])))
        .mount(&server)
        .await;

    let all = list_switches(&mut session, None).await.unwrap();
    assert_eq!(all.len(), 2);

    let site = list_switches(&mut session, Some("site-1")).await.unwrap();
    assert_eq!(site.len(), 1);
    assert_eq!(site[0].name, "leaf-1");
    assert_eq!(site[0].ip, "10.1.1.1");
}

#[tokio::test]
async fn test_named_fabric_lookup_yields_one() {
    let (server, mut session) = dcnm_session().await;
    Mock::given(method("GET"))
        .and(path("/rest/control/fabrics/site-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "fabricName": "site-1" })))
        .mount(&server)
        .await;

    let fabrics = list_fabrics(&mut session, Some("site-1")).await.unwrap();
    assert_eq!(fabrics, vec![json!({ "fabricName": "site-1" })]);
}

// ── Templates ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_templates_sorted_by_name() {
    let (server, mut session) = ndfc_session().await;
    Mock::given(method("GET"))
        .and(path(ndfc_path("/configtemplate/rest/config/templates")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "name": "b_tmpl", "description": "second" },
            { "name": "a_tmpl", "description": "first" }
        ])))
        .mount(&server)
        .await;

    let templates = list_templates(&mut session, None).await.unwrap();
    let names: Vec<&str> = templates.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["a_tmpl", "b_tmpl"]);
}

#[tokio::test]
async fn test_list_templates_searches_by_name() {
    let (server, mut session) = ndfc_session().await;
    Mock::given(method("GET"))
        .and(path(ndfc_path("/configtemplate/rest/config/templates")))
        .and(query_param("filterStr", "name=Default_VRF"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "name": "Default_VRF_Universal" },
            { "name": "Default_VRF" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let templates = list_templates(&mut session, Some("Default_VRF"))
        .await
        .unwrap();
    let names: Vec<&str> = templates.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["Default_VRF", "Default_VRF_Universal"]);
}

#[tokio::test]
async fn test_get_template_builds_parameters() {
    let (server, mut session) = ndfc_session().await;
    Mock::given(method("GET"))
        .and(path(ndfc_path("/configtemplate/rest/config/templates/Default_VRF")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Default_VRF",
            "parameters": [
                { "name": "vrfName", "annotations": { "IsMandatory": "true" } }
            ]
        })))
        .mount(&server)
        .await;

    let template = get_template(&mut session, "Default_VRF", true).await.unwrap();
    assert_eq!(template.description, "Unknown");
    assert_eq!(template.nvpairs(), vec![("vrfName", None, true)]);
}

#[tokio::test]
async fn test_templates_unsupported_on_dcnm() {
    let (_server, mut session) = dcnm_session().await;
    let err = list_templates(&mut session, None).await.unwrap_err();
    assert!(matches!(err, CoreError::Unsupported { .. }));
}

// ── Controller ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_controller_info_reports_dialect() {
    let (_server, mut session) = dcnm_session().await;
    let info = controller_info(&mut session).await.unwrap();
    assert_eq!(info.version, "11.5(1)");
    assert_eq!(info.dialect, "DCNM 11");
    assert!(!info.supports_templates);
}

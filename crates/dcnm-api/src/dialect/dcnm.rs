// DCNM 11 dialect: header-token authentication.
//
// `POST /rest/logon` with HTTP basic auth and the requested token lifetime
// in milliseconds. The returned `Dcnm-Token` is replayed as a request
// header on every later call; `/rest/logout` invalidates it.

use reqwest::header::HeaderValue;
use secrecy::ExposeSecret;
use serde_json::json;
use tracing::debug;

use super::{Logon, logon_response, required_str};
use crate::api::Endpoints;
use crate::auth::Credential;
use crate::error::Error;

/// Response field carrying the token, and the header it is replayed in.
pub(crate) const TOKEN_FIELD: &str = "Dcnm-Token";
pub(crate) const TOKEN_HEADER: &str = "Dcnm-Token";

pub(crate) static ENDPOINTS: Endpoints = Endpoints {
    base: "/rest",
    logon: "/rest/logon",
    logout: Some("/logout"),
    fabrics: "/control/fabrics",
    switch_roles: "/control/switches/roles",
    inventory: "/inventory/switches",
    templates: None,
};

pub(crate) async fn logon(req: &Logon<'_>) -> Result<Credential, Error> {
    let url = req.url(ENDPOINTS.logon)?;
    let expiration_ms = u64::try_from(req.lifetime.as_millis()).unwrap_or(u64::MAX);

    debug!("logging on at {url}");

    let resp = req
        .http
        .post(url)
        .basic_auth(req.username, Some(req.password.expose_secret()))
        .json(&json!({ "expirationTime": expiration_ms }))
        .send()
        .await
        .map_err(Error::Transport)?;

    let body = logon_response(resp).await?;
    let token = required_str(&body, TOKEN_FIELD)?;

    let mut value = HeaderValue::from_str(token).map_err(|e| Error::Authentication {
        message: format!("controller returned an unusable token: {e}"),
    })?;
    value.set_sensitive(true);

    debug!("logon successful");
    Ok(Credential::Header {
        name: TOKEN_HEADER,
        value,
    })
}

// NDFC 12 dialect: cookie-session authentication.
//
// `POST /login` with the credentials and authentication domain in the
// JSON body. The server sets the session cookie on the response, which
// the client's jar picks up; the `jwttoken` field only confirms success.
// There is no logout endpoint.

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;

use super::{Logon, logon_response, required_str};
use crate::api::Endpoints;
use crate::auth::Credential;
use crate::error::Error;

pub(crate) const TOKEN_FIELD: &str = "jwttoken";

/// Authentication domain used when none is configured.
pub const DEFAULT_DOMAIN: &str = "local";

pub(crate) static ENDPOINTS: Endpoints = Endpoints {
    base: "/appcenter/cisco/ndfc/api/v1",
    logon: "/login",
    logout: None,
    fabrics: "/lan-fabric/rest/control/fabrics",
    switch_roles: "/lan-fabric/rest/control/switches/roles",
    inventory: "/lan-fabric/rest/inventory/switches",
    templates: Some("/configtemplate/rest/config/templates"),
};

pub(crate) async fn login(req: &Logon<'_>) -> Result<Credential, Error> {
    let url = req.url(ENDPOINTS.logon)?;

    debug!("logging in at {url}");

    let body = json!({
        "userName": req.username,
        "userPasswd": req.password.expose_secret(),
        "domain": req.domain,
    });

    let resp = req
        .http
        .post(url)
        .json(&body)
        .send()
        .await
        .map_err(Error::Transport)?;

    let body = logon_response(resp).await?;
    let jwt = required_str(&body, TOKEN_FIELD)?;

    debug!("login successful");
    Ok(Credential::Cookie {
        jwt: SecretString::from(jwt.to_owned()),
    })
}

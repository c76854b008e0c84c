// Controller session
//
// Composes an owned HTTP transport with the credential state for one
// controller. Every API call goes through `request()`, which first makes
// sure the token is current (logging on again if it is missing or stale)
// and then prefixes the path with the dialect's base URL.

use std::time::Duration;

use reqwest::{Method, RequestBuilder};
use secrecy::SecretString;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::time::Instant;
use tracing::{debug, warn};
use url::Url;

use crate::api::{Api, Endpoints};
use crate::auth::{AuthState, AuthToken, Credential};
use crate::dialect::{Dialect, Logon, ndfc};
use crate::error::{Error, preview};
use crate::transport::{TlsMode, TransportConfig};

/// Token lifetime requested from the controller when none is configured.
pub const DEFAULT_LIFETIME: Duration = Duration::from_secs(30);

/// Connection parameters for a [`Session`].
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// IP or FQDN of the controller. A bare host gets `https://`; a full
    /// URL (`http://127.0.0.1:8080`) is used as given.
    pub host: String,
    pub username: String,
    pub password: SecretString,
    pub tls_verify: bool,
    /// Known controller version. A 12.x hint skips the version probe.
    pub version_hint: Option<String>,
    /// Token lifetime to request.
    pub lifetime: Duration,
    /// NDFC authentication domain.
    pub domain: String,
    pub timeout: Duration,
}

impl SessionConfig {
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<SecretString>,
    ) -> Self {
        Self {
            host: host.into(),
            username: username.into(),
            password: password.into(),
            tls_verify: true,
            version_hint: None,
            lifetime: DEFAULT_LIFETIME,
            domain: ndfc::DEFAULT_DOMAIN.to_owned(),
            timeout: TransportConfig::default().timeout,
        }
    }

    pub fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }

    pub fn with_version_hint(mut self, version: impl Into<String>) -> Self {
        self.version_hint = Some(version.into());
        self
    }

    pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
        self.lifetime = lifetime;
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// One authenticated relationship to a controller.
///
/// Mutating calls take `&mut self`: a session is owned by one caller at a
/// time. Use one session per worker when issuing calls concurrently.
pub struct Session {
    http: reqwest::Client,
    host_url: Url,
    username: String,
    password: SecretString,
    lifetime: Duration,
    domain: String,
    pub(crate) version_hint: Option<String>,
    pub(crate) version: Option<String>,
    dialect: Option<Dialect>,
    token: Option<AuthToken>,
    endpoints: Option<&'static Endpoints>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("host_url", &self.host_url.as_str())
            .field("username", &self.username)
            .field("version", &self.version)
            .field("dialect", &self.dialect)
            .field("auth_state", &self.auth_state())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Create a session. Performs no network I/O.
    pub fn new(config: SessionConfig) -> Result<Self, Error> {
        let transport = TransportConfig {
            tls: TlsMode::from_verify(config.tls_verify),
            timeout: config.timeout,
        };
        let http = transport.build_client()?;
        let host_url = controller_url(&config.host)?;

        debug!(url = %host_url, tls_verify = config.tls_verify, "session created");

        Ok(Self {
            http,
            host_url,
            username: config.username,
            password: config.password,
            lifetime: config.lifetime,
            domain: config.domain,
            version_hint: config.version_hint,
            version: None,
            dialect: None,
            token: None,
            endpoints: None,
        })
    }

    /// The controller root URL (`https://host/`).
    pub fn host_url(&self) -> &Url {
        &self.host_url
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// The resolved controller version, if resolution has happened.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// The resolved dialect, if resolution has happened.
    pub fn dialect(&self) -> Option<Dialect> {
        self.dialect
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub fn auth_state(&self) -> AuthState {
        match &self.token {
            None => AuthState::NotAuthenticated,
            Some(token) if token.is_current() => AuthState::TokenValid,
            Some(_) => AuthState::TokenExpired,
        }
    }

    fn token_is_current(&self) -> bool {
        self.token.as_ref().is_some_and(AuthToken::is_current)
    }

    /// Resolve the dialect once; later calls return the memoised value.
    pub async fn resolve_dialect(&mut self) -> Result<Dialect, Error> {
        if let Some(dialect) = self.dialect {
            return Ok(dialect);
        }
        let version = self.resolve_version().await?;
        let dialect = Dialect::from_version(&version)?;
        debug!(%version, %dialect, "controller dialect resolved");
        self.dialect = Some(dialect);
        Ok(dialect)
    }

    // ── Authentication ───────────────────────────────────────────────

    /// Make sure the session holds a current token.
    ///
    /// Returns immediately when the token is still fresh; otherwise runs
    /// the dialect's logon handshake and records the new token.
    pub async fn logon(&mut self) -> Result<(), Error> {
        if self.token_is_current() {
            return Ok(());
        }

        let dialect = self.resolve_dialect().await?;
        let issued_at = Instant::now();
        let credential = dialect
            .authenticate(&Logon {
                http: &self.http,
                host_url: &self.host_url,
                username: &self.username,
                password: &self.password,
                lifetime: self.lifetime,
                domain: &self.domain,
            })
            .await?;

        self.token = Some(AuthToken::new(credential, issued_at, self.lifetime));
        Ok(())
    }

    /// Invalidate the token server-side where the dialect supports it,
    /// then drop it locally. Never fails: a rejected logout is logged.
    pub async fn logout(&mut self) {
        if let Some(path) = self.logout_path() {
            match self.api_url(path) {
                Ok(url) => {
                    debug!("logging out at {url}");
                    let request = self.authorize(self.http.post(url));
                    match request.send().await {
                        Ok(resp) if resp.status().is_success() => debug!("logout complete"),
                        Ok(resp) => warn!(status = %resp.status(), "controller rejected logout"),
                        Err(e) => warn!(error = %e, "logout request failed"),
                    }
                }
                Err(e) => warn!(error = %e, "cannot build logout URL"),
            }
        }
        self.token = None;
    }

    /// Logout endpoint, if the dialect has one and there is a live token.
    fn logout_path(&self) -> Option<&'static str> {
        let dialect = self.dialect?;
        if !self.token_is_current() {
            return None;
        }
        dialect.endpoints().logout
    }

    /// The endpoint façade for the resolved dialect, authenticating first.
    pub async fn api(&mut self) -> Result<Api<'_>, Error> {
        self.logon().await?;
        let dialect = self.dialect.ok_or(Error::NotResolved)?;
        let endpoints = *self.endpoints.get_or_insert(dialect.endpoints());
        Ok(Api::new(self, endpoints))
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// GET `{base}{path}` and decode the JSON body.
    pub async fn get<T: DeserializeOwned>(&mut self, path: &str) -> Result<T, Error> {
        self.request(Method::GET, path, &[], None::<&()>).await
    }

    /// GET `{base}{path}?{query}` and decode the JSON body.
    pub async fn get_with_query<T: DeserializeOwned>(
        &mut self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, Error> {
        self.request(Method::GET, path, query, None::<&()>).await
    }

    /// POST a JSON body to `{base}{path}` and decode the JSON response.
    pub async fn post<T, B>(&mut self, path: &str, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + Sync + ?Sized,
    {
        self.request(Method::POST, path, &[], Some(body)).await
    }

    /// PUT a JSON body to `{base}{path}` and decode the JSON response.
    pub async fn put<T, B>(&mut self, path: &str, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + Sync + ?Sized,
    {
        self.request(Method::PUT, path, &[], Some(body)).await
    }

    async fn request<T, B>(
        &mut self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + Sync + ?Sized,
    {
        self.logon().await?;

        let url = self.api_url(path)?;
        debug!("{method} {url}");

        let mut builder = self.http.request(method, url);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let resp = self.authorize(builder).send().await?;
        decode_response(resp).await
    }

    /// Attach the header token, if the dialect uses one.
    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.token.as_ref().map(AuthToken::credential) {
            Some(Credential::Header { name, value }) => builder.header(*name, value.clone()),
            _ => builder,
        }
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// `{host}{dialect base}{path}`.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        let dialect = self.dialect.ok_or(Error::NotResolved)?;
        let base = self.host_url.as_str().trim_end_matches('/');
        let prefix = dialect.endpoints().base.trim_end_matches('/');
        Url::parse(&format!("{base}{prefix}{path}")).map_err(Error::InvalidUrl)
    }
}

/// Turn a bare host or URL into the controller root URL.
fn controller_url(host: &str) -> Result<Url, Error> {
    let raw = if host.contains("://") {
        host.to_owned()
    } else {
        format!("https://{host}")
    };
    let mut url = Url::parse(&raw)?;
    url.set_path("/");
    url.set_query(None);
    Ok(url)
}

/// Fail on non-2xx, otherwise decode the JSON body. An empty 2xx body
/// decodes as JSON `null`.
pub(crate) async fn decode_response<T: DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, Error> {
    let status = resp.status();
    let url = resp.url().to_string();
    let body = resp.text().await?;

    if !status.is_success() {
        return Err(Error::Http {
            status: status.as_u16(),
            url,
            body: preview(&body).to_owned(),
        });
    }

    let text = if body.trim().is_empty() { "null" } else { &body };
    serde_json::from_str(text).map_err(|e| Error::Deserialization {
        message: format!("{e} (body preview: {:?})", preview(&body)),
        body: body.clone(),
    })
}

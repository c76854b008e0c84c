// Dialect endpoint façade
//
// `Api` borrows an authenticated session together with the resolved
// dialect's endpoint table. Endpoint methods live in sibling files as
// inherent impls; the table decides the concrete paths, and endpoints a
// dialect lacks fail with `Error::UnsupportedOperation`.

mod fabrics;
mod inventory;
pub mod models;
mod templates;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::dialect::Dialect;
use crate::error::Error;
use crate::session::Session;

/// Endpoint table for one dialect.
///
/// `logon` is rooted at the controller host; every other path is
/// relative to `base`.
#[derive(Debug, PartialEq, Eq)]
pub struct Endpoints {
    pub base: &'static str,
    pub logon: &'static str,
    pub logout: Option<&'static str>,
    pub fabrics: &'static str,
    pub switch_roles: &'static str,
    pub inventory: &'static str,
    pub templates: Option<&'static str>,
}

/// Endpoint methods bound to an authenticated session.
pub struct Api<'s> {
    session: &'s mut Session,
    endpoints: &'static Endpoints,
}

impl<'s> Api<'s> {
    pub(crate) fn new(session: &'s mut Session, endpoints: &'static Endpoints) -> Self {
        Self { session, endpoints }
    }

    pub fn endpoints(&self) -> &'static Endpoints {
        self.endpoints
    }

    /// The dialect this façade was built for.
    pub fn dialect(&self) -> Result<Dialect, Error> {
        self.session.dialect().ok_or(Error::NotResolved)
    }

    /// Whether the template endpoints exist in this dialect.
    pub fn supports_templates(&self) -> bool {
        self.endpoints.templates.is_some()
    }

    // ── Generic REST helpers (all responses are JSON) ────────────────

    pub async fn get<T: DeserializeOwned>(&mut self, path: &str) -> Result<T, Error> {
        self.session.get(path).await
    }

    pub async fn post<T, B>(&mut self, path: &str, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + Sync + ?Sized,
    {
        self.session.post(path, body).await
    }

    pub async fn put<T, B>(&mut self, path: &str, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + Sync + ?Sized,
    {
        self.session.put(path, body).await
    }

    /// `{base}/{name}` with `name` escaped as a single path segment.
    fn named(base: &str, name: &str) -> String {
        format!("{base}/{}", urlencoding::encode(name))
    }

    /// Path of an optional endpoint, or `UnsupportedOperation`.
    fn require(
        &self,
        endpoint: Option<&'static str>,
        operation: &'static str,
    ) -> Result<&'static str, Error> {
        match endpoint {
            Some(path) => Ok(path),
            None => Err(Error::UnsupportedOperation {
                operation,
                dialect: self.dialect()?,
            }),
        }
    }
}

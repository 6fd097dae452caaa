//! HTTP [`Gateway`] implementation.

mod impls;

use std::sync::{Arc, PoisonError, RwLock};

use derive_more::{Display, Error as StdError, From};
use reqwest::{Method, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use tracerr::Traced;

#[cfg(doc)]
use crate::infra::Gateway;
use crate::{domain::session, infra::gateway};

/// Configuration of an [`Http`] gateway.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the API.
    pub base_url: String,

    /// Base URL the asset storage paths are resolved against.
    ///
    /// [`Config::base_url`] is used when omitted.
    pub storage_base_url: Option<String>,
}

/// HTTP [`Gateway`] client.
///
/// A single shared client carrying a mutable default `Authorization` slot:
/// the bearer token is attached to every outgoing request while present,
/// and omitted entirely while absent. No retries, no response caching, no
/// token refresh.
#[derive(Clone, Debug)]
pub struct Http {
    /// Underlying HTTP client.
    client: reqwest::Client,

    /// Base URL of the API.
    base_url: String,

    /// Base URL for resolving asset storage paths.
    storage_base_url: String,

    /// Default `Authorization` bearer token, if any.
    auth: Arc<RwLock<Option<session::Token>>>,
}

impl Http {
    /// Creates a new [`Http`] gateway with the provided [`Config`].
    ///
    /// # Errors
    ///
    /// If the underlying HTTP client cannot be initialized.
    pub fn new(conf: Config) -> Result<Self, Traced<gateway::Error>> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;

        let Config {
            base_url,
            storage_base_url,
        } = conf;

        Ok(Self {
            client,
            storage_base_url: storage_base_url
                .unwrap_or_else(|| base_url.clone()),
            base_url,
            auth: Arc::new(RwLock::new(None)),
        })
    }

    /// Replaces the default `Authorization` bearer token attached to every
    /// request.
    fn set_auth(&self, token: Option<session::Token>) {
        *self.auth.write().unwrap_or_else(PoisonError::into_inner) = token;
    }

    /// Resolves the provided API `path` against the base URL.
    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/'),
        )
    }

    /// Resolves the provided asset storage `path` against the storage base
    /// URL.
    ///
    /// Absolute URLs pass through untouched.
    fn asset_url(&self, path: &str) -> String {
        if path.is_empty() || path.starts_with("http") {
            return path.to_owned();
        }
        format!(
            "{}/{}",
            self.storage_base_url.trim_end_matches('/'),
            path.trim_start_matches('/'),
        )
    }

    /// Sends the described request and returns its raw response once the
    /// status is checked.
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<reqwest::Response, Traced<gateway::Error>> {
        use Error as E;

        let auth = self
            .auth
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        let mut req = self.client.request(method, self.endpoint(path));
        if let Some(token) = auth {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.json(&body);
        }

        let resp = req
            .send()
            .await
            .map_err(tracerr::from_and_wrap!(=> E))
            .map_err(tracerr::map_from)?;

        match resp.status() {
            StatusCode::UNAUTHORIZED => Err(E::Unauthorized),
            StatusCode::FORBIDDEN => Err(E::Forbidden),
            s if s.is_success() => return Ok(resp),
            s => Err(E::UnexpectedStatus(s)),
        }
        .map_err(|e| tracerr::new!(e))
        .map_err(tracerr::map_from)
    }

    /// Executes the described request and decodes the enveloped `data` out
    /// of its response.
    async fn fetch<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, Traced<gateway::Error>> {
        use Error as E;

        self.send(method, path, body)
            .await
            .map_err(tracerr::wrap!())?
            .json::<Envelope<T>>()
            .await
            .map(|envelope| envelope.data)
            .map_err(|e| tracerr::new!(E::Decode(e)))
            .map_err(tracerr::map_from)
    }

    /// Executes the described request, discarding the response payload.
    async fn perform(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<(), Traced<gateway::Error>> {
        self.send(method, path, body)
            .await
            .map(drop)
            .map_err(tracerr::wrap!())
    }
}

/// Envelope every API response wraps its payload into.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    /// Enveloped payload.
    data: T,
}

/// HTTP [`Gateway`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Request was not authorized by the server (HTTP 401).
    #[display("Request was not authorized")]
    Unauthorized,

    /// Request was refused by the server (HTTP 403).
    #[display("Request was refused")]
    Forbidden,

    /// Server responded with an unexpected status.
    #[display("Unexpected `{_0}` response status")]
    #[from(ignore)]
    UnexpectedStatus(#[error(not(source))] StatusCode),

    /// Transport-level failure.
    #[display("HTTP request failed: {_0}")]
    Transport(reqwest::Error),

    /// Response payload could not be decoded.
    #[display("Cannot decode response payload: {_0}")]
    #[from(ignore)]
    Decode(reqwest::Error),

    /// Response payload has an unexpected shape.
    #[display("Malformed response payload: {_0}")]
    #[from(ignore)]
    Malformed(#[error(not(source))] String),
}

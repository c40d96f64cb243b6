// Platform API HTTP client
//
// Wraps `reqwest::Client` with base-URL construction, bearer-token
// attachment, and error-body decoding. All endpoint groups (auth,
// vehicles, rentals, pricing, reference data) are implemented as
// inherent methods via separate files to keep this module focused on
// transport mechanics.

use arc_swap::ArcSwapOption;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Raw HTTP client for the rental platform's REST API.
///
/// Holds the bearer token in a swap slot so a single client can live
/// across login/logout without rebuilding the connection pool. Every
/// request attaches the token when one is set; any 401 response drops
/// the in-memory token and surfaces [`Error::SessionExpired`] so the
/// caller can clear its persisted copy and re-authenticate.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: ArcSwapOption<SecretString>,
}

impl ApiClient {
    /// Create a new client from a base URL (e.g. `https://host/api`)
    /// and a `TransportConfig`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            token: ArcSwapOption::empty(),
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            token: ArcSwapOption::empty(),
        }
    }

    /// The API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Install a bearer token for subsequent requests.
    pub fn set_token(&self, token: SecretString) {
        self.token.store(Some(std::sync::Arc::new(token)));
    }

    /// Drop the in-memory bearer token.
    pub fn clear_token(&self) {
        self.token.store(None);
    }

    /// Whether a bearer token is currently installed.
    pub fn has_token(&self) -> bool {
        self.token.load().is_some()
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build a full URL for an API path relative to the base URL.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        let full = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&full).map_err(Error::InvalidUrl)
    }

    // ── Request helpers ──────────────────────────────────────────────

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.token.load_full() {
            Some(token) => req.bearer_auth(token.expose_secret()),
            None => req,
        }
    }

    /// Send a GET request and decode the JSON response.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);
        let resp = self
            .authorize(self.http.get(url))
            .send()
            .await
            .map_err(Error::Transport)?;
        self.parse_body(resp).await
    }

    /// Send a GET request with query parameters and decode the response.
    pub(crate) async fn get_query<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &impl Serialize,
    ) -> Result<T, Error> {
        debug!("GET {}", url);
        let resp = self
            .authorize(self.http.get(url).query(query))
            .send()
            .await
            .map_err(Error::Transport)?;
        self.parse_body(resp).await
    }

    /// Send a POST request with a JSON body and decode the response.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &impl Serialize,
    ) -> Result<T, Error> {
        debug!("POST {}", url);
        let resp = self
            .authorize(self.http.post(url).json(body))
            .send()
            .await
            .map_err(Error::Transport)?;
        self.parse_body(resp).await
    }

    /// Send a bodyless POST request and discard the response body.
    pub(crate) async fn post_unit(&self, url: Url) -> Result<(), Error> {
        debug!("POST {}", url);
        let resp = self
            .authorize(self.http.post(url))
            .send()
            .await
            .map_err(Error::Transport)?;
        self.check_status(resp).await.map(|_| ())
    }

    /// Send a POST with a typed JSON body and discard the response.
    pub(crate) async fn post_body_unit(
        &self,
        url: Url,
        body: &impl Serialize,
    ) -> Result<(), Error> {
        debug!("POST {}", url);
        let resp = self
            .authorize(self.http.post(url).json(body))
            .send()
            .await
            .map_err(Error::Transport)?;
        self.check_status(resp).await.map(|_| ())
    }

    /// Send a POST with a form-encoded body and discard the response.
    pub(crate) async fn post_form_unit(
        &self,
        url: Url,
        form: &impl Serialize,
    ) -> Result<(), Error> {
        debug!("POST {}", url);
        let resp = self
            .authorize(self.http.post(url).form(form))
            .send()
            .await
            .map_err(Error::Transport)?;
        self.check_status(resp).await.map(|_| ())
    }

    /// Send a PUT request with a JSON body and decode the response.
    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &impl Serialize,
    ) -> Result<T, Error> {
        debug!("PUT {}", url);
        let resp = self
            .authorize(self.http.put(url).json(body))
            .send()
            .await
            .map_err(Error::Transport)?;
        self.parse_body(resp).await
    }

    /// Send a DELETE request and discard the response body.
    pub(crate) async fn delete_unit(&self, url: Url) -> Result<(), Error> {
        debug!("DELETE {}", url);
        let resp = self
            .authorize(self.http.delete(url))
            .send()
            .await
            .map_err(Error::Transport)?;
        self.check_status(resp).await.map(|_| ())
    }

    /// Send a POST without the shared status handling.
    ///
    /// Login needs this: a 401 there means bad credentials, not an
    /// expired session, and must not clear an unrelated token.
    pub(crate) async fn http_post_raw(
        &self,
        url: Url,
        body: &impl Serialize,
    ) -> Result<reqwest::Response, reqwest::Error> {
        debug!("POST {}", url);
        self.http.post(url).json(body).send().await
    }

    // ── Response handling ────────────────────────────────────────────

    /// Validate the status code, returning the raw body text on success.
    ///
    /// A 401 from ANY endpoint means the credential is gone: the
    /// in-memory token is dropped before the error is raised.
    pub(crate) async fn check_status(&self, resp: reqwest::Response) -> Result<String, Error> {
        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            self.clear_token();
            return Err(Error::SessionExpired);
        }

        let body = resp.text().await.map_err(Error::Transport)?;

        if !status.is_success() {
            return Err(Error::Api {
                message: extract_error_message(&body)
                    .unwrap_or_else(|| format!("HTTP {status}")),
                status: status.as_u16(),
            });
        }

        Ok(body)
    }

    async fn parse_body<T: DeserializeOwned>(&self, resp: reqwest::Response) -> Result<T, Error> {
        let body = self.check_status(resp).await?;

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }
}

/// Pull a human-readable message out of an error body.
///
/// The backend is inconsistent: plain controllers emit `{"message": ...}`,
/// the stored-procedure bridge emits `{"errorMessage": ...}` or
/// `{"ErrorMessage": ...}`, and some filters return bare text.
fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    for key in ["message", "errorMessage", "ErrorMessage", "error"] {
        if let Some(msg) = value.get(key).and_then(serde_json::Value::as_str) {
            if !msg.is_empty() {
                return Some(msg.to_owned());
            }
        }
    }
    None
}

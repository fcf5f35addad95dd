//! Shared request plumbing for both API clients
//!
//! One request per call, no retries. The bearer token is read from the
//! [`Session`] on every request, so a refresh or logout takes effect on the
//! next call without rebuilding the client.

use dynzones_core::{Error, Result, Session};
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Default HTTP timeout for API requests (30 seconds)
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub(crate) struct ApiClient {
    base_url: Url,
    session: Session,
    client: reqwest::Client,
}

impl ApiClient {
    pub(crate) fn new(base_url: Url, session: Session, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url,
            session,
            client,
        })
    }

    pub(crate) fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Start a request to `path`, relative to the base URL
    pub(crate) async fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.base_url.join(path)?;
        tracing::debug!(%method, %url, "API request");

        let mut request = self.client.request(method, url);
        if let Some(value) = self.session.authorization_header().await {
            request = request.header(AUTHORIZATION, value);
        }
        Ok(request)
    }

    /// Send a request and turn non-success statuses into errors
    pub(crate) async fn send(&self, request: RequestBuilder, what: &str) -> Result<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::http(format!("{what}: request failed: {e}")))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error response".to_string());

        tracing::debug!(status = status.as_u16(), what, "API request failed");
        Err(status_error(status, body, what))
    }

    /// Send a request and decode the JSON body
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        what: &str,
    ) -> Result<T> {
        let response = self.send(request, what).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::http(format!("{what}: failed to read response: {e}")))?;

        serde_json::from_slice(&bytes)
            .map_err(|e| Error::invalid_response(format!("{what}: {e}")))
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Map an HTTP status to an error
pub(crate) fn status_error(status: StatusCode, body: String, what: &str) -> Error {
    match status.as_u16() {
        401 | 403 => Error::auth(format!(
            "{what}: not logged in or insufficient permissions. Status: {status}"
        )),
        404 => Error::not_found(what.to_string()),
        429 => Error::rate_limited(format!("{what}: please retry later. Status: {status}")),
        code => {
            let message = if body.is_empty() {
                status.canonical_reason().unwrap_or("unknown status").to_string()
            } else {
                body
            };
            Error::api(code, format!("{what}: {message}"))
        }
    }
}

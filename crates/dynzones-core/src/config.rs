//! Configuration types for the Dynamic Zones client
//!
//! [`AppConfig`] is created once at startup and passed to whoever builds API
//! clients. It replaces any global application state.

use serde::{Deserialize, Serialize};
use url::Url;

/// Main client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the Dynamic Zones API (zones, records, tokens, `config.json`)
    pub api_base_url: Url,

    /// Base URL of the self-service API serving policy rules.
    /// Defaults to `api_base_url` when unset.
    #[serde(default)]
    pub self_service_base_url: Option<Url>,

    /// OpenID Connect settings for interactive login
    #[serde(default)]
    pub oidc: Option<OidcConfig>,

    /// HTTP request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl AppConfig {
    /// Create a configuration with defaults for everything but the API URL
    pub fn new(api_base_url: Url) -> Self {
        Self {
            api_base_url,
            self_service_base_url: None,
            oidc: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }

    /// Set the self-service base URL
    pub fn with_self_service_base_url(mut self, url: Url) -> Self {
        self.self_service_base_url = Some(url);
        self
    }

    /// Set the OIDC settings
    pub fn with_oidc(mut self, oidc: OidcConfig) -> Self {
        self.oidc = Some(oidc);
        self
    }

    /// Base URL for policy calls
    pub fn policy_base_url(&self) -> &Url {
        self.self_service_base_url
            .as_ref()
            .unwrap_or(&self.api_base_url)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        validate_base_url("API base URL", &self.api_base_url)?;

        if let Some(ref url) = self.self_service_base_url {
            validate_base_url("self-service base URL", url)?;
        }

        if let Some(ref oidc) = self.oidc {
            oidc.validate()?;
        }

        if self.request_timeout_secs == 0 {
            return Err(crate::Error::config("Request timeout must be > 0"));
        }

        Ok(())
    }
}

/// OpenID Connect provider settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OidcConfig {
    /// Issuer URL of the identity provider
    pub issuer_url: String,
    /// Client ID registered for this front end
    pub client_id: String,
}

impl OidcConfig {
    /// Validate the OIDC settings
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.issuer_url.is_empty() {
            return Err(crate::Error::config("OIDC issuer URL cannot be empty"));
        }
        if !self.issuer_url.starts_with("https://") && !self.issuer_url.starts_with("http://") {
            return Err(crate::Error::config(format!(
                "OIDC issuer URL must use HTTP or HTTPS scheme. Got: {}",
                self.issuer_url
            )));
        }
        if self.client_id.is_empty() {
            return Err(crate::Error::config("OIDC client ID cannot be empty"));
        }
        Ok(())
    }
}

fn validate_base_url(what: &str, url: &Url) -> Result<(), crate::Error> {
    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(crate::Error::config(format!(
                "{what} must use HTTP or HTTPS scheme. Got: {other}"
            )));
        }
    }

    // Relative joins drop the last path segment unless the base ends with '/'
    if !url.path().ends_with('/') {
        return Err(crate::Error::config(format!(
            "{what} must end with '/'. Got: {url}"
        )));
    }

    Ok(())
}

fn default_request_timeout_secs() -> u64 {
    30
}

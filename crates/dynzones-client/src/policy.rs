//! HTTP implementation of [`PolicyApi`]
//!
//! ## API Reference
//!
//! - GET/POST `v1/policies/rules`
//! - PUT/DELETE `v1/policies/rules/:id`

use async_trait::async_trait;
use dynzones_core::models::{RuleDraft, RulesResponse};
use dynzones_core::{AppConfig, PolicyApi, Result, Session};
use reqwest::Method;
use std::time::Duration;
use url::Url;

use crate::http::{ApiClient, DEFAULT_HTTP_TIMEOUT};

/// Self-service policy API over HTTP
#[derive(Debug, Clone)]
pub struct HttpPolicyApi {
    http: ApiClient,
}

impl HttpPolicyApi {
    /// Create a client for the self-service API at `base_url` (must end with '/')
    pub fn new(base_url: Url, session: Session) -> Result<Self> {
        Self::with_timeout(base_url, session, DEFAULT_HTTP_TIMEOUT)
    }

    /// Create a client with a custom request timeout
    pub fn with_timeout(base_url: Url, session: Session, timeout: Duration) -> Result<Self> {
        Ok(Self {
            http: ApiClient::new(base_url, session, timeout)?,
        })
    }

    /// Create a client from the application configuration
    pub fn from_config(config: &AppConfig, session: Session) -> Result<Self> {
        Self::with_timeout(
            config.policy_base_url().clone(),
            session,
            Duration::from_secs(config.request_timeout_secs),
        )
    }
}

#[async_trait]
impl PolicyApi for HttpPolicyApi {
    async fn list_rules(&self) -> Result<RulesResponse> {
        let request = self.http.request(Method::GET, "v1/policies/rules").await?;
        self.http.send_json(request, "policy rules").await
    }

    async fn create_rule(&self, draft: &RuleDraft) -> Result<()> {
        let request = self
            .http
            .request(Method::POST, "v1/policies/rules")
            .await?
            .json(draft);
        self.http.send(request, "create policy rule").await?;
        Ok(())
    }

    async fn update_rule(&self, id: &str, draft: &RuleDraft) -> Result<()> {
        let request = self
            .http
            .request(Method::PUT, &format!("v1/policies/rules/{id}"))
            .await?
            .json(draft);
        self.http.send(request, &format!("policy rule {id}")).await?;
        Ok(())
    }

    async fn delete_rule(&self, id: &str) -> Result<()> {
        let request = self
            .http
            .request(Method::DELETE, &format!("v1/policies/rules/{id}"))
            .await?;
        self.http.send(request, &format!("policy rule {id}")).await?;
        Ok(())
    }
}

// # Session
//
// Authentication context shared by everything that talks to the API.
//
// ## Lifecycle
//
// - Created anonymous at startup with `Session::new()`
// - `login()` after the identity provider returned a user
// - `refresh()` when a new access token was issued
// - `logout()` on sign-out or when the token is revoked
//
// Clones share state, so an HTTP client holding a clone picks up a refreshed
// token on its next request. Expired tokens are never handed out.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{Error, Result};

/// Logged-in user as returned by the OpenID Connect provider
#[derive(Clone, PartialEq, Eq)]
pub struct SessionUser {
    /// Bearer token for API calls
    pub access_token: String,
    /// E-mail claim, if the provider sent one
    pub email: Option<String>,
    /// Token expiry; `None` means no known expiry
    pub expires_at: Option<DateTime<Utc>>,
}

impl SessionUser {
    /// Create a user with an access token and no known expiry
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            email: None,
            expires_at: None,
        }
    }

    /// Set the e-mail claim
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the token expiry
    pub fn with_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Whether the access token is expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| exp <= now)
    }
}

// Custom Debug implementation that hides the access token
impl std::fmt::Debug for SessionUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionUser")
            .field("access_token", &"<REDACTED>")
            .field("email", &self.email)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Shared handle to the current login state
#[derive(Debug, Clone, Default)]
pub struct Session {
    inner: Arc<RwLock<Option<SessionUser>>>,
}

impl Session {
    /// Create an anonymous session
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session that is already logged in
    pub fn with_user(user: SessionUser) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Some(user))),
        }
    }

    /// Store the user returned by the identity provider
    pub async fn login(&self, user: SessionUser) {
        tracing::info!(
            email = user.email.as_deref().unwrap_or("<unknown>"),
            "Session started"
        );
        *self.inner.write().await = Some(user);
    }

    /// Replace the access token after a renewal
    pub async fn refresh(
        &self,
        access_token: impl Into<String>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<()> {
        let mut guard = self.inner.write().await;
        let user = guard
            .as_mut()
            .ok_or_else(|| Error::auth("cannot refresh a session nobody is logged into"))?;

        user.access_token = access_token.into();
        user.expires_at = expires_at;
        tracing::debug!("Session token refreshed");
        Ok(())
    }

    /// Drop the user
    pub async fn logout(&self) {
        if self.inner.write().await.take().is_some() {
            tracing::info!("Session ended");
        }
    }

    /// Current user, including an expired one
    pub async fn user(&self) -> Option<SessionUser> {
        self.inner.read().await.clone()
    }

    /// Whether a user with a live token is present
    pub async fn is_authenticated(&self) -> bool {
        self.access_token().await.is_some()
    }

    /// Access token if present and not expired
    pub async fn access_token(&self) -> Option<String> {
        let guard = self.inner.read().await;
        let user = guard.as_ref()?;

        if user.is_expired_at(Utc::now()) {
            tracing::debug!("Access token expired, sending request without credentials");
            return None;
        }

        Some(user.access_token.clone())
    }

    /// Value for the `Authorization` header, if a live token is present
    pub async fn authorization_header(&self) -> Option<String> {
        self.access_token().await.map(|t| format!("Bearer {t}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_session_lifecycle() {
        let session = Session::new();
        assert!(!session.is_authenticated().await);
        assert!(session.authorization_header().await.is_none());

        session
            .login(SessionUser::new("abc").with_email("alice@example.com"))
            .await;
        assert_eq!(session.authorization_header().await.as_deref(), Some("Bearer abc"));

        session.refresh("def", None).await.unwrap();
        assert_eq!(session.access_token().await.as_deref(), Some("def"));
        assert_eq!(
            session.user().await.and_then(|u| u.email).as_deref(),
            Some("alice@example.com")
        );

        session.logout().await;
        assert!(session.user().await.is_none());
        assert!(!session.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let session = Session::new();
        let observer = session.clone();

        session.login(SessionUser::new("abc")).await;
        assert_eq!(observer.access_token().await.as_deref(), Some("abc"));

        session.logout().await;
        assert!(observer.access_token().await.is_none());
    }

    #[tokio::test]
    async fn test_expired_token_is_not_used() {
        let expired = SessionUser::new("old").with_expires_at(Utc::now() - Duration::minutes(1));
        let session = Session::with_user(expired);

        assert!(session.user().await.is_some());
        assert!(session.access_token().await.is_none());

        session
            .refresh("new", Some(Utc::now() + Duration::hours(1)))
            .await
            .unwrap();
        assert_eq!(session.access_token().await.as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn test_refresh_without_login_fails() {
        let session = Session::new();
        let err = session.refresh("abc", None).await.unwrap_err();
        assert!(matches!(err, Error::Authentication(_)));
    }

    #[test]
    fn test_debug_redacts_token() {
        let user = SessionUser::new("super-secret-token");
        assert!(!format!("{user:?}").contains("super-secret-token"));
    }
}

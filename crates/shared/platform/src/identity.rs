//! Identity provider client.
//!
//! Holds the current session in memory and broadcasts every change to it.
//! The session reconciler is the only intended subscriber.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info, warn};

use common::{AppError, AppResult, PlatformConfig};
use domain::{AuthSession, AuthUser, UserMetadata};

use crate::token::AccessToken;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Capacity of the session-change channel
const EVENT_CAPACITY: usize = 16;

/// Kind of session change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
}

/// Session-change notification; `session` is `None` after sign-out.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthChange {
    pub event: AuthEvent,
    pub session: Option<AuthSession>,
}

/// Result of a sign-up. `session` is absent when the provider requires
/// email confirmation before the first sign-in.
#[derive(Debug, Clone, PartialEq)]
pub struct SignUpResponse {
    pub user: AuthUser,
    pub session: Option<AuthSession>,
}

/// Identity provider trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Current session, if any
    async fn get_session(&self) -> AppResult<Option<AuthSession>>;

    /// Subscribe to session changes
    fn on_session_change(&self) -> broadcast::Receiver<AuthChange>;

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: UserMetadata,
    ) -> AppResult<SignUpResponse>;

    async fn sign_in_with_password(&self, email: &str, password: &str) -> AppResult<AuthSession>;

    async fn sign_out(&self) -> AppResult<()>;

    /// Fetch the signed-in user from the provider
    async fn get_current_user(&self) -> AppResult<AuthUser>;

    async fn refresh_session(&self) -> AppResult<AuthSession>;
}

/// Provider error body; different endpoints fill different fields
#[derive(Debug, Default, Deserialize)]
struct AuthErrorBody {
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl AuthErrorBody {
    fn into_message(self) -> Option<String> {
        self.msg
            .or(self.error_description)
            .or(self.message)
            .or(self.error)
    }
}

/// HTTP implementation of [`IdentityProvider`].
pub struct RestIdentity {
    client: Client,
    base_url: String,
    anon_key: String,
    session: RwLock<Option<AuthSession>>,
    events: broadcast::Sender<AuthChange>,
    token: AccessToken,
}

impl RestIdentity {
    pub fn new(client: Client, config: &PlatformConfig, token: AccessToken) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            client,
            base_url: config.auth_url(),
            anon_key: config.anon_key.clone(),
            session: RwLock::new(None),
            events,
            token,
        }
    }

    /// Start from a previously persisted session
    pub fn with_session(self, session: AuthSession) -> Self {
        self.token.set(Some(session.access_token.clone()));
        Self {
            session: RwLock::new(Some(session)),
            ..self
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn request(&self, request: RequestBuilder) -> RequestBuilder {
        request.header("apikey", &self.anon_key)
    }

    async fn current_token(&self) -> AppResult<String> {
        self.session
            .read()
            .await
            .as_ref()
            .map(|s| s.access_token.clone())
            .ok_or(AppError::Unauthorized)
    }

    async fn store_session(&self, event: AuthEvent, session: Option<AuthSession>) {
        self.token
            .set(session.as_ref().map(|s| s.access_token.clone()));
        *self.session.write().await = session.clone();

        // No subscribers is not an error
        let _ = self.events.send(AuthChange { event, session });
    }

    async fn rejected(response: Response) -> AppError {
        let status = response.status();
        let body: AuthErrorBody = response.json().await.unwrap_or_default();
        let message = body
            .into_message()
            .unwrap_or_else(|| format!("Request rejected ({})", status));
        debug!(%status, %message, "Identity provider rejected request");
        AppError::auth_rejected(message)
    }
}

#[async_trait]
impl IdentityProvider for RestIdentity {
    async fn get_session(&self) -> AppResult<Option<AuthSession>> {
        Ok(self.session.read().await.clone())
    }

    fn on_session_change(&self) -> broadcast::Receiver<AuthChange> {
        self.events.subscribe()
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: UserMetadata,
    ) -> AppResult<SignUpResponse> {
        let response = self
            .request(self.client.post(self.url("signup")))
            .json(&json!({ "email": email, "password": password, "data": metadata }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::rejected(response).await);
        }

        let body: Value = response.json().await?;
        let signed_up = parse_sign_up(body)?;
        info!(user_id = %signed_up.user.id, confirmed = signed_up.session.is_some(), "Account created");

        if let Some(session) = &signed_up.session {
            self.store_session(AuthEvent::SignedIn, Some(session.clone()))
                .await;
        }
        Ok(signed_up)
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        let response = self
            .request(self.client.post(self.url("token")))
            .query(&[("grant_type", "password")])
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::rejected(response).await);
        }

        let session: AuthSession = response.json().await?;
        info!(user_id = %session.user.id, "Signed in");
        self.store_session(AuthEvent::SignedIn, Some(session.clone()))
            .await;
        Ok(session)
    }

    async fn sign_out(&self) -> AppResult<()> {
        if let Ok(token) = self.current_token().await {
            let result = self
                .request(self.client.post(self.url("logout")))
                .bearer_auth(token)
                .send()
                .await;

            match result {
                Ok(response) if !response.status().is_success() => {
                    warn!(status = %response.status(), "Remote sign-out rejected");
                }
                Err(e) => warn!(error = %e, "Remote sign-out failed"),
                Ok(_) => {}
            }
        }

        self.store_session(AuthEvent::SignedOut, None).await;
        info!("Signed out");
        Ok(())
    }

    async fn get_current_user(&self) -> AppResult<AuthUser> {
        let token = self.current_token().await?;
        let response = self
            .request(self.client.get(self.url("user")))
            .bearer_auth(token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::rejected(response).await);
        }
        Ok(response.json().await?)
    }

    async fn refresh_session(&self) -> AppResult<AuthSession> {
        let refresh_token = self
            .session
            .read()
            .await
            .as_ref()
            .and_then(|s| s.refresh_token.clone())
            .ok_or(AppError::Unauthorized)?;

        let response = self
            .request(self.client.post(self.url("token")))
            .query(&[("grant_type", "refresh_token")])
            .json(&json!({ "refresh_token": refresh_token }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::rejected(response).await);
        }

        let session: AuthSession = response.json().await?;
        debug!(user_id = %session.user.id, "Session refreshed");
        self.store_session(AuthEvent::TokenRefreshed, Some(session.clone()))
            .await;
        Ok(session)
    }
}

/// Sign-up answers with a full session when no confirmation is required,
/// otherwise with the bare user (optionally wrapped in `user`).
fn parse_sign_up(body: Value) -> AppResult<SignUpResponse> {
    if body.get("access_token").is_some() {
        let session: AuthSession = serde_json::from_value(body)?;
        return Ok(SignUpResponse {
            user: session.user.clone(),
            session: Some(session),
        });
    }

    let user_value = match body.get("user") {
        Some(user) if !user.is_null() => user.clone(),
        _ => body,
    };
    Ok(SignUpResponse {
        user: serde_json::from_value(user_value)?,
        session: None,
    })
}

//! Auth service client (sessions, sign-up, user metadata)

use crate::client::{error_for_status, handle_response, Transport};
use crate::error::{BackendError, Result};
use crate::types::{
    AuthUser, PasswordCredentials, RefreshRequest, Session, SignUpRequest, SignUpResponse,
    UserAttributes,
};
use serde_json::{Map, Value};

const AUTH_PATH: &str = "auth/v1";

/// Client for the hosted auth service.
///
/// A successful sign-in or refresh stores the access token on the shared
/// transport; sign-out clears it.
#[derive(Clone)]
pub struct AuthClient {
    transport: Transport,
}

impl AuthClient {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    fn url(&self, path: &str) -> String {
        self.transport.url(&format!("{}/{}", AUTH_PATH, path))
    }

    /// Sign in with email and password
    pub async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session> {
        let body = PasswordCredentials {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response = self
            .transport
            .http()
            .post(self.url("token"))
            .query(&[("grant_type", "password")])
            .json(&body)
            .send()
            .await?;

        let session: Session = handle_response(response).await?;
        self.transport
            .set_access_token(Some(session.access_token.clone()))
            .await;
        tracing::info!(user_id = %session.user.id, "Signed in");
        Ok(session)
    }

    /// Register a new account with metadata (e.g. name and role).
    ///
    /// Does not change the current session.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        data: Map<String, Value>,
    ) -> Result<AuthUser> {
        let body = SignUpRequest {
            email: email.to_string(),
            password: password.to_string(),
            data,
        };

        let response = self
            .transport
            .http()
            .post(self.url("signup"))
            .json(&body)
            .send()
            .await?;

        let signed_up: SignUpResponse = handle_response(response).await?;
        tracing::info!(user_id = %signed_up.user().id, "Signed up");
        Ok(signed_up.user().clone())
    }

    /// Exchange a refresh token for a new session
    pub async fn refresh_session(&self, refresh_token: &str) -> Result<Session> {
        let response = self
            .transport
            .http()
            .post(self.url("token"))
            .query(&[("grant_type", "refresh_token")])
            .json(&RefreshRequest { refresh_token })
            .send()
            .await?;

        let session: Session = handle_response(response).await?;
        self.transport
            .set_access_token(Some(session.access_token.clone()))
            .await;
        Ok(session)
    }

    /// Fetch the user behind the current access token
    pub async fn get_user(&self) -> Result<AuthUser> {
        self.require_token().await?;
        let request = self.transport.http().get(self.url("user"));
        let response = self.transport.authorize(request).await.send().await?;
        handle_response(response).await
    }

    /// Update metadata and/or password of the signed-in user
    pub async fn update_user(&self, attributes: &UserAttributes) -> Result<AuthUser> {
        self.require_token().await?;
        let request = self.transport.http().put(self.url("user")).json(attributes);
        let response = self.transport.authorize(request).await.send().await?;
        handle_response(response).await
    }

    /// Revoke the current session.
    ///
    /// The local token is cleared even when the remote call fails.
    pub async fn sign_out(&self) -> Result<()> {
        let token = self.transport.access_token().await;
        self.transport.set_access_token(None).await;

        let Some(token) = token else {
            return Ok(());
        };

        let response = self
            .transport
            .http()
            .post(self.url("logout"))
            .bearer_auth(token)
            .send()
            .await?;
        error_for_status(response).await?;
        Ok(())
    }

    /// Adopt a token obtained elsewhere (e.g. a persisted session)
    pub async fn set_access_token(&self, token: Option<String>) {
        self.transport.set_access_token(token).await;
    }

    pub async fn access_token(&self) -> Option<String> {
        self.transport.access_token().await
    }

    async fn require_token(&self) -> Result<()> {
        if self.transport.access_token().await.is_none() {
            return Err(BackendError::Unauthorized {
                status: 401,
                message: "no active session".into(),
            });
        }
        Ok(())
    }
}

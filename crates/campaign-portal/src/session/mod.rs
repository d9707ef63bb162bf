//! Signed-in identity, derived from the auth service's session.
//!
//! Subscribers are told about every change through a watch channel, the way
//! views re-render on auth state changes.

use portal_backend_client::{AuthClient, BackendError, UserAttributes};
use serde_json::{Map, Value};
use tokio::sync::{watch, RwLock};
use tracing::{debug, info, warn};

use crate::error::{PortalError, Result};
use crate::model::{Identity, ProfileUpdate, Role};
use crate::validation::validate_password;

#[derive(Debug, Default)]
struct SessionState {
    identity: Option<Identity>,
    last_error: Option<String>,
}

/// Current user and the auth calls that change it
pub struct SessionStore {
    auth: AuthClient,
    state: RwLock<SessionState>,
    changes: watch::Sender<Option<Identity>>,
}

impl SessionStore {
    pub fn new(auth: AuthClient) -> Self {
        let (changes, _) = watch::channel(None);
        Self {
            auth,
            state: RwLock::new(SessionState::default()),
            changes,
        }
    }

    async fn set_identity(&self, identity: Option<Identity>) {
        self.state.write().await.identity = identity.clone();
        self.changes.send_replace(identity);
    }

    async fn record_error(&self, err: &BackendError) {
        self.state.write().await.last_error = Some(err.to_string());
    }

    /// Resume a persisted session.
    ///
    /// A token the service no longer accepts is dropped and yields `None`.
    pub async fn restore(&self, access_token: Option<String>) -> Result<Option<Identity>> {
        let Some(token) = access_token else {
            return Ok(None);
        };
        self.auth.set_access_token(Some(token)).await;

        match self.auth.get_user().await {
            Ok(user) => {
                let identity = Identity::from(&user);
                debug!(user_id = %identity.id, "Session restored");
                self.set_identity(Some(identity.clone())).await;
                Ok(Some(identity))
            }
            Err(e @ BackendError::Unauthorized { .. }) => {
                warn!(error = %e, "Persisted session rejected");
                self.auth.set_access_token(None).await;
                self.record_error(&e).await;
                self.set_identity(None).await;
                Ok(None)
            }
            Err(e) => {
                self.record_error(&e).await;
                Err(e.into())
            }
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Identity> {
        match self.auth.sign_in_with_password(email, password).await {
            Ok(session) => {
                let identity = Identity::from(&session.user);
                info!(user_id = %identity.id, role = %identity.role, "Signed in");
                self.state.write().await.last_error = None;
                self.set_identity(Some(identity.clone())).await;
                Ok(identity)
            }
            Err(e) => {
                warn!(email, error = %e, "Sign in failed");
                self.record_error(&e).await;
                Err(e.into())
            }
        }
    }

    /// Register a new account. The current session is left untouched.
    pub async fn sign_up(&self, email: &str, password: &str, name: &str, role: Role) -> Result<Identity> {
        let mut data = Map::new();
        data.insert("name".into(), Value::from(name));
        data.insert("role".into(), Value::from(role.as_str()));

        match self.auth.sign_up(email, password, data).await {
            Ok(user) => {
                info!(user_id = %user.id, %role, "Account created");
                Ok(Identity::from(&user))
            }
            Err(e) => {
                warn!(email, error = %e, "Sign up failed");
                self.record_error(&e).await;
                Err(e.into())
            }
        }
    }

    /// Drop the local session, then tell the service.
    ///
    /// Remote failures are logged and kept in [`SessionStore::last_error`].
    pub async fn logout(&self) {
        self.set_identity(None).await;
        if let Err(e) = self.auth.sign_out().await {
            warn!(error = %e, "Remote sign out failed");
            self.record_error(&e).await;
        } else {
            info!("Signed out");
        }
    }

    pub async fn update_profile(&self, profile: &ProfileUpdate) -> Result<Identity> {
        if !self.is_authenticated().await {
            return Err(PortalError::NotAuthenticated);
        }
        let attributes = UserAttributes {
            password: None,
            data: Some(profile.to_metadata()),
        };
        let user = self.auth.update_user(&attributes).await.map_err(|e| {
            warn!(error = %e, "Profile update failed");
            e
        })?;
        let identity = Identity::from(&user);
        self.set_identity(Some(identity.clone())).await;
        Ok(identity)
    }

    /// Change the password. Mismatched or empty input never reaches the service.
    pub async fn update_password(&self, new_password: &str, confirm: &str) -> Result<()> {
        validate_password(new_password, confirm)?;
        if !self.is_authenticated().await {
            return Err(PortalError::NotAuthenticated);
        }
        let attributes = UserAttributes {
            password: Some(new_password.to_string()),
            data: None,
        };
        self.auth.update_user(&attributes).await.map_err(|e| {
            warn!(error = %e, "Password update failed");
            e
        })?;
        info!("Password updated");
        Ok(())
    }

    pub async fn current(&self) -> Option<Identity> {
        self.state.read().await.identity.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.identity.is_some()
    }

    /// Receiver that sees every sign in, sign out and profile change
    pub fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.changes.subscribe()
    }

    pub async fn last_error(&self) -> Option<String> {
        self.state.read().await.last_error.clone()
    }

    /// Token to persist for [`SessionStore::restore`]
    pub async fn access_token(&self) -> Option<String> {
        self.auth.access_token().await
    }
}

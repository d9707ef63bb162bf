//! HTTP transport shared by the table, auth and storage clients

use crate::auth::AuthClient;
use crate::error::{BackendError, Result};
use crate::storage::StorageClient;
use crate::tables::TableClient;
use crate::types::{BackendConfig, ErrorBody};
use reqwest::{header, Client, RequestBuilder, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Entry point for the hosted backend.
///
/// All three sub-clients share one connection pool and one access token, so
/// signing in through [`AuthClient`] authenticates subsequent table and
/// storage calls.
///
/// # Example
///
/// ```rust,no_run
/// use portal_backend_client::{BackendClient, BackendConfig, Order};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = BackendClient::new(BackendConfig {
///     base_url: "https://project.supabase.co".into(),
///     anon_key: "public-anon-key".into(),
///     ..Default::default()
/// })?;
///
/// backend.auth().sign_in_with_password("admin@example.com", "secret").await?;
/// let rows: Vec<serde_json::Value> = backend
///     .tables()
///     .select_ordered("campaigns", &Order::desc("created_at"))
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct BackendClient {
    transport: Transport,
}

impl BackendClient {
    /// Create a new backend client
    pub fn new(config: BackendConfig) -> Result<Self> {
        Ok(Self {
            transport: Transport::new(config)?,
        })
    }

    pub fn config(&self) -> &BackendConfig {
        &self.transport.config
    }

    pub fn tables(&self) -> TableClient {
        TableClient::new(self.transport.clone())
    }

    pub fn auth(&self) -> AuthClient {
        AuthClient::new(self.transport.clone())
    }

    pub fn storage(&self) -> StorageClient {
        StorageClient::new(self.transport.clone())
    }
}

#[derive(Clone)]
pub(crate) struct Transport {
    config: Arc<BackendConfig>,
    http: Client,
    access_token: Arc<RwLock<Option<String>>>,
}

impl Transport {
    fn new(config: BackendConfig) -> Result<Self> {
        if config.anon_key.trim().is_empty() {
            return Err(BackendError::InvalidConfig("anon key is empty".into()));
        }
        reqwest::Url::parse(&config.base_url)
            .map_err(|e| BackendError::InvalidConfig(format!("base url {}: {}", config.base_url, e)))?;

        let mut headers = header::HeaderMap::new();
        headers.insert(
            "apikey",
            header::HeaderValue::from_str(&config.anon_key)
                .map_err(|e| BackendError::InvalidConfig(format!("anon key: {}", e)))?,
        );
        headers.insert(
            "X-Client-Info",
            header::HeaderValue::from_static(concat!("portal-backend-client/", env!("CARGO_PKG_VERSION"))),
        );

        let http = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            config: Arc::new(config),
            http,
            access_token: Arc::new(RwLock::new(None)),
        })
    }

    pub(crate) fn config(&self) -> &BackendConfig {
        &self.config
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    /// Join a service path onto the base URL without doubling slashes
    pub(crate) fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub(crate) async fn set_access_token(&self, token: Option<String>) {
        *self.access_token.write().await = token;
    }

    pub(crate) async fn access_token(&self) -> Option<String> {
        self.access_token.read().await.clone()
    }

    /// Attach the bearer token: the session token when signed in, the anon key otherwise
    pub(crate) async fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let bearer = match self.access_token().await {
            Some(token) => token,
            None => self.config.anon_key.clone(),
        };
        request.header(header::AUTHORIZATION, format!("Bearer {}", bearer))
    }
}

/// Turn a non-success response into a typed error
pub(crate) async fn error_for_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(ErrorBody::best_message)
        .unwrap_or(body);

    tracing::debug!(status = status.as_u16(), %message, "Backend request failed");

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(BackendError::Unauthorized {
            status: status.as_u16(),
            message,
        });
    }

    Err(BackendError::Server {
        status: status.as_u16(),
        message,
    })
}

/// Check status and decode a JSON body
pub(crate) async fn handle_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T> {
    let response = error_for_status(response).await?;
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

//! Types for the backend client API

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Client configuration
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Project base URL (e.g. `https://xyz.supabase.co`)
    pub base_url: String,
    /// Public anonymous key, sent as `apikey` on every request
    pub anon_key: String,
    /// Database schema exposed through the REST endpoint
    pub schema: String,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:54321".to_string(),
            anon_key: String::new(),
            schema: "public".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Sort direction for ordered selects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Ordering clause for `select_ordered`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub direction: SortDirection,
}

impl Order {
    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Descending,
        }
    }

    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Ascending,
        }
    }

    /// Render as a PostgREST `order` query value (e.g. `created_at.desc`)
    pub fn to_query(&self) -> String {
        let dir = match self.direction {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        };
        format!("{}.{}", self.column, dir)
    }
}

/// Row returned by a `select=count` probe
#[derive(Debug, Clone, Deserialize)]
pub struct CountRow {
    pub count: u64,
}

/// Error body returned by the REST and auth endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Pick the most descriptive message the service gave us
    pub fn best_message(self) -> Option<String> {
        self.message
            .or(self.msg)
            .or(self.error_description)
            .or(self.error)
    }
}

// ==================== Auth ====================

/// User object returned by the auth service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Free-form metadata set at sign-up or via `update_user`
    #[serde(default)]
    pub user_metadata: Map<String, Value>,
}

/// Session returned by a successful sign-in or refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: AuthUser,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Email/password credentials
#[derive(Debug, Clone, Serialize)]
pub struct PasswordCredentials {
    pub email: String,
    pub password: String,
}

/// Sign-up request with user metadata
#[derive(Debug, Clone, Serialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub data: Map<String, Value>,
}

/// Sign-up answer: a full session when the project auto-confirms users,
/// otherwise the bare user awaiting confirmation.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SignUpResponse {
    Session(Session),
    User(AuthUser),
}

impl SignUpResponse {
    pub fn user(&self) -> &AuthUser {
        match self {
            SignUpResponse::Session(session) => &session.user,
            SignUpResponse::User(user) => user,
        }
    }
}

/// Attributes accepted by `update_user`
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

// ==================== Storage ====================

/// Response from an object upload
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    /// Full object key, `<bucket>/<path>`
    #[serde(rename = "Key", alias = "key")]
    pub key: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct RemoveRequest<'a> {
    pub prefixes: &'a [String],
}

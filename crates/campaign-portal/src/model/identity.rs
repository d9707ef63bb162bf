use portal_backend_client::AuthUser;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Display name used when the auth record carries none
pub const UNKNOWN_USER_NAME: &str = "Unknown User";

/// Portal role, stored in auth user metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Creator,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Creator => "creator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "creator" => Ok(Role::Creator),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// The signed-in user as the portal sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl From<&AuthUser> for Identity {
    fn from(user: &AuthUser) -> Self {
        let meta = &user.user_metadata;
        let name = meta
            .get("name")
            .and_then(Value::as_str)
            .filter(|n| !n.is_empty())
            .unwrap_or(UNKNOWN_USER_NAME)
            .to_string();
        let role = meta
            .get("role")
            .and_then(Value::as_str)
            .and_then(|r| r.parse().ok())
            .unwrap_or_default();

        Self {
            id: user.id.clone(),
            email: user.email.clone().unwrap_or_default(),
            name,
            role,
        }
    }
}

/// Profile fields a user may edit about themselves
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub instagram: String,
    pub youtube: String,
    pub tiktok: String,
    pub language: String,
}

impl ProfileUpdate {
    pub fn to_metadata(&self) -> Map<String, Value> {
        let mut data = Map::new();
        data.insert("name".into(), Value::from(self.name.clone()));
        data.insert("instagram".into(), Value::from(self.instagram.clone()));
        data.insert("youtube".into(), Value::from(self.youtube.clone()));
        data.insert("tiktok".into(), Value::from(self.tiktok.clone()));
        data.insert("language".into(), Value::from(self.language.clone()));
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user(metadata: Value) -> AuthUser {
        serde_json::from_value(json!({
            "id": "u1",
            "email": "ada@example.com",
            "user_metadata": metadata
        }))
        .unwrap()
    }

    #[test]
    fn test_identity_from_metadata() {
        let identity = Identity::from(&user(json!({"name": "Ada", "role": "admin"})));
        assert_eq!(identity.name, "Ada");
        assert!(identity.is_admin());
    }

    #[test]
    fn test_identity_defaults() {
        let identity = Identity::from(&user(json!({"role": "superuser"})));
        assert_eq!(identity.name, UNKNOWN_USER_NAME);
        assert_eq!(identity.role, Role::Creator);
        assert_eq!(identity.email, "ada@example.com");
    }

    #[test]
    fn test_profile_metadata_keys() {
        let update = ProfileUpdate {
            name: "Ada".into(),
            language: "en".into(),
            ..Default::default()
        };
        let data = update.to_metadata();
        assert_eq!(data.len(), 5);
        assert_eq!(data["tiktok"], "");
        assert_eq!(data["language"], "en");
    }
}

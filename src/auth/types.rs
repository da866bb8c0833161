//! Request and response types for the authentication API. Wire names are
//! camelCase to match the platform backend.

use crate::role::Role;
use secrecy::SecretString;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug)]
pub struct LoginRequest {
    pub username: String,
    pub password: SecretString,
}

#[derive(Debug)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: SecretString,
    pub role: Role,
}

/// Identity of the signed-in user as stored under the `user` key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
}

/// Successful login response, unwrapped from its `data` envelope.
#[derive(Debug)]
pub struct LoginPayload {
    pub user: UserProfile,
    /// Role exactly as returned by the service, before normalization.
    pub role: String,
    pub access_token: SecretString,
    pub refresh_token: SecretString,
}

#[derive(Deserialize)]
pub(crate) struct LoginEnvelope {
    pub data: LoginData,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginData {
    #[serde(deserialize_with = "string_or_number")]
    id: String,
    access_token: String,
    refresh_token: String,
    role: String,
    first_name: String,
    last_name: String,
    username: String,
    #[serde(default)]
    email: String,
}

impl From<LoginData> for LoginPayload {
    fn from(data: LoginData) -> Self {
        Self {
            user: UserProfile {
                id: data.id,
                first_name: data.first_name,
                last_name: data.last_name,
                username: data.username,
                email: data.email,
            },
            role: data.role,
            access_token: SecretString::from(data.access_token),
            refresh_token: SecretString::from(data.refresh_token),
        }
    }
}

/// Error body of a rejected call; only `message` is read.
#[derive(Deserialize)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
}

/// The backend emits numeric ids; older deployments send strings.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Number(i64),
        Text(String),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Number(value) => value.to_string(),
        Id::Text(value) => value,
    })
}

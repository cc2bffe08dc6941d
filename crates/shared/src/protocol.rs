use serde::{Deserialize, Serialize};

use crate::domain::Role;

/// Where the registration endpoint lives, relative to the API base url.
pub const REGISTER_PATH: &str = "/api/v1/users/register";

/// Body of `POST /api/v1/users/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Reply of the registration endpoint. Error bodies on non-2xx statuses share this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RegistrationResponse {
    pub fn succeeded() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

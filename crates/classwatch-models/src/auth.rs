//! Authentication DTOs.
//!
//! Contains the login request body, the token response, and the opaque
//! [`AuthToken`] credential the session carries.

use serde::{Deserialize, Serialize};
use std::fmt;
use validator::{Validate, ValidationError};

/// Login request with username and password.
///
/// Serialized as the body of `POST /auth/login`.
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct Credentials {
    #[validate(custom(function = "not_blank"))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Response body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Opaque bearer credential issued by the remote API.
///
/// `Debug` never prints the value; use [`AuthToken::expose`] where the raw
/// token is needed (request headers, persistence).
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AuthToken(<{} bytes>)", self.0.len())
    }
}

impl From<TokenResponse> for AuthToken {
    fn from(response: TokenResponse) -> Self {
        Self(response.access_token)
    }
}

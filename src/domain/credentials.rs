use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::domain::validation::ValidationError;
use crate::domain::value::{Password, Username};

#[derive(Clone, PartialEq, Eq)]
/// NextSMS account credentials together with the derived Basic-Auth token.
///
/// Invariant: `auth_token == base64("{username}:{password}")`. The fields are
/// private and there are no setters; replacing credentials means building a
/// new value, so the token can never go stale.
pub struct Credentials {
    username: Username,
    password: Password,
    auth_token: String,
}

impl Credentials {
    /// Validate a username/password pair and derive the token.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self::from_parts(
            Username::new(username)?,
            Password::new(password)?,
        ))
    }

    /// Build credentials from already-validated parts.
    pub fn from_parts(username: Username, password: Password) -> Self {
        let auth_token = STANDARD.encode(format!(
            "{}:{}",
            username.as_str(),
            password.as_str()
        ));
        Self {
            username,
            password,
            auth_token,
        }
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn password(&self) -> &Password {
        &self.password
    }

    /// Base64 token sent after `Basic ` in the `Authorization` header.
    pub fn auth_token(&self) -> &str {
        &self.auth_token
    }

    /// Full `Authorization` header value.
    pub fn authorization(&self) -> String {
        format!("Basic {}", self.auth_token)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password)
            .field("auth_token", &"***")
            .finish()
    }
}

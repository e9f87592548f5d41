//! Token authentication.

use secrecy::{ExposeSecret, SecretString};

/// Personal access token used as a bearer credential.
pub struct Auth {
    token: SecretString,
}

impl Auth {
    /// Wrap an access token.
    #[must_use]
    pub const fn new(token: SecretString) -> Self {
        Self { token }
    }

    /// Value for the `Authorization` header.
    pub(crate) fn bearer(&self) -> String {
        format!("Bearer {}", self.token.expose_secret())
    }
}

impl From<&str> for Auth {
    fn from(token: &str) -> Self {
        Self::new(SecretString::from(token.to_owned()))
    }
}

impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Auth").field("token", &"[redacted]").finish()
    }
}

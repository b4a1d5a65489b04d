//! Request credentials as seen by an [`Authenticator`](super::Authenticator).

use std::collections::HashMap;

/// Header-style credentials attached to an incoming request.
///
/// Names are stored lowercased so lookups match HTTP header semantics.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    variables: HashMap<String, String>,
}

impl Credentials {
    /// Create empty credentials.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a value by header name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&str> {
        self.variables
            .get(&name.to_ascii_lowercase())
            .map(|v| v.as_str())
    }

    /// Set a value.
    pub fn set(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.variables
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
    }

    /// Builder-style [`Credentials::set`].
    pub fn with(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// The token from an `Authorization: Bearer <token>` header.
    pub fn bearer_token(&self) -> Option<&str> {
        let value = self.get("authorization")?;
        let (scheme, token) = value.split_once(' ')?;
        let token = token.trim();
        if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
            Some(token)
        } else {
            None
        }
    }
}

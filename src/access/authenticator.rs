use std::collections::HashMap;

use super::{AccessError, Credentials, Identity};

/// Verifies request credentials and yields the acting user.
///
/// The catalog trusts whatever identity comes back; a request that fails
/// here never reaches the review mutator.
pub trait Authenticator: Send + Sync {
    fn authenticate(&self, credentials: &Credentials) -> Result<Identity, AccessError>;
}

/// Default header carrying the user name when an upstream proxy has
/// already authenticated the caller.
pub const DEFAULT_USER_HEADER: &str = "x-user-id";

/// Takes the identity from a header set by a trusted, authenticating proxy.
#[derive(Debug, Clone)]
pub struct TrustedHeaderAuthenticator {
    header: String,
}

impl TrustedHeaderAuthenticator {
    pub fn new(header: impl Into<String>) -> Self {
        TrustedHeaderAuthenticator {
            header: header.into().to_ascii_lowercase(),
        }
    }

    pub fn header(&self) -> &str {
        &self.header
    }
}

impl Default for TrustedHeaderAuthenticator {
    fn default() -> Self {
        Self::new(DEFAULT_USER_HEADER)
    }
}

impl Authenticator for TrustedHeaderAuthenticator {
    fn authenticate(&self, credentials: &Credentials) -> Result<Identity, AccessError> {
        match credentials.get(&self.header).map(str::trim) {
            Some(user) if !user.is_empty() => Ok(Identity::new(user)),
            _ => Err(AccessError::MissingCredentials(format!(
                "missing {} header",
                self.header
            ))),
        }
    }
}

/// Maps fixed bearer tokens to users.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenAuthenticator {
    tokens: HashMap<String, String>,
}

impl StaticTokenAuthenticator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `token` as belonging to `user`. Builder pattern.
    pub fn token(mut self, token: impl Into<String>, user: impl Into<String>) -> Self {
        self.tokens.insert(token.into(), user.into());
        self
    }

    /// Number of registered tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl From<HashMap<String, String>> for StaticTokenAuthenticator {
    fn from(tokens: HashMap<String, String>) -> Self {
        StaticTokenAuthenticator { tokens }
    }
}

impl Authenticator for StaticTokenAuthenticator {
    fn authenticate(&self, credentials: &Credentials) -> Result<Identity, AccessError> {
        let token = credentials
            .bearer_token()
            .ok_or_else(|| AccessError::MissingCredentials("no token provided".into()))?;
        self.tokens
            .get(token)
            .map(|user| Identity::new(user.as_str()))
            .ok_or_else(|| AccessError::InvalidCredentials("failed to authenticate token".into()))
    }
}

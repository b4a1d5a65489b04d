//! Access Control: who is acting on a mutation.
//!
//! Verifying credentials (tokens, proxies, passwords) is a collaborator
//! concern. The catalog only consumes the resulting [`Identity`].

mod authenticator;
mod credentials;
mod error;

pub use authenticator::{
    Authenticator, StaticTokenAuthenticator, TrustedHeaderAuthenticator, DEFAULT_USER_HEADER,
};
pub use credentials::Credentials;
pub use error::AccessError;

use std::fmt;

/// A verified acting user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    user: String,
}

impl Identity {
    pub fn new(user: impl Into<String>) -> Self {
        Identity { user: user.into() }
    }

    pub fn user(&self) -> &str {
        &self.user
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.user)
    }
}

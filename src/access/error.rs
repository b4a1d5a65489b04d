use std::fmt;

/// Why a request has no verified identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// Nothing to authenticate with.
    MissingCredentials(String),
    /// Credentials were present but did not verify.
    InvalidCredentials(String),
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessError::MissingCredentials(msg) => write!(f, "unauthorized: {}", msg),
            AccessError::InvalidCredentials(msg) => write!(f, "unauthorized: {}", msg),
        }
    }
}

impl std::error::Error for AccessError {}

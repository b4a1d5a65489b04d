//! Server configuration: command-line flags with environment fallbacks.

use std::collections::HashMap;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, ValueEnum};

use crate::access::{
    Authenticator, StaticTokenAuthenticator, TrustedHeaderAuthenticator, DEFAULT_USER_HEADER,
};

/// How mutating requests identify their user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AuthMode {
    /// Trust the user header set by an authenticating proxy.
    Header,
    /// `Authorization: Bearer <token>` looked up in `--tokens-file`.
    Token,
}

/// Book catalog and review server.
#[derive(Debug, Clone, Parser)]
#[command(name = "bookshelf", version, about)]
pub struct ServerConfig {
    /// JSON document holding the book collection.
    #[arg(long, env = "BOOKSHELF_DATA_FILE", default_value = "data/books.json")]
    pub data_file: PathBuf,

    /// Address to bind.
    #[arg(long, env = "BOOKSHELF_BIND", default_value = "0.0.0.0")]
    pub bind: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// trace | debug | info | warn | error
    #[arg(long, env = "BOOKSHELF_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Write rotating log files here instead of stderr.
    #[arg(long, env = "BOOKSHELF_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Header carrying the authenticated user, set by the fronting proxy.
    #[arg(long, env = "BOOKSHELF_USER_HEADER", default_value = DEFAULT_USER_HEADER)]
    pub user_header: String,

    /// How mutating requests are authenticated.
    #[arg(long, env = "BOOKSHELF_AUTH", value_enum, default_value_t = AuthMode::Header)]
    pub auth: AuthMode,

    /// JSON object mapping bearer tokens to user names. Required with `--auth token`.
    #[arg(long, env = "BOOKSHELF_TOKENS_FILE", required_if_eq("auth", "token"))]
    pub tokens_file: Option<PathBuf>,
}

impl ServerConfig {
    /// The socket address to listen on.
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.bind, self.port).parse()
    }

    /// Build the authenticator selected by `--auth`.
    pub fn authenticator(&self) -> Result<Arc<dyn Authenticator>, String> {
        match self.auth {
            AuthMode::Header => Ok(Arc::new(TrustedHeaderAuthenticator::new(
                self.user_header.as_str(),
            ))),
            AuthMode::Token => {
                let path = self
                    .tokens_file
                    .as_deref()
                    .ok_or_else(|| "--auth token requires --tokens-file".to_string())?;
                Ok(Arc::new(load_tokens(path)?))
            }
        }
    }
}

fn load_tokens(path: &Path) -> Result<StaticTokenAuthenticator, String> {
    let bytes = fs::read(path)
        .map_err(|err| format!("failed to read tokens file `{}`: {err}", path.display()))?;
    let tokens: HashMap<String, String> = serde_json::from_slice(&bytes)
        .map_err(|err| format!("invalid tokens file `{}`: {err}", path.display()))?;
    if tokens.is_empty() {
        return Err(format!("tokens file `{}` has no tokens", path.display()));
    }
    Ok(StaticTokenAuthenticator::from(tokens))
}

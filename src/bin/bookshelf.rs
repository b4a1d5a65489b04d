//! bookshelf server
//!
//! Loads the book collection, then serves catalog queries and review
//! mutations over HTTP until interrupted.

use std::process::ExitCode;
use std::sync::Arc;

use bookshelf::config::ServerConfig;
use bookshelf::logging::init_logging;
use bookshelf::{http, Catalog, JsonFileStore, RecordStore};
use clap::Parser;
use log::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let config = ServerConfig::parse();

    let _logger = match init_logging(&config.log_level, config.log_dir.as_deref()) {
        Ok(handle) => handle,
        Err(err) => {
            eprintln!("bookshelf: {err}");
            return ExitCode::FAILURE;
        }
    };

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=server_exit module=main status=error error={}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = JsonFileStore::new(&config.data_file);
    let books = store.load()?;
    info!(
        "event=collection_open module=main status=ok path={} books={}",
        config.data_file.display(),
        books.len()
    );

    let catalog = Arc::new(Catalog::new(store));
    let authenticator = config.authenticator()?;
    info!(
        "event=auth_configure module=main status=ok mode={:?}",
        config.auth
    );

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        "event=server_start module=main status=ok addr={} version={}",
        listener.local_addr()?,
        env!("CARGO_PKG_VERSION")
    );

    http::serve(catalog, authenticator, listener, shutdown_signal()).await?;
    info!("event=server_stop module=main status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("event=signal module=main status=error error={}", err);
    }
}

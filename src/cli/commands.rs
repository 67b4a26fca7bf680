//! CLI command implementations
//!
//! Boot order for `serve`: logging, configuration, store, repository,
//! listener. The store is closed after the listener has drained.

use std::sync::Arc;

use super::args::{Cli, Command, CommonArgs};
use super::config::ServiceConfig;
use super::errors::{CliError, CliResult};
use crate::http_server::{shutdown_signal, HttpServer};
use crate::observability;
use crate::query::QueryRepository;
use crate::store::{DocumentStore, MemoryStore, RedisStore};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run a parsed command on a fresh runtime
pub fn run_command(cmd: Command) -> CliResult<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::boot_failed(format!("Failed to start runtime: {}", e)))?;

    match cmd {
        Command::Serve {
            common,
            port,
            memory_store,
        } => {
            observability::init(common.log_format).map_err(CliError::boot_failed)?;
            let config = ServiceConfig::resolve(common.config.as_deref(), &common.overrides(port))?;
            runtime.block_on(serve(config, memory_store))
        }
        Command::Check { common } => {
            observability::init(common.log_format).map_err(CliError::boot_failed)?;
            let config = load_config(&common)?;
            runtime.block_on(check(&config))
        }
    }
}

fn load_config(common: &CommonArgs) -> CliResult<ServiceConfig> {
    ServiceConfig::resolve(common.config.as_deref(), &common.overrides(None))
}

/// Open the configured store and verify it answers.
///
/// Connections authenticate when created, so a wrong credential fails here
/// rather than on the first request.
async fn open_store(config: &ServiceConfig) -> CliResult<Arc<dyn DocumentStore>> {
    let store = RedisStore::connect(&config.store)?;
    if let Err(e) = store.ping().await {
        store.close();
        return Err(CliError::store_unavailable(format!(
            "store at {} unavailable: {}",
            config.store.address, e
        )));
    }
    Ok(Arc::new(store))
}

/// Run the HTTP service until a shutdown signal arrives
pub async fn serve(config: ServiceConfig, memory_store: bool) -> CliResult<()> {
    let store: Arc<dyn DocumentStore> = if memory_store {
        tracing::warn!("using in-memory store; documents are lost on exit");
        Arc::new(MemoryStore::new())
    } else {
        let store = open_store(&config).await?;
        tracing::info!(address = %config.store.address, "document store connected");
        store
    };

    let repository = QueryRepository::new(store.clone());
    let server = HttpServer::with_config(config.http.clone(), repository);

    let result = server.start(shutdown_signal()).await;

    store.close();
    tracing::info!("document store closed");

    result.map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
}

/// Verify the configured store is reachable with the configured credential
pub async fn check(config: &ServiceConfig) -> CliResult<()> {
    let store = open_store(config).await?;
    store.close();
    println!("store at {} is reachable", config.store.address);
    Ok(())
}

mod collector;
mod config;
mod constants;
mod handlers;
mod state;

use actix_web::{web, App, HttpServer};
use config::ServerConfig;
use constants::CLIENT_TIMEOUT_SECONDS;
use state::AppState;
use std::sync::Arc;
use std::time::Duration;
use storage::{FilesystemStorage, Storage};
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing with env filter
    // Filter out actix-server worker shutdown messages
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("info")
                    .add_directive("actix_server::worker=warn".parse().unwrap())
                    .add_directive("actix_server::accept=warn".parse().unwrap())
            }),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting filedrop server (PID: {})", std::process::id());

    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let filesystem = FilesystemStorage::new(&config.uploads_directory);
    filesystem.ensure_dir().await.map_err(|e| {
        error!("Failed to initialize filesystem storage: {:#}", e);
        std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("Failed to initialize filesystem storage: {:#}", e),
        )
    })?;
    info!("Using filesystem storage: {:?}", filesystem.data_dir());

    let storage: Arc<dyn Storage> = Arc::new(filesystem);

    collector::spawn(
        storage.clone(),
        config.retention_policy(),
        config.cleanup_interval,
    );

    let state = web::Data::new(AppState::new(storage, config.naming));
    let bind_address = config.bind_address();
    let timeout = Duration::from_secs(CLIENT_TIMEOUT_SECONDS);

    info!("Starting server on http://{}", bind_address);

    // Every path and method is an upload
    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .default_service(web::to(handlers::upload::upload))
    })
    .client_request_timeout(timeout)
    .client_disconnect_timeout(timeout)
    .keep_alive(timeout)
    .bind(&bind_address)
    .map_err(|e| {
        error!("Failed to bind to {}: {}", bind_address, e);
        e
    })?;

    info!("Server bound successfully to http://{}", bind_address);

    server.run().await
}

use dotenvy::dotenv;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use activity_board::config::ServerConfig;
use activity_board::database::ActivityDirectory;
use activity_board::web;

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = match ServerConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    // Memory-resident; every restart begins from the seed rosters.
    let directory = ActivityDirectory::seeded();
    info!(activities = directory.len(), "activity directory seeded");

    let app = web::app(directory.into_shared(), &config.static_dir);

    let addr = match config.listen_addr() {
        Ok(a) => a,
        Err(e) => {
            error!(error = %e, "invalid listen address");
            std::process::exit(1);
        }
    };

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            let fallback = match config.fallback_addr() {
                Ok(f) => f,
                Err(fe) => {
                    error!(%addr, error = %e, fallback_error = %fe, "cannot bind listen address");
                    std::process::exit(1);
                }
            };
            warn!(%addr, error = %e, %fallback, "bind failed, trying fallback port");
            match tokio::net::TcpListener::bind(fallback).await {
                Ok(l) => l,
                Err(e) => {
                    error!(%fallback, error = %e, "cannot bind fallback address");
                    std::process::exit(1);
                }
            }
        }
    };

    match listener.local_addr() {
        Ok(bound) => info!("listening on http://{}", bound),
        Err(e) => warn!(error = %e, "could not read bound address"),
    }

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "server error");
        std::process::exit(1);
    }
}

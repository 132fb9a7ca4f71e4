mod api;
mod config;
mod dto;
mod state;


use crate::{config::ServerConfig, state::AppState};
use axum::routing::{get, post};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use zonekit::prelude::*;

fn app(state: Arc<AppState>) -> axum::Router {
    axum::Router::new()
        .route("/boundaries/validate", post(api::validate_boundary))
        .route("/zones", get(api::list_zones).post(api::create_zone))
        .route("/zones/locate", get(api::locate_zone))
        .route("/zones/overlaps", post(api::overlapping_zones))
        .route(
            "/zones/{id}",
            get(api::get_zone)
                .patch(api::update_zone)
                .delete(api::delete_zone),
        )
        .route("/aggregates", get(api::aggregates))
        .with_state(state)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting server...");
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("Invalid ZONEKIT_PORT: {err}");
            std::process::exit(1);
        }
    };

    let state = Arc::new(AppState::new(ZoneService::new(MemoryStore::new())));
    let listener = match tokio::net::TcpListener::bind(config.address()).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("Failed to bind {}: {err}", config.address());
            std::process::exit(1);
        }
    };
    info!("Listening on {}", config.address());
    if let Err(err) = axum::serve(listener, app(state)).await {
        error!("Server stopped: {err}");
        std::process::exit(1);
    }
}

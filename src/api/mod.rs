pub mod config;
pub mod health;
pub mod ws;

use crate::config::Config;
use crate::distributor::Distributor;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub distributor: Arc<Distributor>,
}

impl AppState {
    pub fn new(config: Config, distributor: Arc<Distributor>) -> Self {
        Self {
            config,
            distributor,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/health", get(health::health))
        .route("/api/config", get(config::get_config))
        .route("/ws", get(ws::ws_handler))
        .fallback_service(static_files)
        .layer(cors)
        .with_state(state)
}

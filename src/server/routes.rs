/// Route definitions

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::static_files;
use super::websocket;
use super::AppState;
use crate::utils::DASHBOARD_PATH;

pub fn create_router(state: AppState, enable_cors: bool) -> Router {
    let mut app = Router::new()
        .route("/", get(handlers::index))
        .route(DASHBOARD_PATH, get(handlers::dashboard))
        .route("/dashboard", get(handlers::dashboard))
        .route("/api/snapshot", get(handlers::get_snapshot))
        .route("/api/health", get(handlers::health_check))
        .route("/ws/metrics", get(websocket::ws_metrics_handler))
        .route("/static/*path", get(static_files::static_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if enable_cors {
        app = app.layer(CorsLayer::permissive());
    }

    app
}

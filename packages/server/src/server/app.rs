//! Application setup and server configuration.

use axum::{
    extract::{DefaultBodyLimit, Extension},
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::routes::{
    analyze_card_handler, delete_vendor_handler, health_handler, list_cards_handler,
    save_vendor_handler, search_gifts_handler, status_stream_handler, update_vendor_handler,
};

/// Front and back card photos straight from a phone camera.
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: ServerDeps,
}

/// Build the router with all routes, CORS, tracing and the uploads mount.
pub fn build_app(deps: ServerDeps) -> Router {
    let uploads = ServeDir::new(&deps.upload_dir);
    let app_state = AppState { deps };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/analyze-card", post(analyze_card_handler))
        .route("/save-vendor", post(save_vendor_handler))
        .route("/update-vendor/:id", put(update_vendor_handler))
        .route("/delete-vendor/:id", delete(delete_vendor_handler))
        .route("/cards", get(list_cards_handler))
        .route("/search-gifts", post(search_gifts_handler))
        .route("/status-stream/:request_id", get(status_stream_handler))
        .nest_service("/uploads", uploads)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

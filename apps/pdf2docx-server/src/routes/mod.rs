//! Route modules for the PDF2DOCX server
//!
//! Endpoints (all under `/api`):
//! - GET /api/health - liveness probe
//! - POST /api/convert - PDF upload in, DOCX download out

pub mod convert;
pub mod health;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router
pub fn app(state: AppState) -> Router {
    let max_upload_bytes = state.config().conversion.max_upload_bytes;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .merge(health::router())
        .merge(convert::router(max_upload_bytes));

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

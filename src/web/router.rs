use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::web::handlers;
use crate::web::state::AppState;

/// Build the page router.
///
/// Unknown paths get the same 404 page as `GET /error`.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/infos", get(handlers::infos))
        .route("/error", get(handlers::not_found))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

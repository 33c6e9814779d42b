//! Maps aggregator failures onto HTTP responses.
//!
//! Every failure renders the same generic 500 page. The cause is only logged.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::utils::error::ProxyError;
use crate::web::render;

#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error(transparent)]
    Aggregation(#[from] ProxyError),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match &self {
            Self::Aggregation(e) => {
                tracing::error!(
                    category = ?e.category(),
                    upstream_status = ?e.upstream_status(),
                    "❌ Failed to build page: {}",
                    e
                );
            }
        }

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(render::server_error_page()),
        )
            .into_response()
    }
}

//! Page handlers.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/?typeOf=&offset=` | Full listing page or one category |
//! | `GET` | `/infos?pokemonName=` | Detail page with species and evolution chain |
//! | `GET` | `/error` | Fixed 404 page |

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use serde::Deserialize;

use crate::domain::model::{CategoryFilter, PageWindow};
use crate::web::error::WebError;
use crate::web::render;
use crate::web::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    #[serde(rename = "typeOf")]
    pub type_of: Option<String>,
    pub offset: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct InfoQuery {
    #[serde(rename = "pokemonName")]
    pub pokemon_name: Option<String>,
}

/// Unparseable or missing offsets fall back to the first page.
pub fn parse_offset(raw: Option<&str>) -> u64 {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(0)
}

pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListingQuery>,
) -> Result<Html<String>, WebError> {
    let filter = CategoryFilter::from_query(query.type_of.as_deref());

    let (entries, window) = match &filter {
        CategoryFilter::All => {
            let offset = parse_offset(query.offset.as_deref());
            let page = state.catalog.fetch_page(offset, state.page_size).await?;
            let window = PageWindow::new(offset, state.page_size, page.total);
            (page.entries, window)
        }
        CategoryFilter::Category(token) => {
            let entries = state.catalog.fetch_by_category(token).await?;
            let count = entries.len() as u64;
            (entries, PageWindow::new(0, count, count))
        }
    };

    Ok(Html(render::listing_page(
        &state.site,
        &filter,
        &entries,
        &window,
    )))
}

pub async fn infos(
    State(state): State<Arc<AppState>>,
    Query(query): Query<InfoQuery>,
) -> Result<Html<String>, WebError> {
    let name = query
        .pokemon_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());

    match name {
        Some(name) => {
            let bundle = state.catalog.fetch_by_name(name).await?;
            Ok(Html(render::detail_page(&state.site, &bundle)))
        }
        None => Ok(Html(render::no_info_page(&state.site))),
    }
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Html(render::not_found_page()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_offset() {
        assert_eq!(parse_offset(None), 0);
        assert_eq!(parse_offset(Some("200")), 200);
        assert_eq!(parse_offset(Some("abc")), 0);
        assert_eq!(parse_offset(Some("-20")), 0);
    }
}

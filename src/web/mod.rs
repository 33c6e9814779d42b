// Presentation layer: axum routes rendering the aggregator's results as HTML.

pub mod error;
pub mod handlers;
pub mod render;
pub mod router;
pub mod server;
pub mod state;

pub use router::build_router;
pub use state::{AppState, SiteInfo};

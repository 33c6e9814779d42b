pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;
pub mod web;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::HttpUpstream;
pub use config::{lambda::LambdaConfig, AggregatorConfig, Profile};
pub use crate::core::aggregator::Aggregator;
pub use domain::model::{
    CategoryFilter, EntityDetailBundle, ListingEntry, ListingPage, PageWindow,
};
pub use domain::ports::{Catalog, ConfigProvider, Upstream};
pub use utils::error::{ProxyError, Result};
pub use web::{build_router, AppState};

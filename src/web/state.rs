use crate::adapters::HttpUpstream;
use crate::config::AggregatorConfig;
use crate::core::aggregator::Aggregator;
use crate::core::{Catalog, ConfigProvider};
use std::sync::Arc;

/// Site chrome shared by every page.
#[derive(Debug, Clone)]
pub struct SiteInfo {
    pub title: String,
    pub logo: String,
    pub no_info_message: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            title: "Pokédex".to_string(),
            logo: "image/logo.png".to_string(),
            no_info_message:
                "There is no information about this Pokémon yet, come back later...".to_string(),
        }
    }
}

/// Shared, read-only state handed to every handler.
pub struct AppState {
    pub catalog: Arc<dyn Catalog>,
    pub page_size: u64,
    pub site: SiteInfo,
}

impl AppState {
    pub fn new(catalog: Arc<dyn Catalog>, page_size: usize) -> Self {
        Self {
            catalog,
            page_size: page_size as u64,
            site: SiteInfo::default(),
        }
    }

    /// Wires an HTTP-backed aggregator for `config`.
    pub fn from_config(config: AggregatorConfig) -> Self {
        let upstream = HttpUpstream::new(config.timeout_ms());
        let page_size = config.page_size();
        Self::new(Arc::new(Aggregator::new(upstream, config)), page_size)
    }
}

use crate::domain::model::{EntityDetailBundle, ListingEntry, ListingPage};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Read-only access to the remote data service: one URL in, one JSON document out.
pub trait Upstream: Send + Sync {
    fn get_json(
        &self,
        url: &str,
    ) -> impl std::future::Future<Output = Result<serde_json::Value>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn page_size(&self) -> usize;
    fn category_item_cap(&self) -> Option<usize>;
    fn timeout_ms(&self) -> Option<u64>;
    fn max_concurrency(&self) -> usize;
}

#[async_trait]
pub trait Catalog: Send + Sync {
    async fn fetch_page(&self, offset: u64, limit: u64) -> Result<ListingPage>;
    async fn fetch_by_category(&self, category: &str) -> Result<Vec<ListingEntry>>;
    async fn fetch_by_name(&self, identifier: &str) -> Result<EntityDetailBundle>;
}

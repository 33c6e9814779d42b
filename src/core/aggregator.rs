use crate::core::fan_out::ordered_fan_out;
use crate::domain::model::{EntityDetailBundle, ListingEntry, ListingPage};
use crate::domain::ports::{Catalog, ConfigProvider, Upstream};
use crate::utils::error::{ProxyError, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

#[derive(Debug, Deserialize)]
struct NamedResource {
    name: String,
    url: String,
}

#[derive(Debug, Deserialize)]
struct ResourceList {
    count: u64,
    results: Vec<NamedResource>,
}

#[derive(Debug, Deserialize)]
struct TypeMember {
    pokemon: NamedResource,
}

#[derive(Debug, Deserialize)]
struct TypeListing {
    pokemon: Vec<TypeMember>,
}

#[derive(Debug, Deserialize)]
struct Sprites {
    #[serde(default)]
    front_default: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PokemonDetail {
    id: u32,
    sprites: Sprites,
}

/// Turns listing and detail endpoints of the upstream into view-ready records.
pub struct Aggregator<U: Upstream, C: ConfigProvider> {
    upstream: U,
    config: C,
}

impl<U: Upstream, C: ConfigProvider> Aggregator<U, C> {
    pub fn new(upstream: U, config: C) -> Self {
        Self { upstream, config }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// Lists `limit` entries starting at `offset` of the full listing.
    pub async fn fetch_page(&self, offset: u64, limit: u64) -> Result<ListingPage> {
        let mut url = self.endpoint(&["pokemon"])?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string())
            .append_pair("offset", &offset.to_string());

        tracing::debug!("Fetching listing page: {}", url);
        let listing: ResourceList = self.fetch_json(url.as_str()).await?;
        let total = listing.count;

        let entries = self.resolve_entries(listing.results).await?;
        tracing::info!(
            offset = offset,
            limit = limit,
            total = total,
            entries = entries.len(),
            "Listing page assembled"
        );

        Ok(ListingPage { entries, total })
    }

    /// Lists the members of one category, truncated to the configured cap.
    pub async fn fetch_by_category(&self, category: &str) -> Result<Vec<ListingEntry>> {
        let token = normalize("category", category)?;
        let url = self.endpoint(&["type", token.as_str()])?;

        tracing::debug!("Fetching category listing: {}", url);
        let listing: TypeListing = self.fetch_json(url.as_str()).await?;

        let mut members: Vec<NamedResource> =
            listing.pokemon.into_iter().map(|m| m.pokemon).collect();
        if let Some(cap) = self.config.category_item_cap() {
            if members.len() > cap {
                tracing::debug!(
                    "Category '{}' has {} members, keeping the first {}",
                    token,
                    members.len(),
                    cap
                );
                members.truncate(cap);
            }
        }

        let entries = self.resolve_entries(members).await?;
        tracing::info!(category = %token, entries = entries.len(), "Category listing assembled");
        Ok(entries)
    }

    /// Resolves the primary record, then its species, then its evolution chain.
    pub async fn fetch_by_name(&self, identifier: &str) -> Result<EntityDetailBundle> {
        let identifier = normalize("identifier", identifier)?;
        let primary_url = self.endpoint(&["pokemon", identifier.as_str()])?.to_string();

        tracing::debug!("Fetching primary record: {}", primary_url);
        let primary = self.upstream.get_json(&primary_url).await?;

        let species_url = follow(&primary, "/species/url", &primary_url)?;
        tracing::debug!("Fetching species record: {}", species_url);
        let species = self.upstream.get_json(&species_url).await?;

        let chain_url = follow(&species, "/evolution_chain/url", &species_url)?;
        tracing::debug!("Fetching evolution chain: {}", chain_url);
        let evolution_chain = self.upstream.get_json(&chain_url).await?;

        tracing::info!(identifier = %identifier, "Detail bundle assembled");
        Ok(EntityDetailBundle {
            primary,
            species,
            evolution_chain,
        })
    }

    async fn resolve_entries(&self, summaries: Vec<NamedResource>) -> Result<Vec<ListingEntry>> {
        ordered_fan_out(summaries, self.config.max_concurrency(), |summary| {
            self.resolve_entry(summary)
        })
        .await
    }

    async fn resolve_entry(&self, summary: NamedResource) -> Result<ListingEntry> {
        let detail: PokemonDetail = self.fetch_json(&summary.url).await?;
        Ok(ListingEntry {
            name: summary.name,
            id: detail.id,
            image: detail.sprites.front_default,
        })
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let value = self.upstream.get_json(url).await?;
        serde_json::from_value(value).map_err(|e| ProxyError::malformed(url, e.to_string()))
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let base = self.config.api_base_url();
        let mut url = Url::parse(base).map_err(|e| ProxyError::ConfigError {
            message: format!("Invalid api_base_url '{}': {}", base, e),
        })?;

        url.path_segments_mut()
            .map_err(|_| ProxyError::ConfigError {
                message: format!("api_base_url '{}' cannot carry a path", base),
            })?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }
}

#[async_trait::async_trait]
impl<U: Upstream, C: ConfigProvider> Catalog for Aggregator<U, C> {
    async fn fetch_page(&self, offset: u64, limit: u64) -> Result<ListingPage> {
        Aggregator::fetch_page(self, offset, limit).await
    }

    async fn fetch_by_category(&self, category: &str) -> Result<Vec<ListingEntry>> {
        Aggregator::fetch_by_category(self, category).await
    }

    async fn fetch_by_name(&self, identifier: &str) -> Result<EntityDetailBundle> {
        Aggregator::fetch_by_name(self, identifier).await
    }
}

fn normalize(field: &str, raw: &str) -> Result<String> {
    let token = raw.trim();
    if token.is_empty() {
        return Err(ProxyError::InvalidInput {
            field: field.to_string(),
            reason: "value cannot be empty".to_string(),
        });
    }
    Ok(token.to_lowercase())
}

/// Reads the URL reference at `pointer` in a document fetched from `source`.
fn follow(document: &serde_json::Value, pointer: &str, source: &str) -> Result<String> {
    document
        .pointer(pointer)
        .and_then(serde_json::Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| ProxyError::malformed(source, format!("missing reference at {}", pointer)))
}

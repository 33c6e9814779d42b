use crate::config::profile::{AggregatorConfig, Profile};
use crate::utils::error::Result;
use crate::utils::validation::{parse_number, Validate};

/// Reads the function configuration from its environment.
///
/// `PROFILE` picks the preset (default `serverless`); `POKEAPI_BASE_URL`,
/// `PAGE_SIZE`, `CATEGORY_ITEM_CAP`, `TIMEOUT_MS` (`0` disables the deadline)
/// and `MAX_CONCURRENCY` override single values.
#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub aggregator: AggregatorConfig,
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let profile = match lookup("PROFILE") {
            Some(raw) => raw.parse()?,
            None => Profile::Serverless,
        };
        let mut aggregator = AggregatorConfig::for_profile(profile);

        if let Some(url) = lookup("POKEAPI_BASE_URL") {
            aggregator.api_base_url = url;
        }
        if let Some(raw) = lookup("PAGE_SIZE") {
            aggregator.page_size = parse_number("PAGE_SIZE", &raw)?;
        }
        if let Some(raw) = lookup("CATEGORY_ITEM_CAP") {
            aggregator.category_item_cap = Some(parse_number("CATEGORY_ITEM_CAP", &raw)?);
        }
        if let Some(raw) = lookup("TIMEOUT_MS") {
            aggregator.timeout_ms = match parse_number::<u64>("TIMEOUT_MS", &raw)? {
                0 => None,
                timeout_ms => Some(timeout_ms),
            };
        }
        if let Some(raw) = lookup("MAX_CONCURRENCY") {
            aggregator.max_concurrency = parse_number("MAX_CONCURRENCY", &raw)?;
        }

        Ok(Self { aggregator })
    }
}

impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        self.aggregator.validate()?;
        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_to_serverless_profile() {
        let config = LambdaConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(
            config.aggregator,
            AggregatorConfig::for_profile(Profile::Serverless)
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let config = LambdaConfig::from_lookup(lookup_from(&[
            ("PROFILE", "hardened"),
            ("POKEAPI_BASE_URL", "http://localhost:8000/api/v2"),
            ("CATEGORY_ITEM_CAP", "25"),
            ("TIMEOUT_MS", "0"),
        ]))
        .unwrap();

        assert_eq!(config.aggregator.api_base_url, "http://localhost:8000/api/v2");
        assert_eq!(config.aggregator.category_item_cap, Some(25));
        assert_eq!(config.aggregator.timeout_ms, None);
        assert_eq!(config.aggregator.page_size, 20);
    }

    #[test]
    fn test_bad_number_is_rejected() {
        let err = LambdaConfig::from_lookup(lookup_from(&[("PAGE_SIZE", "lots")])).unwrap_err();
        assert!(err.to_string().contains("PAGE_SIZE"));
    }
}

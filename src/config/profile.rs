use crate::core::bounded_fetch::DEFAULT_TIMEOUT_MS;
use crate::core::ConfigProvider;
use crate::utils::error::{ProxyError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_MAX_CONCURRENCY: usize = 10;
pub const MAX_CONCURRENCY_LIMIT: usize = 64;

/// Deployment presets. They only differ in the values they seed [`AggregatorConfig`] with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    #[default]
    Local,
    Serverless,
    Hardened,
}

impl FromStr for Profile {
    type Err = ProxyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Profile::Local),
            "serverless" | "lambda" => Ok(Profile::Serverless),
            "hardened" => Ok(Profile::Hardened),
            other => Err(ProxyError::InvalidConfigValueError {
                field: "profile".to_string(),
                value: other.to_string(),
                reason: "Expected one of: local, serverless, hardened".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatorConfig {
    pub api_base_url: String,
    pub page_size: usize,
    pub category_item_cap: Option<usize>,
    pub timeout_ms: Option<u64>,
    pub max_concurrency: usize,
}

impl AggregatorConfig {
    pub fn for_profile(profile: Profile) -> Self {
        let base = Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            page_size: 100,
            category_item_cap: None,
            timeout_ms: Some(DEFAULT_TIMEOUT_MS),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        };

        match profile {
            Profile::Local | Profile::Serverless => base,
            Profile::Hardened => Self {
                page_size: 20,
                category_item_cap: Some(50),
                ..base
            },
        }
    }
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self::for_profile(Profile::default())
    }
}

impl ConfigProvider for AggregatorConfig {
    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn page_size(&self) -> usize {
        self.page_size
    }

    fn category_item_cap(&self) -> Option<usize> {
        self.category_item_cap
    }

    fn timeout_ms(&self) -> Option<u64> {
        self.timeout_ms
    }

    fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }
}

impl Validate for AggregatorConfig {
    fn validate(&self) -> Result<()> {
        use crate::utils::validation::*;

        validate_url("api_base_url", &self.api_base_url)?;
        validate_positive_number("page_size", self.page_size, 1)?;
        if let Some(cap) = self.category_item_cap {
            validate_positive_number("category_item_cap", cap, 1)?;
        }
        if let Some(timeout_ms) = self.timeout_ms {
            validate_range("timeout_ms", timeout_ms, 1, 120_000)?;
        }
        validate_range(
            "max_concurrency",
            self.max_concurrency,
            1,
            MAX_CONCURRENCY_LIMIT,
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles() {
        let local = AggregatorConfig::for_profile(Profile::Local);
        assert_eq!(local.page_size, 100);
        assert_eq!(local.category_item_cap, None);
        assert_eq!(local.timeout_ms, Some(5000));

        let hardened = AggregatorConfig::for_profile(Profile::Hardened);
        assert_eq!(hardened.page_size, 20);
        assert_eq!(hardened.category_item_cap, Some(50));
        assert_eq!(hardened.max_concurrency, 10);
    }

    #[test]
    fn test_profile_from_str() {
        assert_eq!("Hardened".parse::<Profile>().unwrap(), Profile::Hardened);
        assert_eq!("lambda".parse::<Profile>().unwrap(), Profile::Serverless);
        assert!("turbo".parse::<Profile>().is_err());
    }

    #[test]
    fn test_validation() {
        assert!(AggregatorConfig::default().validate().is_ok());

        let bad_concurrency = AggregatorConfig {
            max_concurrency: 0,
            ..AggregatorConfig::default()
        };
        assert!(bad_concurrency.validate().is_err());

        let bad_url = AggregatorConfig {
            api_base_url: "pokeapi".to_string(),
            ..AggregatorConfig::default()
        };
        assert!(bad_url.validate().is_err());

        let no_timeout = AggregatorConfig {
            timeout_ms: None,
            ..AggregatorConfig::default()
        };
        assert!(no_timeout.validate().is_ok());
    }
}

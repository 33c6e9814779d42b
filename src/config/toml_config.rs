use crate::config::profile::{AggregatorConfig, Profile};
use crate::utils::error::{ProxyError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub profile: Option<Profile>,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub listing: ListingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpstreamConfig {
    pub base_url: Option<String>,
    /// `0` disables the deadline.
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingConfig {
    pub page_size: Option<usize>,
    pub category_item_cap: Option<usize>,
    pub max_concurrency: Option<usize>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ProxyError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ProxyError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${POKEAPI_BASE_URL})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ProxyError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn aggregator_config(&self) -> AggregatorConfig {
        let mut config = AggregatorConfig::for_profile(self.profile.unwrap_or_default());
        self.apply_to(&mut config);
        config
    }

    /// Writes every value set in the file over `config`.
    pub fn apply_to(&self, config: &mut AggregatorConfig) {
        if let Some(url) = &self.upstream.base_url {
            config.api_base_url = url.clone();
        }
        match self.upstream.timeout_ms {
            Some(0) => config.timeout_ms = None,
            Some(timeout_ms) => config.timeout_ms = Some(timeout_ms),
            None => {}
        }
        if let Some(page_size) = self.listing.page_size {
            config.page_size = page_size;
        }
        if let Some(cap) = self.listing.category_item_cap {
            config.category_item_cap = Some(cap);
        }
        if let Some(max_concurrency) = self.listing.max_concurrency {
            config.max_concurrency = max_concurrency;
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        crate::utils::validation::validate_non_empty_string("server.host", &self.server.host)?;
        self.aggregator_config().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
profile = "hardened"

[server]
host = "127.0.0.1"
port = 8080

[upstream]
base_url = "https://pokeapi.example.com/api/v2"
timeout_ms = 2500

[listing]
page_size = 40
max_concurrency = 16
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let aggregator = config.aggregator_config();

        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(aggregator.api_base_url, "https://pokeapi.example.com/api/v2");
        assert_eq!(aggregator.timeout_ms, Some(2500));
        assert_eq!(aggregator.page_size, 40);
        assert_eq!(aggregator.max_concurrency, 16);
        // untouched values keep the hardened preset
        assert_eq!(aggregator.category_item_cap, Some(50));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_local_profile() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.aggregator_config(), AggregatorConfig::default());
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_zero_timeout_disables_deadline() {
        let config = TomlConfig::from_toml_str("[upstream]\ntimeout_ms = 0\n").unwrap();
        assert_eq!(config.aggregator_config().timeout_ms, None);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("POKEDEX_TEST_BASE_URL", "http://localhost:9999/api/v2");

        let toml_content = r#"
[upstream]
base_url = "${POKEDEX_TEST_BASE_URL}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.upstream.base_url.as_deref(),
            Some("http://localhost:9999/api/v2")
        );

        std::env::remove_var("POKEDEX_TEST_BASE_URL");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[upstream]
base_url = "invalid-url"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let too_many = TomlConfig::from_toml_str("[listing]\nmax_concurrency = 500\n").unwrap();
        assert!(too_many.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[listing\npage_size = 1").unwrap_err();
        assert!(matches!(err, ProxyError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"profile = \"serverless\"\n[server]\nport = 9000\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.profile, Some(Profile::Serverless));
        assert_eq!(config.server.port, 9000);
    }
}

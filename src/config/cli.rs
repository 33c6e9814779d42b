use crate::config::profile::{AggregatorConfig, Profile};
use crate::config::toml_config::TomlConfig;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "pokedex-proxy")]
#[command(about = "Server-rendered Pokédex pages backed by PokeAPI")]
pub struct CliConfig {
    #[arg(long, value_enum, help = "Preset to start from [default: local]")]
    pub profile: Option<Profile>,

    #[arg(long, help = "TOML configuration file; command-line flags win over it")]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub api_base_url: Option<String>,

    #[arg(long)]
    pub page_size: Option<usize>,

    #[arg(long)]
    pub category_item_cap: Option<usize>,

    #[arg(long)]
    pub timeout_ms: Option<u64>,

    #[arg(long, help = "Let upstream calls wait without a deadline")]
    pub no_timeout: bool,

    #[arg(long)]
    pub max_concurrency: Option<usize>,

    #[arg(long, help = "Listen address [default: 0.0.0.0]")]
    pub host: Option<String>,

    #[arg(long, help = "Listen port [default: 3000]")]
    pub port: Option<u16>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn aggregator_config(&self) -> AggregatorConfig {
        let mut config = AggregatorConfig::for_profile(self.profile.unwrap_or_default());
        self.apply_overrides(&mut config);
        config
    }

    /// Layers the flags over `file`: an explicit `--profile` picks the preset the
    /// file's values are applied to, then every other explicit flag wins.
    pub fn merge_with_file(&self, file: &TomlConfig) -> (AggregatorConfig, String) {
        let profile = self.profile.or(file.profile).unwrap_or_default();
        let mut config = AggregatorConfig::for_profile(profile);
        file.apply_to(&mut config);
        self.apply_overrides(&mut config);

        let host = self.host.as_deref().unwrap_or(&file.server.host);
        let port = self.port.unwrap_or(file.server.port);
        (config, format!("{}:{}", host, port))
    }

    pub fn apply_overrides(&self, config: &mut AggregatorConfig) {
        if let Some(url) = &self.api_base_url {
            config.api_base_url = url.clone();
        }
        if let Some(page_size) = self.page_size {
            config.page_size = page_size;
        }
        if let Some(cap) = self.category_item_cap {
            config.category_item_cap = Some(cap);
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.timeout_ms = Some(timeout_ms);
        }
        if self.no_timeout {
            config.timeout_ms = None;
        }
        if let Some(max_concurrency) = self.max_concurrency {
            config.max_concurrency = max_concurrency;
        }
    }

    pub fn bind_address(&self) -> String {
        format!(
            "{}:{}",
            self.host.as_deref().unwrap_or(DEFAULT_HOST),
            self.port.unwrap_or(DEFAULT_PORT)
        )
    }
}

#[cfg(feature = "cli")]
pub mod cli;
pub mod lambda;
pub mod profile;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use profile::{AggregatorConfig, Profile};

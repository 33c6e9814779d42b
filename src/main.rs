use clap::Parser;
use pokedex_proxy::config::toml_config::TomlConfig;
use pokedex_proxy::utils::{logger, validation::Validate};
use pokedex_proxy::web::server::start_server;
use pokedex_proxy::{AppState, CliConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!(
        "Starting pokedex-proxy ({:?} profile)",
        cli.profile.unwrap_or_default()
    );
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 設定檔優先載入，命令列參數再覆蓋
    let (config, bind) = match &cli.config {
        Some(path) => {
            let file_config = TomlConfig::from_file(path)?;
            file_config.validate()?;
            tracing::info!("Loaded configuration from {}", path.display());
            cli.merge_with_file(&file_config)
        }
        None => (cli.aggregator_config(), cli.bind_address()),
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    match config.timeout_ms {
        Some(timeout_ms) => tracing::info!("Upstream calls bounded to {}ms", timeout_ms),
        None => tracing::warn!("Upstream calls have no deadline"),
    }
    tracing::debug!("Aggregator config: {:?}", config);

    let state = Arc::new(AppState::from_config(config));
    start_server(&bind, state).await?;

    Ok(())
}

//! Dead Air CLI entry point.

use clap::Parser;

use dead_air::cli::{self, Cli};
use dead_air::infrastructure::config::ConfigLoader;
use dead_air::infrastructure::logging::LoggerImpl;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(err) => cli::handle_error(&err, cli.json),
    };

    let _logger = match LoggerImpl::init(&config.logging) {
        Ok(logger) => logger,
        Err(err) => cli::handle_error(&err, cli.json),
    };

    let result = tokio::select! {
        result = cli::run(cli.command, &config, cli.json) => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("Interrupted, abandoning run");
            Err(anyhow::anyhow!("Interrupted"))
        }
    };

    if let Err(err) = result {
        cli::handle_error(&err, cli.json);
    }
}

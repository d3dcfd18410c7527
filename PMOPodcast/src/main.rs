mod app;
mod cli;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use pmoconfig::Config;
use tracing_subscriber::EnvFilter;

fn init_tracing(config: &Config) {
    let level = config
        .get_log_min_level()
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase();
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = cli::Cli::parse();
    let config = Config::load_config(&cli.config_dir)?;
    init_tracing(&config);

    app::run(cli, config).await
}

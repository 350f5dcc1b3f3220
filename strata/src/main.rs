#![warn(
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::style,
    clippy::pedantic
)]

mod config;
mod subcommands;

use anyhow::bail;
use clap::Parser;

use config::{Cli, Config, Subcommand};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.subcommand.clone() {
        Subcommand::Init => subcommands::init()?,
        Subcommand::Version => subcommands::version(),
        Subcommand::Migrate { .. } => subcommands::migrate(&parse_config(cli)?).await?,
        Subcommand::Status { .. } => subcommands::status(&parse_config(cli)?).await?,
    }

    Ok(())
}

fn parse_config(cli: Cli) -> anyhow::Result<Config> {
    let file = if cli.config.is_file() {
        let config_str = std::fs::read_to_string(&cli.config)?;

        toml::from_str(&config_str)?
    } else {
        tracing::error!("Config file not found.");
        bail!("Missing config file {}.", cli.config.display())
    };

    let config = Config::new(cli, file);

    tracing::debug!("Config loaded: {config:?}");

    Ok(config)
}

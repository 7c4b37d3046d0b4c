use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};

mod cli;

use cli::{Cli, LogFormat};
use homework_bot::api::PracticumClient;
use homework_bot::config::Config;
use homework_bot::telegram::{Notifier, TelegramClient};
use homework_bot::watcher::{StatusWatcher, WatchPhase};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // One logical thread of control: every request and sleep is awaited in turn
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async_main(cli))
}

async fn async_main(cli: Cli) -> Result<()> {
    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));
    match cli.log_format {
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
    }

    let loaded = match cli.env_file {
        Some(ref path) => Config::from_env_file(path),
        None => Config::from_env(),
    };
    let mut config = match loaded {
        Ok(config) => config,
        Err(e) => {
            error!("{}. Bot stopped.", e);
            return Err(e.into());
        }
    };
    if let Some(from_date) = cli.from_date {
        config.initial_timestamp = from_date;
        config.validate()?;
    }
    info!(config = ?config, "Configuration loaded");

    let api = PracticumClient::new(&config)?;
    let telegram = TelegramClient::from_config(&config)?;
    let notifier = Notifier::new(Arc::new(telegram), config.telegram_chat_id);
    info!(
        endpoint = %api.endpoint(),
        chat_id = notifier.chat_id(),
        "Clients ready"
    );
    let mut watcher = StatusWatcher::new(&config, Arc::new(api), notifier);

    if cli.once {
        if watcher.run_once().await == WatchPhase::Backoff {
            anyhow::bail!("Homework poll failed");
        }
        return Ok(());
    }

    info!("Bot started");
    watcher.run().await;

    Ok(())
}

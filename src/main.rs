mod logging;
mod poller;

use clap::Parser;
use hwbot_channels::telegram::TelegramNotifier;
use hwbot_core::{
    clock::SystemClock,
    config::{self, ConfigSource, Credentials},
};
use hwbot_practicum::PracticumClient;
use poller::Poller;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Parser)]
#[command(
    name = "hwbot",
    version,
    about = "Watches Practicum homework reviews and reports status changes to Telegram"
)]
struct Cli {
    /// Path to config file.
    #[arg(short, long, default_value = "hwbot.toml")]
    config: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (cfg, config_source) = config::load(&cli.config)?;
    let _log_guard = logging::init(&cfg.log)?;
    if config_source == ConfigSource::Defaults {
        info!("config file not found at {}, using defaults", cli.config);
    }

    let credentials = Credentials::from_env()?;
    let source = PracticumClient::from_config(&cfg.api, &credentials)?;
    let notifier = TelegramNotifier::from_config(&cfg.telegram, &credentials)?;

    debug!("bot started (config: {})", cli.config);

    let poller = Poller::new(
        Arc::new(source),
        Arc::new(notifier),
        Arc::new(SystemClock),
        cfg.poll.clone(),
    );

    tokio::select! {
        result = poller.run() => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received, stopping");
        }
    }

    Ok(())
}

mod logging;
mod poller;

use clap::{Parser, Subcommand};
use hwatch_channels::{telegram::TelegramChannel, Notifier};
use hwatch_core::config;
use hwatch_practicum::PracticumClient;
use poller::{PollSettings, PollState, Poller};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(
    name = "hwatch",
    version,
    about = "Homework review status watcher with Telegram notifications"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start polling and notifying.
    Start,
    /// Run one poll cycle and print the message it would send.
    Check,
    /// Show which credentials are configured.
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // A missing .env is fine; the real environment and config.toml still apply.
    let _ = dotenvy::dotenv();

    let file_cfg = config::load(&cli.config)?;
    let found = file_cfg.is_some();
    let mut cfg = file_cfg.unwrap_or_default();
    cfg.apply_env_overrides(|key| std::env::var(key).ok());
    let _log_guard = logging::init(&cfg.watch)?;
    if !found {
        info!("Config file not found at {}, using defaults", cli.config);
    }

    match cli.command {
        Commands::Start => {
            if let Err(e) = cfg.require_credentials() {
                error!(fatal = true, "{e}");
                return Err(e.into());
            }

            let source = Arc::new(PracticumClient::from_config(&cfg.watch, &cfg.practicum)?);
            let channel = Arc::new(TelegramChannel::new(cfg.telegram.clone()));
            let notifier = Notifier::new(channel, cfg.telegram.chat_id.clone());

            let poller = Poller::new(
                source,
                notifier,
                PollSettings::from(&cfg.watch),
                PollState::default(),
            );
            let state = poller.run().await;
            info!(
                last_status = state.last_status.map(|s| s.code()).unwrap_or("none"),
                "hwatch stopped"
            );
        }
        Commands::Check => {
            if cfg.practicum.token.trim().is_empty() {
                anyhow::bail!(
                    "practicum token is empty. Set it in config.toml or {} env var.",
                    config::ENV_PRACTICUM_TOKEN
                );
            }

            let client = PracticumClient::from_config(&cfg.watch, &cfg.practicum)?;
            let since = cfg.watch.window_start(chrono::Utc::now().timestamp());
            match poller::preview(&client, since).await? {
                Some(message) => println!("{message}"),
                None => println!("No homework updates since {since}."),
            }
        }
        Commands::Status => {
            println!("hwatch status\n");
            println!("Config: {}", cli.config);
            println!("Endpoint: {}", cfg.watch.endpoint);
            println!("Poll interval: {}s", cfg.watch.retry_period_secs);
            println!();

            let missing = cfg.missing_credentials();
            for name in [
                config::ENV_PRACTICUM_TOKEN,
                config::ENV_TELEGRAM_TOKEN,
                config::ENV_TELEGRAM_CHAT_ID,
            ] {
                println!(
                    "  {name}: {}",
                    if missing.contains(&name) {
                        "missing"
                    } else {
                        "configured"
                    }
                );
            }
        }
    }

    Ok(())
}

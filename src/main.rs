use std::sync::Arc;

use roadmap_bot::bot::RoadmapBot;
use roadmap_bot::channels::{ChannelManager, CliChannel, TelegramChannel};
use roadmap_bot::config::BotConfig;
use roadmap_bot::conversation::{InMemorySessionStore, SessionStore};
use roadmap_bot::llm::create_provider;
use roadmap_bot::roadmap::ResponseAggregator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = BotConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        eprintln!("  export TELEGRAM_API_TOKEN=... YANDEX_GPT_API_KEY=... YANDEX_FOLDER_ID=... HYPERBOLIC_API_KEY=...");
        std::process::exit(1);
    });

    eprintln!("🧭 Roadmap Bot v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Locale: {}", config.settings.locale);
    eprintln!("   Request timeout: {}s", config.request_timeout.as_secs());
    if config.cli_enabled {
        eprintln!("   CLI enabled. Type /start and press Enter.\n");
    }

    // ── LLM providers ───────────────────────────────────────────────────
    let primary = create_provider(&config.yandex, config.request_timeout)?;
    let supplementary = create_provider(&config.hyperbolic, config.request_timeout)?;
    let aggregator = ResponseAggregator::new(primary, supplementary, config.settings.locale);

    // ── Channels ────────────────────────────────────────────────────────
    let mut channels = ChannelManager::new();
    channels.add(Box::new(TelegramChannel::new(
        config.telegram_token.clone(),
        config.allowed_users.clone(),
    )?));
    if config.cli_enabled {
        channels.add(Box::new(CliChannel::new()));
    }

    let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    let bot = Arc::new(RoadmapBot::new(
        config.settings.clone(),
        store,
        aggregator,
        channels,
    ));

    bot.run().await?;
    Ok(())
}

//! # Sport Slot Bot Main Entry Point
//!
//! Initializes logging, loads configuration, sets up the database and the
//! search pipeline, and runs the Telegram bot next to the health server.

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sport_slot_bot::bot::handlers::{BotHandler, State};
use sport_slot_bot::config::Config;
use sport_slot_bot::database::connection::DatabaseManager;
use sport_slot_bot::interpreter::QueryInterpreter;
use sport_slot_bot::scraper::SlotScraper;
use sport_slot_bot::services::health::{HealthService, UpstreamInfo};
use sport_slot_bot::services::search::SearchService;
use sport_slot_bot::utils::logging::log_system_event;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sport_slot_bot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    info!("Starting Sport Slot Bot v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration loaded - Database: {}, HTTP Port: {}, Site: {}, Sport: {}",
        config.database_url, config.http_port, config.booking_base_url, config.sport_id
    );

    info!("Initializing database connection...");
    let db_manager = DatabaseManager::new(&config.database_url).await?;
    db_manager.run_migrations().await?;
    let db = Arc::new(db_manager);
    info!("Database initialized successfully");

    let timeout = Duration::from_secs(config.request_timeout_secs);
    let interpreter = QueryInterpreter::new(
        config.openai_api_key.clone(),
        config.openai_model.clone(),
        config.openai_base_url.clone(),
        timeout.saturating_mul(3),
        config.default_duration_hours,
    )?;
    let scraper = SlotScraper::new(
        config.booking_base_url.clone(),
        config.sport_id.clone(),
        timeout,
        config.scrape_concurrency,
    )?;
    let search = SearchService::new(
        interpreter,
        scraper,
        db.as_ref().clone(),
        config.default_duration_hours,
    );

    let bot = Bot::new(&config.telegram_bot_token);
    let handler = BotHandler::new(search, config.test_command_path.clone());
    log_system_event("bot initialized", Some(&format!("model {}", config.openai_model)));

    let upstream = UpstreamInfo {
        booking_site: config.booking_base_url.to_string(),
        sport_id: config.sport_id.clone(),
        model: config.openai_model.clone(),
    };
    let health_service = HealthService::new(db.clone(), upstream);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to port {}: {}", config.http_port, e))?;

    info!("Health check server starting on port {}", config.http_port);

    let bot_task = tokio::spawn(async move {
        Dispatcher::builder(bot, handler.schema())
            .dependencies(dptree::deps![InMemStorage::<State>::new()])
            .default_handler(|upd| async move {
                tracing::debug!("Unhandled update: {:?}", upd.kind);
            })
            .error_handler(LoggingErrorHandler::with_custom_text(
                "An error has occurred in the dispatcher",
            ))
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    });

    let health_task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, health_service.router).await {
            tracing::error!("Health server error: {}", e);
        }
    });

    tokio::select! {
        result = bot_task => {
            if let Err(e) = result {
                tracing::error!("Bot task error: {}", e);
            }
        }
        result = health_task => {
            if let Err(e) = result {
                tracing::error!("Health task error: {}", e);
            }
        }
    }

    log_system_event("application stopped", None);
    Ok(())
}

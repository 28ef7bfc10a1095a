//! # RSVP Bot Main Entry Point
//!
//! Initializes logging, loads configuration, opens the storage sinks,
//! loads the response ledger, starts the health server and the keep-alive
//! pinger, and runs the Telegram bot with long polling.

use anyhow::Result;
use std::sync::Arc;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::prelude::*;
use teloxide::update_listeners::Polling;
use teloxide::utils::command::BotCommands;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rsvp_bot::bot::commands::Command;
use rsvp_bot::bot::handlers::BotHandler;
use rsvp_bot::bot::BotContext;
use rsvp_bot::config::Config;
use rsvp_bot::database::connection::DatabaseManager;
use rsvp_bot::invitation::{AuthoringState, InvitationLedger};
use rsvp_bot::services::health::HealthService;
use rsvp_bot::services::keep_alive::KeepAliveService;
use rsvp_bot::storage::{FileStore, Persistence};
use rsvp_bot::utils::logging::log_system_event;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rsvp_bot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    info!("Starting RSVP Bot v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration loaded - Data dir: {}, Document store: {}, HTTP Port: {}",
        config.data_dir.display(),
        if config.database_url.is_some() { "enabled" } else { "disabled" },
        config.http_port
    );

    // Initialize storage
    let files = FileStore::new(&config.data_dir);
    files.ensure_dir().await?;
    let documents = match &config.database_url {
        Some(url) => init_document_store(url).await,
        None => None,
    };
    let ledger = Arc::new(InvitationLedger::load(Persistence::new(files, documents)).await);
    log_system_event(
        "Ledger ready",
        Some(&format!("{} invitations", ledger.invitation_count().await)),
    );

    // Initialize bot
    info!("Initializing Telegram bot...");
    let bot = Bot::new(&config.telegram_bot_token);
    let me = bot
        .get_me()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to reach the Telegram Bot API: {}", e))?;
    let bot_username = me.username().to_string();
    info!("Authorized as @{}", bot_username);

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        tracing::warn!("Failed to register bot commands: {}", e);
    }

    let ctx = BotContext::new(config.admin_id, bot_username, ledger.clone());
    let handler = BotHandler::new(ctx);
    info!("Telegram bot initialized successfully");

    // Initialize and start keep-alive service
    let mut keep_alive = match &config.keep_alive_url {
        Some(url) => start_keep_alive(url, config.keep_alive_interval_minutes).await,
        None => {
            info!("Keep-alive disabled - no KEEP_ALIVE_URL or RENDER_EXTERNAL_URL set");
            None
        }
    };

    // Initialize health service
    let health_service = HealthService::new(ledger.clone());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to port {}: {}", config.http_port, e))?;

    info!("Health check server starting on port {}", config.http_port);

    // Run both the bot and health server concurrently
    let storage = InMemStorage::<AuthoringState>::new();
    let mut dispatcher = Dispatcher::builder(bot.clone(), handler.schema())
        .dependencies(dptree::deps![storage])
        .enable_ctrlc_handler()
        .build();
    let shutdown = dispatcher.shutdown_token();

    let bot_task = tokio::spawn(async move {
        let updates = Polling::builder(bot).drop_pending_updates().build();
        dispatcher
            .dispatch_with_listener(
                updates,
                LoggingErrorHandler::with_custom_text("An error from the update listener"),
            )
            .await;
    });

    let health_task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, health_service.router).await {
            tracing::error!("Health server error: {}", e);
        }
    });

    log_system_event("Bot started", None);

    // Wait for either task to complete (which would indicate shutdown)
    tokio::select! {
        result1 = bot_task => {
            if let Err(e) = result1 {
                tracing::error!("Bot task error: {}", e);
            }
        }
        result2 = health_task => {
            if let Err(e) = result2 {
                tracing::error!("Health task error: {}", e);
            }
        }
        _ = terminate_signal() => {
            log_system_event("SIGTERM received, shutting down", None);
            match shutdown.shutdown() {
                Ok(stopped) => stopped.await,
                Err(e) => tracing::warn!("Dispatcher was not running: {}", e),
            }
        }
    }

    // Stop keep-alive service on shutdown
    if let Some(service) = keep_alive.as_mut() {
        if let Err(e) = service.stop().await {
            tracing::warn!("Error stopping keep-alive service: {}", e);
        }
    }

    info!("Application stopped");
    Ok(())
}

/// Opens the document store. Any failure leaves the bot running on the
/// JSON files alone.
async fn init_document_store(url: &str) -> Option<DatabaseManager> {
    info!("Initializing document store connection...");
    let db = match DatabaseManager::new(url).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to connect to document store, continuing file-only: {}", e);
            return None;
        }
    };

    info!("Running database migrations...");
    if let Err(e) = db.run_migrations().await {
        tracing::error!("Document store migrations failed, continuing file-only: {}", e);
        return None;
    }

    info!("Document store initialized successfully");
    Some(db)
}

async fn start_keep_alive(url: &str, interval_minutes: u64) -> Option<KeepAliveService> {
    let mut service = match KeepAliveService::new(url, interval_minutes).await {
        Ok(service) => service,
        Err(e) => {
            tracing::error!("Failed to create keep-alive service: {}", e);
            return None;
        }
    };

    if let Err(e) = service.start().await {
        tracing::error!("Failed to start keep-alive service: {}", e);
        return None;
    }

    Some(service)
}

/// Resolves when the process receives SIGTERM, which hosting platforms send
/// before stopping the container. Ctrl-C is handled by the dispatcher.
#[cfg(unix)]
async fn terminate_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut stream) => {
            stream.recv().await;
        }
        Err(e) => {
            tracing::error!("Failed to listen for SIGTERM: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate_signal() {
    std::future::pending::<()>().await;
}

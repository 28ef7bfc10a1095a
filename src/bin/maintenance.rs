use anyhow::{anyhow, Result};
use rsvp_bot::config::Config;
use rsvp_bot::database::connection::DatabaseManager;
use std::env;
use std::path::Path;
use teloxide::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rsvp_bot=info".into()),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match command {
        "clear-updates" => clear_updates().await,
        "info" => show_info().await,
        "migrate" | "up" => run_migrations().await,
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {command}");
            print_help();
            std::process::exit(1);
        }
    }
}

fn load_config() -> Result<Config> {
    dotenvy::dotenv().ok();
    Config::from_env()
}

/// Removes any webhook and drops the updates queued while the bot was down,
/// so a freshly started poller does not replay stale button presses.
async fn clear_updates() -> Result<()> {
    println!("🧹 RSVP Bot - Clearing pending updates");
    println!("======================================");

    let config = load_config()?;
    let bot = Bot::new(&config.telegram_bot_token);

    bot.delete_webhook()
        .drop_pending_updates(true)
        .await
        .map_err(|e| anyhow!("Failed to delete webhook: {}", e))?;
    println!("✅ Webhook removed and pending updates dropped");

    let info = bot.get_webhook_info().await?;
    println!("📬 Pending updates now: {}", info.pending_update_count);

    Ok(())
}

async fn show_info() -> Result<()> {
    println!("🔍 RSVP Bot - Bot information");
    println!("=============================");

    let config = load_config()?;
    let bot = Bot::new(&config.telegram_bot_token);

    let me = bot.get_me().await?;
    println!("🤖 Bot: @{} (id {})", me.username(), me.id);
    println!("👤 Admin id: {}", config.admin_id);
    println!("📁 Data dir: {}", config.data_dir.display());

    let info = bot.get_webhook_info().await?;
    match info.url {
        Some(url) => println!("🌐 Webhook: {url}"),
        None => println!("🌐 Webhook: not set (long polling)"),
    }
    println!("📬 Pending updates: {}", info.pending_update_count);
    if let Some(message) = info.last_error_message {
        println!("⚠️  Last webhook error: {message}");
    }

    match &config.database_url {
        Some(url) => println!("📊 Document store: {}", mask_url(url)),
        None => println!("📊 Document store: disabled"),
    }

    Ok(())
}

async fn run_migrations() -> Result<()> {
    println!("🔧 RSVP Bot - Document Store Migration Tool");
    println!("===========================================");

    let config = load_config()?;
    let Some(database_url) = config.database_url else {
        return Err(anyhow!("DATABASE_URL is not set; the document store is disabled"));
    };

    println!("📊 Database URL: {}", mask_url(&database_url));
    println!("🚀 Running database migrations...");

    let db_manager = DatabaseManager::new(&database_url)
        .await
        .map_err(|e| anyhow!("Failed to connect to database: {}", e))?;

    match db_manager.run_migrations().await {
        Ok(()) => {
            println!("✅ Migrations completed successfully!");
        }
        Err(e) => {
            eprintln!("❌ Migration failed: {e}");
            std::process::exit(1);
        }
    }

    Ok(())
}

fn mask_url(url: &str) -> String {
    if let Some(path) = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
    {
        if let Some(filename) = Path::new(path).file_name() {
            return format!("sqlite:.../{}", filename.to_string_lossy());
        }
    }
    url.to_string()
}

fn print_help() {
    println!("💌 RSVP Bot - Maintenance Tool");
    println!();
    println!("USAGE:");
    println!("    maintenance [COMMAND]");
    println!();
    println!("COMMANDS:");
    println!("    clear-updates  Delete the webhook and drop pending updates");
    println!("    info           Show bot, webhook and storage information");
    println!("    migrate, up    Run document store migrations");
    println!("    help           Show this help message");
    println!();
    println!("ENVIRONMENT:");
    println!("    TELEGRAM_BOT_TOKEN  Bot token (required)");
    println!("    ADMIN_ID            Organiser's Telegram user id (required)");
    println!("    DATABASE_URL        Document store, e.g. sqlite:./data/rsvp.db (optional)");
    println!();
}

use anyhow::{anyhow, Result};
use std::env;
use std::path::PathBuf;

const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_HTTP_PORT: &str = "3000";
const DEFAULT_KEEP_ALIVE_MINUTES: u64 = 14;

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    pub admin_id: u64,
    pub data_dir: PathBuf,
    /// Document store connection string. `None` keeps persistence file-only.
    pub database_url: Option<String>,
    pub http_port: u16,
    pub keep_alive_url: Option<String>,
    pub keep_alive_interval_minutes: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let token = env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| anyhow!("TELEGRAM_BOT_TOKEN must be set"))?;

        if token.trim().is_empty() {
            return Err(anyhow!("TELEGRAM_BOT_TOKEN must be set"));
        }

        let admin_id = env::var("ADMIN_ID")
            .map_err(|_| anyhow!("ADMIN_ID must be set"))?
            .trim()
            .parse::<u64>()
            .map_err(|_| anyhow!("Invalid ADMIN_ID"))?;
        if admin_id == 0 {
            return Err(anyhow!("Invalid ADMIN_ID"));
        }

        let data_dir = non_empty_var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let database_url = non_empty_var("DATABASE_URL");

        // Hosting platforms usually inject PORT; HTTP_PORT wins when both are set.
        let port_str = non_empty_var("HTTP_PORT")
            .or_else(|| non_empty_var("PORT"))
            .unwrap_or_else(|| DEFAULT_HTTP_PORT.to_string());
        let http_port = port_str
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid HTTP_PORT"))?;

        let keep_alive_url =
            non_empty_var("KEEP_ALIVE_URL").or_else(|| non_empty_var("RENDER_EXTERNAL_URL"));

        let keep_alive_interval_minutes = match non_empty_var("KEEP_ALIVE_INTERVAL_MINUTES") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(minutes) if minutes > 0 => minutes,
                _ => return Err(anyhow!("Invalid KEEP_ALIVE_INTERVAL_MINUTES")),
            },
            None => DEFAULT_KEEP_ALIVE_MINUTES,
        };

        Ok(Config {
            telegram_bot_token: token,
            admin_id,
            data_dir,
            database_url,
            http_port,
            keep_alive_url,
            keep_alive_interval_minutes,
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

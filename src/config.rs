use anyhow::{anyhow, Result};
use std::env;
use url::Url;

const DEFAULT_DATABASE_URL: &str = "sqlite:./data/slots.db";
const DEFAULT_BOOKING_BASE_URL: &str = "https://www.antwerpen.be/nl/sportinfrastructuur";
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    pub openai_api_key: String,
    pub openai_model: String,
    pub openai_base_url: String,
    pub database_url: String,
    pub http_port: u16,
    pub booking_base_url: Url,
    pub sport_id: String,
    pub default_duration_hours: f64,
    pub scrape_concurrency: usize,
    pub request_timeout_secs: u64,
    pub test_command_path: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let token = env::var("TELEGRAM_BOT_TOKEN")
            .or_else(|_| env::var("TELEGRAM_TOKEN"))
            .map_err(|_| anyhow!("TELEGRAM_BOT_TOKEN must be set"))?;

        if token.trim().is_empty() {
            return Err(anyhow!("TELEGRAM_BOT_TOKEN must be set"));
        }

        let openai_api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| anyhow!("OPENAI_API_KEY must be set"))?;

        if openai_api_key.trim().is_empty() {
            return Err(anyhow!("OPENAI_API_KEY must be set"));
        }

        let openai_model = non_empty_var("OPENAI_MODEL")
            .unwrap_or_else(|| "gpt-3.5-turbo".to_string());
        let openai_base_url = non_empty_var("OPENAI_BASE_URL")
            .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let database_url = Self::database_url_from_env();

        let port_str = env::var("HTTP_PORT")
            .unwrap_or_else(|_| "3000".to_string());
        let http_port = port_str.trim()
            .parse()
            .map_err(|_| anyhow!("Invalid HTTP_PORT"))?;

        let booking_base_url = non_empty_var("BOOKING_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BOOKING_BASE_URL.to_string());
        let booking_base_url = Url::parse(booking_base_url.trim().trim_end_matches('/'))
            .map_err(|_| anyhow!("Invalid BOOKING_BASE_URL"))?;

        let sport_id = non_empty_var("SPORT_ID")
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| "2317".to_string());

        let default_duration_hours: f64 = parse_var("DEFAULT_DURATION_HOURS", "1.0")?;
        if !default_duration_hours.is_finite() || default_duration_hours <= 0.0 {
            return Err(anyhow!("Invalid DEFAULT_DURATION_HOURS"));
        }

        let scrape_concurrency: usize = parse_var("SCRAPE_CONCURRENCY", "4")?;
        if scrape_concurrency == 0 {
            return Err(anyhow!("Invalid SCRAPE_CONCURRENCY"));
        }

        let request_timeout_secs: u64 = parse_var("REQUEST_TIMEOUT_SECS", "10")?;
        if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&request_timeout_secs) {
            return Err(anyhow!("Invalid REQUEST_TIMEOUT_SECS"));
        }

        let test_command_path = non_empty_var("TEST_COMMAND_PATH")
            .unwrap_or_else(|| "test_command.json".to_string());

        Ok(Config {
            telegram_bot_token: token,
            openai_api_key,
            openai_model,
            openai_base_url,
            database_url,
            http_port,
            booking_base_url,
            sport_id,
            default_duration_hours,
            scrape_concurrency,
            request_timeout_secs,
            test_command_path,
        })
    }

    /// Database location alone, for tools that never talk to Telegram.
    pub fn database_url_from_env() -> String {
        non_empty_var("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T: std::str::FromStr>(name: &str, default: &str) -> Result<T> {
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    raw.trim()
        .parse()
        .map_err(|_| anyhow!("Invalid {}", name))
}

use std::{
    net::{IpAddr, SocketAddr},
    path::PathBuf,
};

use thiserror::Error;
use url::Url;

const DEFAULT_QUESTIONS_PATH: &str = "questions.json";
const DEFAULT_PORT: u16 = 10000;
const DEFAULT_LISTEN_HOST: &str = "0.0.0.0";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub token: String,
    pub questions_path: PathBuf,
    pub transport: Transport,
    pub log_level: String,
    pub log_json: bool,
}

/// How updates reach the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transport {
    Polling,
    Webhook { address: SocketAddr, url: Url },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TELEGRAM_BOT_TOKEN should be set")]
    MissingToken,
    #[error("TELEGRAM_BOT_TOKEN does not look like a BotFather token")]
    MalformedToken,
    #[error("PUBLIC_URL must be an http(s) URL, got '{0}'")]
    InvalidPublicUrl(String),
    #[error("PORT can't be parsed: '{0}'")]
    InvalidPort(String),
    #[error("LISTEN_ADDR can't be parsed: '{0}'")]
    InvalidListenAddr(String),
    #[error("webhook URL can't be built: {0}")]
    Url(#[from] url::ParseError),
}

impl Config {
    /// Reads the process environment, after loading `.env` if there is one.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let token = var("TELEGRAM_BOT_TOKEN")
            .or_else(|| var("TELOXIDE_TOKEN"))
            .ok_or(ConfigError::MissingToken)?;
        if !token.contains(':') {
            return Err(ConfigError::MalformedToken);
        }

        let transport = match var("PUBLIC_URL") {
            None => Transport::Polling,
            Some(public_url) => {
                let port = match var("PORT") {
                    Some(port) => port
                        .trim()
                        .parse::<u16>()
                        .map_err(|_| ConfigError::InvalidPort(port))?,
                    None => DEFAULT_PORT,
                };
                let host = var("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_HOST.to_owned());
                let host = host
                    .trim()
                    .parse::<IpAddr>()
                    .map_err(|_| ConfigError::InvalidListenAddr(host.clone()))?;

                Transport::Webhook {
                    address: SocketAddr::new(host, port),
                    url: webhook_url(&public_url, &token)?,
                }
            }
        };

        Ok(Self {
            questions_path: var("QUESTIONS_PATH")
                .unwrap_or_else(|| DEFAULT_QUESTIONS_PATH.to_owned())
                .into(),
            transport,
            log_level: var("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_owned()),
            log_json: var("LOG_FORMAT").is_some_and(|format| format.eq_ignore_ascii_case("json")),
            token,
        })
    }
}

/// Path Telegram posts updates to; derived from the token so it is not guessable.
pub fn secret_path(token: &str) -> String {
    let (bot_id, secret) = token.split_once(':').unwrap_or((token, ""));
    let prefix: String = secret.chars().take(8).collect();
    format!("/{bot_id}-{prefix}")
}

fn webhook_url(public_url: &str, token: &str) -> Result<Url, ConfigError> {
    let public_url = public_url.trim();
    if !public_url.starts_with("http") {
        return Err(ConfigError::InvalidPublicUrl(public_url.to_owned()));
    }
    let url = format!("{}{}", public_url.trim_end_matches('/'), secret_path(token));
    Ok(url.parse::<Url>()?)
}

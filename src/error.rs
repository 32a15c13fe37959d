use thiserror::Error;

use crate::{bank::LoadError, config::ConfigError};

/// Anything that stops the bot from starting or keeps it from running.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("question bank error: {0}")]
    Load(#[from] LoadError),
    #[error("telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),
    #[error("failed to install tracing subscriber: {0}")]
    Subscriber(#[from] tracing::subscriber::SetGlobalDefaultError),
    #[error("failed to bridge `log` records: {0}")]
    LogBridge(#[from] log::SetLoggerError),
}

#[cfg(test)]
mod tests {
    use tracing::subscriber::NoSubscriber;

    use super::*;

    #[test]
    fn second_subscriber_is_reported() {
        // Whichever call comes second fails; the first may race other tests.
        let first = tracing::subscriber::set_global_default(NoSubscriber::default());
        let second = tracing::subscriber::set_global_default(NoSubscriber::default());
        let err = first.and(second).map_err(BotError::from).unwrap_err();

        assert!(matches!(err, BotError::Subscriber(_)));
        assert!(err.to_string().starts_with("failed to install tracing subscriber"));
    }
}

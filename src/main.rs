use std::sync::Arc;

use aelius_donatus_bot::{
    bank::QuestionBank,
    commands::Command,
    config::Config,
    engine::QuizEngine,
    error::BotError,
    transport,
};
use teloxide::{prelude::*, utils::command::BotCommands};
use tracing::{info, warn};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), BotError> {
    let config = Config::from_env()?;
    init_tracing(&config)?;

    let bank = Arc::new(QuestionBank::load(&config.questions_path)?);
    let engine = Arc::new(QuizEngine::new(bank));

    let bot = Bot::new(&config.token);
    info!("Starting bot...");

    if let Err(err) = bot.set_my_commands(Command::bot_commands()).await {
        warn!("Failed to register the command list: {}", err);
    }

    transport::run(bot, engine, config.transport).await
}

fn init_tracing(config: &Config) -> Result<(), BotError> {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::ENTER)
        .with_line_number(true)
        .with_target(false);

    if config.log_json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    // teloxide logs through the `log` facade.
    tracing_log::LogTracer::init()?;
    Ok(())
}

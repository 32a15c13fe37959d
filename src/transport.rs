//! The two ways of receiving updates. Both drive the same dispatch tree.

use std::sync::Arc;

use teloxide::{
    error_handlers::LoggingErrorHandler,
    prelude::*,
    update_listeners::{
        webhooks::{self, Options},
        Polling,
    },
};
use tracing::info;

use crate::{config::Transport, engine::QuizEngine, error::BotError, schema::schema};

pub async fn run(bot: Bot, engine: Arc<QuizEngine>, transport: Transport) -> Result<(), BotError> {
    let mut dispatcher = Dispatcher::builder(bot.clone(), schema())
        .dependencies(dptree::deps![engine])
        .error_handler(LoggingErrorHandler::with_custom_text(
            "An error has occurred in the dispatcher",
        ))
        .enable_ctrlc_handler()
        .build();

    match transport {
        Transport::Polling => {
            info!("Receiving updates by long polling");
            let listener = Polling::builder(bot)
                .drop_pending_updates()
                .delete_webhook()
                .await
                .build();
            dispatcher
                .dispatch_with_listener(
                    listener,
                    LoggingErrorHandler::with_custom_text("An error from the update listener"),
                )
                .await;
        }
        Transport::Webhook { address, url } => {
            info!("Receiving updates by webhook on {} for {}", address, url);
            let listener =
                webhooks::axum(bot, Options::new(address, url).drop_pending_updates()).await?;
            dispatcher
                .dispatch_with_listener(
                    listener,
                    LoggingErrorHandler::with_custom_text("An error from the webhook listener"),
                )
                .await;
        }
    }

    info!("Dispatcher stopped");
    Ok(())
}

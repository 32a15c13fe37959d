use std::sync::Arc;

use teloxide::{
    payloads::SendMessageSetters,
    prelude::Requester,
    types::{Message, UserId},
    utils::command::BotCommands,
    Bot,
};
use tracing::{instrument, warn};

use crate::{
    engine::QuizEngine,
    keyboard::answers_keyboard,
    replies::{topics_listing, QuizReply, GREETING, STOPPED},
    HandlerResult,
};

#[derive(Debug, Clone, BotCommands)]
#[command(rename_rule = "lowercase", description = "Comandi:")]
pub enum Command {
    #[command(description = "messaggio di benvenuto")]
    Start,
    #[command(description = "mostra questo elenco")]
    Help,
    #[command(description = "mostra gli argomenti disponibili")]
    Topics,
    #[command(description = "avvia un quiz sull’argomento scelto")]
    Quiz,
    #[command(description = "mostra il punteggio")]
    Score,
    #[command(description = "termina la sessione")]
    Stop,
}

/// Sessions are per user; messages without a sender (channel posts) are ignored.
pub(crate) fn sender(msg: &Message) -> Option<UserId> {
    msg.from.as_ref().map(|user| user.id)
}

pub(crate) async fn start(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, GREETING).await?;
    Ok(())
}

pub(crate) async fn help(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, Command::descriptions().to_string())
        .await?;
    Ok(())
}

pub(crate) async fn topics(bot: Bot, msg: Message, engine: Arc<QuizEngine>) -> HandlerResult {
    bot.send_message(msg.chat.id, topics_listing(engine.topics()))
        .await?;
    Ok(())
}

#[instrument(level = "info", skip_all, fields(chat = msg.chat.id.0))]
pub(crate) async fn quiz(bot: Bot, msg: Message, engine: Arc<QuizEngine>) -> HandlerResult {
    let Some(user) = sender(&msg) else {
        warn!("/quiz without a sender");
        return Ok(());
    };

    let reply = engine.start_quiz(user).await?;
    match &reply {
        QuizReply::Question(question) => {
            bot.send_message(msg.chat.id, reply.to_string())
                .reply_markup(answers_keyboard(question.options()))
                .await?;
        }
        QuizReply::NoTopic => {
            bot.send_message(msg.chat.id, reply.to_string()).await?;
        }
    }
    Ok(())
}

pub(crate) async fn score(bot: Bot, msg: Message, engine: Arc<QuizEngine>) -> HandlerResult {
    let Some(user) = sender(&msg) else {
        return Ok(());
    };
    let score = engine.score(user).await;
    bot.send_message(msg.chat.id, score.to_string()).await?;
    Ok(())
}

pub(crate) async fn stop(bot: Bot, msg: Message, engine: Arc<QuizEngine>) -> HandlerResult {
    if let Some(user) = sender(&msg) {
        engine.stop(user);
    }
    bot.send_message(msg.chat.id, STOPPED).await?;
    Ok(())
}

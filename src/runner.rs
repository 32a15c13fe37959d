use std::sync::Arc;

use teloxide::{
    dispatching::dialogue::GetChatId,
    payloads::SendMessageSetters,
    prelude::Requester,
    types::{CallbackQuery, Message, ParseMode},
    Bot,
};
use tracing::{info, instrument, warn};

use crate::{
    commands::sender,
    engine::QuizEngine,
    keyboard::parse_choice,
    replies::{AnswerReply, FOLLOW_UP},
    HandlerResult,
};

#[instrument(level = "info", skip_all, fields(chat = msg.chat.id.0))]
pub(crate) async fn choose_topic(bot: Bot, msg: Message, engine: Arc<QuizEngine>) -> HandlerResult {
    let (Some(user), Some(text)) = (sender(&msg), msg.text()) else {
        return Ok(());
    };

    let reply = engine.select_topic(user, text).await;
    bot.send_message(msg.chat.id, reply.to_string())
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}

#[instrument(level = "info", skip_all, fields(user = q.from.id.0))]
pub(crate) async fn take_answer(bot: Bot, q: CallbackQuery, engine: Arc<QuizEngine>) -> HandlerResult {
    let Some(choice) = q.data.as_deref().and_then(parse_choice) else {
        warn!("Unexpected callback data {:?}", q.data);
        bot.answer_callback_query(&q.id).await?;
        return Ok(());
    };

    // The session is settled before anything goes over the wire.
    let reply = engine.answer(q.from.id, choice).await;
    bot.answer_callback_query(&q.id).await?;

    let Some(chat_id) = q.chat_id() else {
        info!("Callback without a chat, nothing to edit");
        return Ok(());
    };

    match &q.message {
        Some(message) => {
            bot.edit_message_text(chat_id, message.id(), reply.to_string())
                .await?;
        }
        None => {
            bot.send_message(chat_id, reply.to_string()).await?;
        }
    }

    if needs_follow_up(&reply) {
        bot.send_message(chat_id, FOLLOW_UP).await?;
    }
    Ok(())
}

/// Only a judged answer is followed by the "another question?" prompt.
fn needs_follow_up(reply: &AnswerReply) -> bool {
    matches!(reply, AnswerReply::Verdict(_))
}

pub(crate) async fn invalid_input(bot: Bot, msg: Message) -> HandlerResult {
    info!(
        chat = msg.chat.id.0,
        "Unable to handle message {:?}",
        msg.text()
    );
    bot.send_message(
        msg.chat.id,
        "Non ho capito. Scrivi un argomento oppure usa /help.",
    )
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bank::Question,
        selector::{present, Permutation},
        state::Verdict,
    };

    #[test]
    fn follow_up_only_after_a_verdict() {
        let question = Question::new(
            "Amatum iri è",
            ["infinito futuro passivo", "supino", "gerundio", "participio perfetto"]
                .map(String::from)
                .to_vec(),
            0,
            "",
        )
        .unwrap();
        let verdict = Verdict {
            correct: false,
            question: present(&question, Permutation::identity()),
            score: 0,
            asked: 1,
        };

        assert!(needs_follow_up(&AnswerReply::Verdict(verdict)));
        assert!(!needs_follow_up(&AnswerReply::NoActiveQuestion));
    }
}

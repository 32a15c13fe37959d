use teloxide::{
    dispatching::{UpdateFilterExt, UpdateHandler},
    dptree,
    types::{Message, Update},
};

use crate::{
    commands::{help, quiz, score, start, stop, topics, Command},
    runner::{choose_topic, invalid_input, take_answer},
};

/// Routes every update the bot reacts to. The quiz engine is expected as an
/// `Arc<QuizEngine>` dependency.
pub fn schema() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    use dptree::case;

    let command_handler = teloxide::filter_command::<Command, _>()
        .branch(case![Command::Start].endpoint(start))
        .branch(case![Command::Help].endpoint(help))
        .branch(case![Command::Topics].endpoint(topics))
        .branch(case![Command::Quiz].endpoint(quiz))
        .branch(case![Command::Score].endpoint(score))
        .branch(case![Command::Stop].endpoint(stop));

    let message_handler = Update::filter_message()
        .branch(command_handler)
        .branch(dptree::filter(is_free_text).endpoint(choose_topic))
        .endpoint(invalid_input);

    let callback_handler = Update::filter_callback_query().endpoint(take_answer);

    dptree::entry()
        .branch(message_handler)
        .branch(callback_handler)
}

fn is_free_text(msg: Message) -> bool {
    is_topic_candidate(msg.text())
}

/// Plain text that is not a (possibly unknown) command.
fn is_topic_candidate(text: Option<&str>) -> bool {
    text.is_some_and(|text| !text.starts_with('/'))
}

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::bank::{OPTION_COUNT, OPTION_LETTERS};

/// One button per option, top to bottom. The callback payload is the option's index.
pub(crate) fn answers_keyboard(options: &[String; OPTION_COUNT]) -> InlineKeyboardMarkup {
    let keyboard: Vec<Vec<InlineKeyboardButton>> = OPTION_LETTERS
        .iter()
        .zip(options)
        .enumerate()
        .map(|(idx, (letter, option))| {
            vec![InlineKeyboardButton::callback(
                format!("{letter}) {option}"),
                idx.to_string(),
            )]
        })
        .collect();

    InlineKeyboardMarkup::new(keyboard)
}

pub(crate) fn parse_choice(data: &str) -> Option<usize> {
    data.trim()
        .parse::<usize>()
        .ok()
        .filter(|choice| *choice < OPTION_COUNT)
}

//! User-facing texts. The bot speaks Italian.

use std::fmt;

use teloxide::utils::html;

use crate::{bank::Topic, selector::PresentedQuestion, state::Verdict};

pub const GREETING: &str = "Ciao! Sono AeliusDonatus_bot👨‍🏫📜\n\
    Scrivi un argomento (es. 'ablativo assoluto') oppure usa /topics per la lista.\n\
    Poi invia /quiz per iniziare. Comandi: /help /score /stop";

pub const FOLLOW_UP: &str = "Vuoi un’altra domanda? /quiz • Cambia argomento: /topics";

pub const STOPPED: &str = "Sessione terminata. A presto!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicReply {
    Selected(Topic),
    NotRecognized,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizReply {
    NoTopic,
    Question(PresentedQuestion),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerReply {
    NoActiveQuestion,
    Verdict(Verdict),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub score: u32,
    pub asked: u32,
}

pub fn topics_listing(topics: &[Topic]) -> String {
    let names: Vec<&str> = topics.iter().map(Topic::as_str).collect();
    format!("Argomenti disponibili:\n- {}", names.join("\n- "))
}

/// HTML, sent with `ParseMode::Html`.
impl fmt::Display for TopicReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopicReply::Selected(topic) => write!(
                f,
                "Argomento impostato: <b>{}</b>.\nUsa /quiz per iniziare.",
                html::escape(topic.as_str())
            ),
            TopicReply::NotRecognized => f.write_str("Argomento non riconosciuto. Usa /topics."),
        }
    }
}

impl fmt::Display for QuizReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizReply::NoTopic => {
                f.write_str("Prima scegli un argomento (/topics o scrivi il nome).")
            }
            QuizReply::Question(question) => f.write_str(question.prompt()),
        }
    }
}

impl fmt::Display for AnswerReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerReply::NoActiveQuestion => {
                f.write_str("Nessuna domanda attiva. Usa /quiz per iniziare.")
            }
            AnswerReply::Verdict(verdict) => write!(f, "{verdict}"),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.correct {
            writeln!(f, "✅ Corretto!")?;
        } else {
            writeln!(f, "❌ Errato.")?;
            writeln!(
                f,
                "Soluzione: {} – {}",
                self.question.correct_letter(),
                self.question.correct_option()
            )?;
        }
        write!(
            f,
            "{}\n\n{}",
            self.question.explanation(),
            Score {
                score: self.score,
                asked: self.asked
            }
        )
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Punteggio: {}/{}", self.score, self.asked)
    }
}

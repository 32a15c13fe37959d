//! The static catalog of topics and their questions.
//!
//! The bank is read once at startup and never mutated, so it is shared
//! between handlers as a plain `Arc<QuestionBank>`.

use std::collections::HashMap;

use thiserror::Error;

pub mod loader;
pub mod question;

pub use loader::LoadError;
pub use question::{Question, QuestionError, Topic, OPTION_COUNT, OPTION_LETTERS};

#[derive(Debug, Clone)]
pub struct QuestionBank {
    topics: Vec<Topic>,
    questions: HashMap<Topic, Vec<Question>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown topic '{0}'")]
pub struct UnknownTopicError(pub Topic);

impl QuestionBank {
    /// Topics in the order they appear in the bank file.
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn questions_for(&self, topic: &Topic) -> Result<&[Question], UnknownTopicError> {
        self.questions
            .get(topic)
            .map(Vec::as_slice)
            .ok_or_else(|| UnknownTopicError(topic.clone()))
    }
}

use std::fmt;

use thiserror::Error;

/// Every question offers exactly this many options.
pub const OPTION_COUNT: usize = 4;

/// Letters shown next to the options, in presentation order.
pub const OPTION_LETTERS: [char; OPTION_COUNT] = ['A', 'B', 'C', 'D'];

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Topic(String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    options: [String; OPTION_COUNT],
    correct: usize,
    explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestionError {
    #[error("expected 4 options, found {0}")]
    WrongOptionCount(usize),
    #[error("correct option index {0} is out of range 0..4")]
    CorrectOutOfRange(usize),
}

impl Topic {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Question {
    pub fn new(
        prompt: impl Into<String>,
        options: Vec<String>,
        correct: usize,
        explanation: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let options: [String; OPTION_COUNT] = options
            .try_into()
            .map_err(|rejected: Vec<String>| QuestionError::WrongOptionCount(rejected.len()))?;
        if correct >= OPTION_COUNT {
            return Err(QuestionError::CorrectOutOfRange(correct));
        }

        Ok(Self {
            prompt: prompt.into(),
            options,
            correct,
            explanation: explanation.into(),
        })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn options(&self) -> &[String; OPTION_COUNT] {
        &self.options
    }

    pub fn correct(&self) -> usize {
        self.correct
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }
}

use crate::{bank::Topic, selector::PresentedQuestion};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    NoTopic,
    Idle {
        topic: Topic,
    },
    AwaitingAnswer {
        topic: Topic,
        pending: PresentedQuestion,
    },
}

/// Quiz progress of one user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserSession {
    state: SessionState,
    score: u32,
    asked: u32,
}

/// Result of answering a pending question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub correct: bool,
    pub question: PresentedQuestion,
    pub score: u32,
    pub asked: u32,
}

impl SessionState {
    pub fn topic(&self) -> Option<&Topic> {
        match self {
            SessionState::NoTopic => None,
            SessionState::Idle { topic } | SessionState::AwaitingAnswer { topic, .. } => Some(topic),
        }
    }
}

impl UserSession {
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn asked(&self) -> u32 {
        self.asked
    }

    /// Switches topic. Counters are kept; a pending question is dropped.
    pub fn select_topic(&mut self, topic: Topic) {
        self.state = SessionState::Idle { topic };
    }

    /// Makes a question picked for the current topic the pending one,
    /// replacing any unanswered question.
    ///
    /// Returns `Ok(None)` and leaves the session untouched when no topic is
    /// set or when `pick` fails.
    pub fn ask<E>(
        &mut self,
        pick: impl FnOnce(&Topic) -> Result<PresentedQuestion, E>,
    ) -> Result<Option<PresentedQuestion>, E> {
        let Some(topic) = self.state.topic().cloned() else {
            return Ok(None);
        };
        let question = pick(&topic)?;
        self.asked += 1;
        self.state = SessionState::AwaitingAnswer {
            topic,
            pending: question.clone(),
        };
        Ok(Some(question))
    }

    /// Evaluates `choice` against the pending question and clears it.
    ///
    /// Returns `None` when nothing is pending.
    pub fn answer(&mut self, choice: usize) -> Option<Verdict> {
        match std::mem::take(&mut self.state) {
            SessionState::AwaitingAnswer { topic, pending } => {
                let correct = pending.is_correct(choice);
                if correct {
                    self.score += 1;
                }
                self.state = SessionState::Idle { topic };
                Some(Verdict {
                    correct,
                    question: pending,
                    score: self.score,
                    asked: self.asked,
                })
            }
            other => {
                self.state = other;
                None
            }
        }
    }
}

//! The quiz state machine shared by both transports.
//!
//! Every operation locks the user's session, applies one transition and
//! returns a reply value. Sending the reply is left to the caller, after the
//! lock is gone.

use std::sync::{Arc, Mutex, PoisonError};

use rand::rngs::StdRng;
use teloxide::types::UserId;
use tracing::{debug, info};

use crate::{
    bank::{QuestionBank, Topic, UnknownTopicError},
    matcher::match_topic,
    replies::{AnswerReply, QuizReply, Score, TopicReply},
    selector::{self, PresentedQuestion},
    state::UserSession,
    store::SessionStore,
};

pub struct QuizEngine {
    bank: Arc<QuestionBank>,
    sessions: SessionStore,
    randomness: Randomness,
}

enum Randomness {
    /// The calling thread's generator; users never wait on each other for it.
    Thread,
    /// A single seeded generator, for reproducible runs.
    Seeded(Mutex<StdRng>),
}

impl QuizEngine {
    pub fn new(bank: Arc<QuestionBank>) -> Self {
        Self {
            bank,
            sessions: SessionStore::new(),
            randomness: Randomness::Thread,
        }
    }

    pub fn with_rng(bank: Arc<QuestionBank>, rng: StdRng) -> Self {
        Self {
            bank,
            sessions: SessionStore::new(),
            randomness: Randomness::Seeded(Mutex::new(rng)),
        }
    }

    pub fn topics(&self) -> &[Topic] {
        self.bank.topics()
    }

    pub async fn select_topic(&self, user: UserId, text: &str) -> TopicReply {
        let Some(topic) = match_topic(text, self.bank.topics()) else {
            debug!(user = user.0, "No topic in {:?}", text);
            return TopicReply::NotRecognized;
        };

        let session = self.sessions.session(user);
        session.lock().await.select_topic(topic.clone());
        info!(user = user.0, "Selected topic '{}'", topic);
        TopicReply::Selected(topic.clone())
    }

    pub async fn start_quiz(&self, user: UserId) -> Result<QuizReply, UnknownTopicError> {
        let session = self.sessions.session(user);
        let mut session = session.lock().await;

        let Some(question) = session.ask(|topic| self.pick(topic))? else {
            return Ok(QuizReply::NoTopic);
        };
        info!(
            user = user.0,
            asked = session.asked(),
            "Asking {:?}",
            question.prompt()
        );
        Ok(QuizReply::Question(question))
    }

    pub async fn answer(&self, user: UserId, choice: usize) -> AnswerReply {
        let session = self.sessions.session(user);
        let mut session = session.lock().await;

        match session.answer(choice) {
            Some(verdict) => {
                info!(
                    user = user.0,
                    correct = verdict.correct,
                    score = verdict.score,
                    asked = verdict.asked,
                    "Answered with option {}",
                    choice
                );
                AnswerReply::Verdict(verdict)
            }
            None => {
                debug!(user = user.0, "Answer without a pending question");
                AnswerReply::NoActiveQuestion
            }
        }
    }

    pub async fn score(&self, user: UserId) -> Score {
        let session = self.session(user).await;
        Score {
            score: session.score(),
            asked: session.asked(),
        }
    }

    pub fn stop(&self, user: UserId) {
        if self.sessions.remove(user) {
            info!(user = user.0, "Session closed");
        }
    }

    fn pick(&self, topic: &Topic) -> Result<PresentedQuestion, UnknownTopicError> {
        match &self.randomness {
            Randomness::Thread => selector::pick(&self.bank, topic, &mut rand::thread_rng()),
            Randomness::Seeded(rng) => {
                let mut rng = rng.lock().unwrap_or_else(PoisonError::into_inner);
                selector::pick(&self.bank, topic, &mut *rng)
            }
        }
    }

    /// A copy of the user's current session.
    pub async fn session(&self, user: UserId) -> UserSession {
        self.sessions.session(user).lock().await.clone()
    }
}

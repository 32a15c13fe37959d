use std::{
    collections::{HashMap, HashSet},
    fmt,
    path::{Path, PathBuf},
};

use serde::{
    de::{MapAccess, Visitor},
    Deserialize, Deserializer,
};
use thiserror::Error;
use tracing::{debug, info};

use super::{
    question::{Question, QuestionError, Topic},
    QuestionBank,
};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read question bank {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed question bank: {0}")]
    Json(#[from] serde_json::Error),
    #[error("question bank contains no topics")]
    NoTopics,
    #[error("topic names must not be blank")]
    BlankTopic,
    #[error("topic '{0}' appears more than once")]
    DuplicateTopic(String),
    #[error("topic '{0}' has no questions")]
    EmptyTopic(String),
    #[error("topic '{topic}', question #{position}: {source}")]
    InvalidQuestion {
        topic: String,
        position: usize,
        source: QuestionError,
    },
}

/// One record of the bank file, before validation.
#[derive(Debug, Deserialize)]
struct RawQuestion {
    #[serde(rename = "q")]
    prompt: String,
    #[serde(rename = "opts")]
    options: Vec<String>,
    #[serde(rename = "ans")]
    correct: usize,
    #[serde(rename = "spiega", default)]
    explanation: String,
}

/// Topics in file order; a plain map would lose the order the matcher relies on.
struct RawBank(Vec<(String, Vec<RawQuestion>)>);

impl<'de> Deserialize<'de> for RawBank {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RawBankVisitor;

        impl<'de> Visitor<'de> for RawBankVisitor {
            type Value = RawBank;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map from topic name to a list of questions")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<RawBank, A::Error> {
                let mut topics = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, Vec<RawQuestion>>()? {
                    topics.push(entry);
                }
                Ok(RawBank(topics))
            }
        }

        deserializer.deserialize_map(RawBankVisitor)
    }
}

impl QuestionBank {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let bank = Self::from_json(&json)?;
        info!(
            "Loaded {} topics from {}",
            bank.topics().len(),
            path.display()
        );
        Ok(bank)
    }

    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let RawBank(raw) = serde_json::from_str(json)?;
        if raw.is_empty() {
            return Err(LoadError::NoTopics);
        }

        let mut seen = HashSet::with_capacity(raw.len());
        let mut topics = Vec::with_capacity(raw.len());
        let mut questions = HashMap::with_capacity(raw.len());

        for (name, records) in raw {
            if name.trim().is_empty() {
                return Err(LoadError::BlankTopic);
            }
            if !seen.insert(name.clone()) {
                return Err(LoadError::DuplicateTopic(name));
            }
            if records.is_empty() {
                return Err(LoadError::EmptyTopic(name));
            }

            let validated = records
                .into_iter()
                .enumerate()
                .map(|(idx, record)| {
                    Question::new(record.prompt, record.options, record.correct, record.explanation)
                        .map_err(|source| LoadError::InvalidQuestion {
                            topic: name.clone(),
                            position: idx + 1,
                            source,
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;

            debug!("Loaded {} questions for '{}'", validated.len(), name);
            let topic = Topic::new(name);
            topics.push(topic.clone());
            questions.insert(topic, validated);
        }

        Ok(Self { topics, questions })
    }
}

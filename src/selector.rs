//! Random question choice and option shuffling.
//!
//! Shuffling is split into a pure step ([`present`]) and a random step
//! ([`Permutation::random`]) so the index remapping can be tested with fixed
//! permutations and the randomness with a seeded generator.

use rand::{seq::SliceRandom, Rng};

use crate::bank::{Question, QuestionBank, Topic, UnknownTopicError, OPTION_COUNT, OPTION_LETTERS};

/// An ordering of the option slots: position `i` shows original option `self.0[i]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Permutation([usize; OPTION_COUNT]);

/// A question as shown to one user, options in shuffled order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentedQuestion {
    prompt: String,
    options: [String; OPTION_COUNT],
    correct: usize,
    explanation: String,
}

impl Permutation {
    pub fn identity() -> Self {
        Self([0, 1, 2, 3])
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut order = Self::identity().0;
        order.shuffle(rng);
        Self(order)
    }

    /// Where original slot `slot` ends up after shuffling.
    pub fn position_of(&self, slot: usize) -> usize {
        let mut inverse = [0; OPTION_COUNT];
        for (position, &original) in self.0.iter().enumerate() {
            inverse[original] = position;
        }
        inverse[slot]
    }
}

/// Fixed orders for exercising the remapping without randomness.
#[cfg(test)]
impl Permutation {
    /// Returns `None` unless `order` is a bijection over the option slots.
    pub(crate) fn new(order: [usize; OPTION_COUNT]) -> Option<Self> {
        let mut seen = [false; OPTION_COUNT];
        for &slot in &order {
            if slot >= OPTION_COUNT || seen[slot] {
                return None;
            }
            seen[slot] = true;
        }
        Some(Self(order))
    }
}

impl PresentedQuestion {
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn options(&self) -> &[String; OPTION_COUNT] {
        &self.options
    }

    pub fn correct(&self) -> usize {
        self.correct
    }

    pub fn correct_letter(&self) -> char {
        OPTION_LETTERS[self.correct]
    }

    pub fn correct_option(&self) -> &str {
        &self.options[self.correct]
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.correct
    }
}

pub fn present(question: &Question, permutation: Permutation) -> PresentedQuestion {
    PresentedQuestion {
        prompt: question.prompt().to_owned(),
        options: permutation.0.map(|slot| question.options()[slot].clone()),
        correct: permutation.position_of(question.correct()),
        explanation: question.explanation().to_owned(),
    }
}

pub fn pick<R: Rng + ?Sized>(
    bank: &QuestionBank,
    topic: &Topic,
    rng: &mut R,
) -> Result<PresentedQuestion, UnknownTopicError> {
    // The loader rejects topics without questions, so `choose` only fails
    // for a topic the bank does not know.
    let question = bank
        .questions_for(topic)?
        .choose(rng)
        .ok_or_else(|| UnknownTopicError(topic.clone()))?;
    Ok(present(question, Permutation::random(rng)))
}

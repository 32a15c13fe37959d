use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use teloxide::types::UserId;

use crate::state::UserSession;

/// A session behind its own lock, so events of one user are serialized while
/// different users never wait on each other.
pub type SharedSession = Arc<tokio::sync::Mutex<UserSession>>;

/// Owns every [`UserSession`], keyed by Telegram user.
///
/// The outer lock is only held to look up, insert or remove an entry.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<UserId, SharedSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the session of `user`, creating a fresh one on first contact.
    pub fn session(&self, user: UserId) -> SharedSession {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        sessions.entry(user).or_default().clone()
    }

    /// Forgets `user` entirely. Returns whether a session existed.
    pub fn remove(&self, user: UserId) -> bool {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        sessions.remove(&user).is_some()
    }
}

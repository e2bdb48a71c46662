use crate::config::AdvisorConfig;
use blackjack_lib::prelude::*;
use log::{info, warn};
use std::collections::HashMap;
use thiserror::Error;

/// Identifier handed out for each session.
pub type SessionId = u64;

/// Most sessions kept open at once by default.
pub const DEFAULT_MAX_SESSIONS: usize = 1024;

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("{max} sessions are already open, close one first")]
    Full { max: usize },
    #[error(transparent)]
    Advisor(#[from] AdvisorError),
}

/// Holds one `AdvisorSession` per session id. Sessions never share a count or a hand.
#[derive(Debug)]
pub struct SessionStore {
    sessions: HashMap<SessionId, AdvisorSession>,
    next_id: SessionId,
    max_sessions: usize,
}

impl SessionStore {
    pub fn new(max_sessions: usize) -> Self {
        SessionStore {
            sessions: HashMap::new(),
            next_id: 0,
            max_sessions,
        }
    }

    /// Starts a new session and returns its id.
    pub fn create(&mut self, config: &AdvisorConfig) -> Result<SessionId, StoreError> {
        if self.sessions.len() >= self.max_sessions {
            warn!("session limit of {} reached", self.max_sessions);
            return Err(StoreError::Full {
                max: self.max_sessions,
            });
        }
        let session = config.session()?;
        self.next_id += 1;
        let id = self.next_id;
        self.sessions.insert(id, session);
        info!("session #{} created over {} deck(s)", id, config.num_decks);
        Ok(id)
    }

    pub fn get(&self, id: SessionId) -> Option<&AdvisorSession> {
        self.sessions.get(&id)
    }

    pub fn get_mut(&mut self, id: SessionId) -> Option<&mut AdvisorSession> {
        self.sessions.get_mut(&id)
    }

    pub fn remove(&mut self, id: SessionId) -> Option<AdvisorSession> {
        let removed = self.sessions.remove(&id);
        if removed.is_some() {
            info!("session #{} closed", id);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        SessionStore::new(DEFAULT_MAX_SESSIONS)
    }
}

//! In-memory per-user session state
//!
//! Holds the `/config` conversation and the pending-reset flag for each
//! user. Nothing here is persisted. Entries idle longer than the timeout
//! are discarded when next touched or by [`SessionStore::purge_expired`].

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::error::{FinbotError, FinbotResult};
use crate::models::{SessionId, UserId};

use super::conversation::Conversation;

/// A `/config` flow in progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveConversation {
    pub id: SessionId,
    pub state: Conversation,
}

impl ActiveConversation {
    pub fn start() -> Self {
        Self {
            id: SessionId::new(),
            state: Conversation::start(),
        }
    }
}

/// Everything the bot remembers about a user between messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserSession {
    pub conversation: Option<ActiveConversation>,
    pub pending_reset: bool,
}

impl UserSession {
    /// No conversation and no pending reset
    pub fn is_idle(&self) -> bool {
        self.conversation.is_none() && !self.pending_reset
    }
}

struct SessionEntry {
    session: UserSession,
    last_activity: Instant,
}

/// Session state keyed by user
pub struct SessionStore {
    sessions: Mutex<HashMap<UserId, SessionEntry>>,
    timeout: Option<Duration>,
}

impl SessionStore {
    /// `timeout` of `None` keeps sessions until they finish
    pub fn new(timeout: Option<Duration>) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            timeout,
        }
    }

    /// Remove and return the user's session as of `now`
    ///
    /// An expired session is dropped and a fresh one returned in its place.
    pub fn take(&self, user: UserId, now: Instant) -> FinbotResult<UserSession> {
        let mut sessions = self.lock()?;
        let Some(entry) = sessions.remove(&user) else {
            return Ok(UserSession::default());
        };

        if self.is_expired(entry.last_activity, now) {
            info!(
                user = %user,
                state = entry
                    .session
                    .conversation
                    .as_ref()
                    .map(|c| c.state.state_name())
                    .unwrap_or("idle"),
                "session expired"
            );
            return Ok(UserSession::default());
        }
        Ok(entry.session)
    }

    /// Store the user's session, stamped with `now`
    ///
    /// Idle sessions are not kept.
    pub fn put(&self, user: UserId, session: UserSession, now: Instant) -> FinbotResult<()> {
        let mut sessions = self.lock()?;
        if session.is_idle() {
            sessions.remove(&user);
        } else {
            sessions.insert(
                user,
                SessionEntry {
                    session,
                    last_activity: now,
                },
            );
        }
        Ok(())
    }

    /// Drop every session idle past the timeout, returning how many went
    pub fn purge_expired(&self, now: Instant) -> FinbotResult<usize> {
        let mut sessions = self.lock()?;
        let before = sessions.len();
        sessions.retain(|_, entry| !self.is_expired(entry.last_activity, now));
        let purged = before - sessions.len();
        if purged > 0 {
            debug!(purged, "purged expired sessions");
        }
        Ok(purged)
    }

    /// Number of users with live session state
    pub fn len(&self) -> usize {
        self.sessions.lock().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the user currently has a `/config` conversation open
    pub fn has_conversation(&self, user: UserId) -> bool {
        self.sessions
            .lock()
            .map(|s| {
                s.get(&user)
                    .map(|e| e.session.conversation.is_some())
                    .unwrap_or(false)
            })
            .unwrap_or(false)
    }

    fn is_expired(&self, last_activity: Instant, now: Instant) -> bool {
        match self.timeout {
            Some(timeout) => now.saturating_duration_since(last_activity) > timeout,
            None => false,
        }
    }

    fn lock(&self) -> FinbotResult<std::sync::MutexGuard<'_, HashMap<UserId, SessionEntry>>> {
        self.sessions
            .lock()
            .map_err(|e| FinbotError::Session(format!("Failed to acquire session table: {}", e)))
    }
}

/*!
 * Session store for the target language each user selected.
 */

use log::debug;
use parking_lot::RwLock;
use std::collections::HashMap;

use crate::language_utils::Language;

/// Target-language preference of one user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserSession {
    /// Chat user identifier
    pub user_id: i64,
    /// Language replies are translated into
    pub target_language: Language,
}

/// Storage for user sessions
///
/// Neither operation suspends, so concurrent handlers never observe a
/// half-applied update; the last write wins.
pub trait SessionStore: Send + Sync {
    /// Target language of a user, or the store's default when none was selected
    fn get(&self, user_id: i64) -> Language;

    /// Record the user's selection, replacing any previous one
    fn set(&self, user_id: i64, language: Language);
}

/// Process-lifetime session store without eviction
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    /// Sessions keyed by user id
    sessions: RwLock<HashMap<i64, UserSession>>,
    /// Language for users without a session
    default_language: Language,
}

impl InMemorySessionStore {
    /// Create an empty store with the given default language
    pub fn new(default_language: Language) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            default_language,
        }
    }

    /// Session of a user, if one was created
    pub fn session(&self, user_id: i64) -> Option<UserSession> {
        self.sessions.read().get(&user_id).copied()
    }

    /// Number of users with a session
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    /// Whether no user has selected a language yet
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, user_id: i64) -> Language {
        self.session(user_id)
            .map(|session| session.target_language)
            .unwrap_or(self.default_language)
    }

    fn set(&self, user_id: i64, language: Language) {
        debug!("User {} selected target language {}", user_id, language);
        self.sessions.write().insert(user_id, UserSession { user_id, target_language: language });
    }
}

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// The authenticated user as the renderer sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "name")]
    pub display_name: String,
    #[serde(rename = "token")]
    pub auth_token: String,
}

impl Session {
    pub fn new(display_name: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            auth_token: auth_token.into(),
        }
    }
}

/// Process-lifetime holder of the single current session. Never persisted.
#[derive(Debug, Default)]
pub struct SessionStore {
    current: Mutex<Option<Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any existing session.
    pub fn set_session(&self, display_name: &str, token: &str) {
        self.replace_session(Some(Session::new(display_name.trim(), token.trim())));
    }

    /// Swaps in `session` as-is and returns what was stored before.
    pub fn replace_session(&self, session: Option<Session>) -> Option<Session> {
        match self.current.lock() {
            Ok(mut guard) => std::mem::replace(&mut *guard, session),
            Err(poisoned) => std::mem::replace(&mut *poisoned.into_inner(), session),
        }
    }

    pub fn get_session(&self) -> Option<Session> {
        match self.current.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn clear_session(&self) -> Option<Session> {
        match self.current.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.get_session().is_some()
    }

    /// `Bearer <token>` for the current session, if any.
    pub fn authorization_header(&self) -> Option<String> {
        self.get_session()
            .filter(|session| !session.auth_token.is_empty())
            .map(|session| format!("Bearer {}", session.auth_token))
    }
}

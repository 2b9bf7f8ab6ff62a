//! Session state shared across the client

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// An authenticated session against the Atelier backend.
///
/// The backend issues an opaque bearer token with no client-visible expiry;
/// a stale token only surfaces when a later call is rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// The access token presented as a bearer credential
    pub access_token: String,

    /// The token type, always "bearer" for this backend
    #[serde(default = "bearer")]
    pub token_type: String,
}

fn bearer() -> String {
    "bearer".to_string()
}

impl Session {
    /// Create a session from a bare access token
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: bearer(),
        }
    }
}

/// Two-state view of the client: anonymous or holding a token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated(String),
}

/// Shared mutable cell holding the current session.
///
/// Every sub-client keeps a clone, so a login observed through one is
/// immediately visible through all of them.
#[derive(Clone, Default)]
pub(crate) struct SessionHandle {
    current: Arc<Mutex<Option<Session>>>,
}

impl SessionHandle {
    pub(crate) fn new(initial: Option<Session>) -> Self {
        Self {
            current: Arc::new(Mutex::new(initial)),
        }
    }

    /// Get the current session
    pub(crate) fn get(&self) -> Option<Session> {
        let current = self.current.lock().unwrap();
        current.clone()
    }

    /// Install a session
    pub(crate) fn set(&self, session: Session) {
        let mut current = self.current.lock().unwrap();
        *current = Some(session);
    }

    /// Drop the session, returning to the anonymous state
    pub(crate) fn clear(&self) {
        let mut current = self.current.lock().unwrap();
        *current = None;
    }

    /// The current access token, if authenticated
    pub(crate) fn token(&self) -> Option<String> {
        let current = self.current.lock().unwrap();
        current.as_ref().map(|session| session.access_token.clone())
    }

    /// Derive the two-state view from the cell
    pub(crate) fn state(&self) -> SessionState {
        match self.token() {
            Some(token) => SessionState::Authenticated(token),
            None => SessionState::Anonymous,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_observe_the_same_session() {
        let handle = SessionHandle::new(None);
        let other = handle.clone();

        handle.set(Session::new("abc"));
        assert_eq!(other.token(), Some("abc".to_string()));

        other.clear();
        assert_eq!(handle.token(), None);
    }

    #[test]
    fn token_type_defaults_to_bearer() {
        let session: Session = serde_json::from_str(r#"{"access_token":"abc"}"#).unwrap();
        assert_eq!(session.token_type, "bearer");
    }

    #[test]
    fn state_follows_the_cell() {
        let handle = SessionHandle::new(None);
        assert_eq!(handle.state(), SessionState::Anonymous);

        handle.set(Session::new("abc"));
        assert_eq!(handle.state(), SessionState::Authenticated("abc".to_string()));
    }
}

//! Configuration options for the Atelier client

use std::time::Duration;

/// Base URL used when `ATELIER_BACKEND_URL` is not set
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Environment variable consulted by [`crate::Atelier::from_env`]
pub const BASE_URL_ENV: &str = "ATELIER_BACKEND_URL";

/// How long the durable fit preference stays valid (365 days)
const PREFERENCE_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Configuration options for the Atelier client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Whether successful logins write the token to the durable store
    pub persist_session: bool,

    /// Time-to-live for the durable fit preference entry
    pub preference_ttl: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            persist_session: true,
            preference_ttl: PREFERENCE_TTL,
        }
    }
}

impl ClientOptions {
    /// Set whether to persist the session token
    pub fn with_persist_session(mut self, value: bool) -> Self {
        self.persist_session = value;
        self
    }

    /// Set the time-to-live for the durable preference entry
    pub fn with_preference_ttl(mut self, value: Duration) -> Self {
        self.preference_ttl = value;
        self
    }
}

//! Authentication and session management for the Atelier backend

mod session;

use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::ClientOptions;
use crate::error::{Error, Result};
use crate::fetch::Fetch;
use crate::store::DurableStore;

pub use session::{Session, SessionState};
pub(crate) use session::SessionHandle;

/// Durable store entry the session token is persisted under
pub const TOKEN_ENTRY: &str = "token";

/// Client for authentication
pub struct Auth {
    /// The base URL for the backend
    url: String,

    /// HTTP client used for requests
    client: Client,

    /// The current session, shared with the other sub-clients
    session: SessionHandle,

    /// Durable store the token is persisted to
    store: Arc<dyn DurableStore>,

    /// Client options
    options: ClientOptions,
}

impl Auth {
    /// Create a new Auth client
    pub(crate) fn new(
        url: &str,
        client: Client,
        session: SessionHandle,
        store: Arc<dyn DurableStore>,
        options: ClientOptions,
    ) -> Self {
        Self {
            url: url.to_string(),
            client,
            session,
            store,
            options,
        }
    }

    fn get_auth_url(&self, path: &str) -> String {
        format!("{}/api/auth{}", self.url, path)
    }

    /// Log in with a username and password.
    ///
    /// On success the session becomes visible to every sub-client and, when
    /// enabled in the options, the token is persisted so the session survives
    /// a restart. Any failure surfaces as the same coarse authentication
    /// error and leaves the client anonymous.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session> {
        let url = self.get_auth_url("/login");

        let fields = vec![
            ("username".to_string(), username.to_string()),
            ("password".to_string(), password.to_string()),
        ];

        let result = Fetch::post(&self.client, &url)
            .form(fields)
            .execute::<Session>()
            .await;

        let session = match result {
            Ok(session) => session,
            Err(err) => return Err(Error::auth(format!("login for {} failed: {}", username, err))),
        };

        self.install(session.clone());
        Ok(session)
    }

    /// Register a new account.
    ///
    /// The backend issues a token straight away, so a successful registration
    /// leaves the client authenticated just like a login. Failures surface as
    /// the same coarse authentication error.
    pub async fn register(&self, email: &str, password: &str) -> Result<Session> {
        let url = self.get_auth_url("/register");

        let mut body = HashMap::new();
        body.insert("email".to_string(), email.to_string());
        body.insert("password".to_string(), password.to_string());

        let result = Fetch::post(&self.client, &url)
            .json(&body)?
            .execute::<Session>()
            .await;

        let session = match result {
            Ok(session) => session,
            Err(err) => {
                return Err(Error::auth(format!(
                    "registration for {} failed: {}",
                    email, err
                )))
            }
        };

        self.install(session.clone());
        Ok(session)
    }

    /// Log out.
    ///
    /// Clears the in-memory session and the persisted token without
    /// contacting the backend; safe to call while already anonymous.
    pub fn logout(&self) {
        self.session.clear();
        self.store.remove(TOKEN_ENTRY);
    }

    /// Get the current session
    pub fn session(&self) -> Option<Session> {
        self.session.get()
    }

    /// The two-state view of the client: anonymous or authenticated
    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    /// Whether a session is currently installed
    pub fn is_authenticated(&self) -> bool {
        self.session.get().is_some()
    }

    /// The current access token, if authenticated
    pub fn access_token(&self) -> Option<String> {
        self.session.token()
    }

    fn install(&self, session: Session) {
        if self.options.persist_session {
            self.store.set(TOKEN_ENTRY, &session.access_token, None);
        }
        self.session.set(session);
    }
}

//! Atelier Rust Client Library
//!
//! A Rust client for the Atelier storefront backend: authentication, fit
//! preferences with a durable local copy, the personalized product feed,
//! cart actions, and the admin catalogue importer.

pub mod auth;
pub mod preferences;
pub mod products;
pub mod cart;
pub mod admin;
pub mod error;
pub mod config;
pub mod fetch;
pub mod store;

use reqwest::Client;
use std::env;
use std::sync::Arc;

use crate::admin::AdminClient;
use crate::auth::{Auth, Session, SessionHandle};
use crate::cart::CartClient;
use crate::config::{ClientOptions, BASE_URL_ENV, DEFAULT_BASE_URL};
use crate::preferences::Preferences;
use crate::products::{Feed, ProductsClient};
use crate::store::{DurableStore, MemoryStore};

/// The main entry point for the Atelier client
pub struct Atelier {
    /// The base URL for the backend
    pub url: String,
    /// HTTP client used for requests
    pub http_client: Client,
    /// Auth client for login, registration and session state
    pub auth: Auth,
    /// Preference store for the fit preference
    pub preferences: Preferences,
    /// Feed controller for the personalized product feed
    pub feed: Feed,
    /// Admin client for catalogue imports
    pub admin: AdminClient,
    /// Client options
    pub options: ClientOptions,
    /// Session shared across sub-clients
    session: SessionHandle,
}

impl Atelier {
    /// Create a new Atelier client backed by in-memory stores
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the Atelier backend
    ///
    /// # Example
    ///
    /// ```
    /// use atelier_client::Atelier;
    ///
    /// let atelier = Atelier::new("http://localhost:8000");
    /// ```
    pub fn new(base_url: &str) -> Self {
        Self::new_with_options(base_url, ClientOptions::default())
    }

    /// Create a new Atelier client with custom options
    ///
    /// # Example
    ///
    /// ```
    /// use atelier_client::{Atelier, config::ClientOptions};
    ///
    /// let options = ClientOptions::default().with_persist_session(false);
    /// let atelier = Atelier::new_with_options("http://localhost:8000", options);
    /// ```
    pub fn new_with_options(base_url: &str, options: ClientOptions) -> Self {
        Self::new_with_stores(
            base_url,
            options,
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryStore::new()),
        )
    }

    /// Create a new Atelier client over explicit durable stores: one for the
    /// session token, one for the preference. A token already present in the
    /// token store restores the session, so a client built over the same
    /// store as a previous one starts out authenticated.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use atelier_client::{Atelier, config::ClientOptions, store::MemoryStore};
    ///
    /// let atelier = Atelier::new_with_stores(
    ///     "http://localhost:8000",
    ///     ClientOptions::default(),
    ///     Arc::new(MemoryStore::new()),
    ///     Arc::new(MemoryStore::new()),
    /// );
    /// ```
    pub fn new_with_stores(
        base_url: &str,
        options: ClientOptions,
        token_store: Arc<dyn DurableStore>,
        preference_store: Arc<dyn DurableStore>,
    ) -> Self {
        let http_client = Client::new();

        let session = SessionHandle::new(token_store.get(auth::TOKEN_ENTRY).map(Session::new));

        let auth = Auth::new(
            base_url,
            http_client.clone(),
            session.clone(),
            token_store,
            options.clone(),
        );
        let preferences = Preferences::new(
            base_url,
            http_client.clone(),
            session.clone(),
            preference_store,
            options.clone(),
        );
        let feed = Feed::new(ProductsClient::new(
            base_url,
            http_client.clone(),
            session.clone(),
        ));
        let admin = AdminClient::new(base_url, http_client.clone(), session.clone());

        Self {
            url: base_url.to_string(),
            http_client,
            auth,
            preferences,
            feed,
            admin,
            options,
            session,
        }
    }

    /// Create a new Atelier client with the base URL taken from the
    /// `ATELIER_BACKEND_URL` environment variable, falling back to
    /// `http://localhost:8000`
    pub fn from_env() -> Self {
        let base_url = env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(&base_url)
    }

    /// Get a reference to the auth client
    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// Get a reference to the preference store
    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Get a reference to the feed controller
    pub fn feed(&self) -> &Feed {
        &self.feed
    }

    /// Create a ProductsClient for direct feed queries
    pub fn products(&self) -> ProductsClient {
        ProductsClient::new(&self.url, self.http_client.clone(), self.session.clone())
    }

    /// Create a CartClient for cart actions
    pub fn cart(&self) -> CartClient {
        CartClient::new(&self.url, self.http_client.clone(), self.session.clone())
    }

    /// Get a reference to the admin client
    pub fn admin(&self) -> &AdminClient {
        &self.admin
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::config::ClientOptions;
    pub use crate::error::{Error, Result};
    pub use crate::preferences::{Preference, Size, SkinTone};
    pub use crate::products::{FeedState, SortKey};
    pub use crate::Atelier;
}

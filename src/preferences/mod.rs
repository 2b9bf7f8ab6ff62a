//! Fit preference store: durable local copy plus best-effort backend mirror

mod types;

use reqwest::Client;
use std::sync::{Arc, Mutex};

use crate::auth::SessionHandle;
use crate::config::ClientOptions;
use crate::fetch::Fetch;
use crate::store::DurableStore;

pub use types::{Preference, Size, SkinTone};

/// Durable store entry the preference is persisted under
pub const PREFERENCE_ENTRY: &str = "fit";

/// Client for the fit preference.
///
/// The durable local copy is authoritative for rendering; the backend profile
/// only ever receives a best-effort mirror of it.
pub struct Preferences {
    /// The base URL for the backend
    url: String,

    /// HTTP client used for requests
    client: Client,

    /// The current session, used to authenticate the mirror
    session: SessionHandle,

    /// Durable store the preference is persisted to
    store: Arc<dyn DurableStore>,

    /// Client options
    options: ClientOptions,

    /// In-memory copy of the preference
    current: Mutex<Preference>,
}

impl Preferences {
    /// Create a new Preferences client, hydrating from the durable store
    pub(crate) fn new(
        url: &str,
        client: Client,
        session: SessionHandle,
        store: Arc<dyn DurableStore>,
        options: ClientOptions,
    ) -> Self {
        let current = read_entry(store.as_ref());
        Self {
            url: url.to_string(),
            client,
            session,
            store,
            options,
            current: Mutex::new(current),
        }
    }

    /// Read the preference from the durable store.
    ///
    /// An absent or unreadable entry yields the empty preference; a parse
    /// failure is never surfaced.
    pub fn load(&self) -> Preference {
        read_entry(self.store.as_ref())
    }

    /// The in-memory copy of the preference
    pub fn current(&self) -> Preference {
        *self.current.lock().unwrap()
    }

    /// Whether the selector prompt should open automatically: true exactly
    /// when nothing has been declared yet
    pub fn should_prompt(&self) -> bool {
        self.current().is_empty()
    }

    /// Save a preference.
    ///
    /// The durable copy and the in-memory copy are written synchronously
    /// before the backend mirror is attempted, so a failed mirror never loses
    /// the local choice. Mirror failures are swallowed; this operation cannot
    /// fail.
    pub async fn save(&self, preference: Preference) {
        match serde_json::to_string(&preference) {
            Ok(raw) => {
                self.store
                    .set(PREFERENCE_ENTRY, &raw, Some(self.options.preference_ttl))
            }
            Err(err) => log::debug!("failed to encode preference: {}", err),
        }

        {
            let mut current = self.current.lock().unwrap();
            *current = preference;
        }

        if let Err(err) = self.mirror(&preference).await {
            log::debug!("profile mirror failed, keeping local preference: {}", err);
        }
    }

    /// Mirror the preference to the backend profile
    async fn mirror(&self, preference: &Preference) -> crate::error::Result<()> {
        let url = format!("{}/api/user/profile", self.url);

        Fetch::put(&self.client, &url)
            .maybe_bearer_auth(self.session.token().as_deref())
            .json(preference)?
            .execute_raw()
            .await?;

        Ok(())
    }
}

fn read_entry(store: &dyn DurableStore) -> Preference {
    let raw = match store.get(PREFERENCE_ENTRY) {
        Some(raw) => raw,
        None => return Preference::default(),
    };

    match serde_json::from_str(&raw) {
        Ok(preference) => preference,
        Err(err) => {
            log::debug!("stored preference is unreadable, starting empty: {}", err);
            Preference::default()
        }
    }
}

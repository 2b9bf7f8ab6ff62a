//! Cart actions against the Atelier backend

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::auth::SessionHandle;
use crate::error::Result;
use crate::fetch::Fetch;

/// A cart line item, echoed back by the backend on creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    /// Product being added
    #[serde(rename = "productId")]
    pub product_id: String,

    /// Quantity of that product
    pub qty: u32,
}

/// Client for the shopping cart
pub struct CartClient {
    /// The base URL for the backend
    url: String,

    /// HTTP client used for requests
    client: Client,

    /// The current session; the backend rejects anonymous cart writes
    session: SessionHandle,
}

impl CartClient {
    /// Create a new CartClient
    pub(crate) fn new(url: &str, client: Client, session: SessionHandle) -> Self {
        Self {
            url: url.to_string(),
            client,
            session,
        }
    }

    /// Add a product to the cart
    pub async fn add(&self, product_id: &str, qty: u32) -> Result<CartEntry> {
        let url = format!("{}/api/cart", self.url);

        let entry = CartEntry {
            product_id: product_id.to_string(),
            qty,
        };

        let created = Fetch::post(&self.client, &url)
            .maybe_bearer_auth(self.session.token().as_deref())
            .json(&entry)?
            .execute::<CartEntry>()
            .await?;

        Ok(created)
    }

    /// Add a single unit of a product, the storefront's default action
    pub async fn add_one(&self, product_id: &str) -> Result<CartEntry> {
        self.add(product_id, 1).await
    }
}

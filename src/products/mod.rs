//! Product feed queries against the Atelier backend

pub mod feed;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::auth::SessionHandle;
use crate::error::Result;
use crate::fetch::Fetch;
use crate::preferences::{Preference, Size, SkinTone};

pub use feed::{Feed, FeedState};

/// A product as served by the feed endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Opaque product identifier
    pub id: String,

    /// Display title
    pub title: String,

    /// Price in integer minor units
    pub price: i64,

    /// Gallery images, may be empty
    #[serde(default)]
    pub images: Vec<ProductImage>,

    /// Descriptive tags, may be empty
    #[serde(default)]
    pub tags: Vec<String>,

    /// Stylist combo this product belongs to, if any
    #[serde(rename = "comboCode", default, skip_serializing_if = "Option::is_none")]
    pub combo_code: Option<String>,
}

/// A product gallery image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductImage {
    pub url: String,

    /// Alt text; the storefront falls back to the title when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

/// Sort order for the feed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Newest,
    Trending,
    Price,
}

impl SortKey {
    /// The wire representation used in the query string
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::Trending => "trending",
            SortKey::Price => "price",
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A derived feed query: the set preference fields plus the sort key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    pub size: Option<Size>,
    pub skin_tone: Option<SkinTone>,
    pub sort: SortKey,
}

impl ProductQuery {
    /// Derive a query from a preference and a sort choice
    pub fn new(preference: Preference, sort: SortKey) -> Self {
        Self {
            size: preference.size,
            skin_tone: preference.skin_tone,
            sort,
        }
    }

    /// Query string pairs in the order the backend expects: size, skinTone,
    /// sort. Unset preference fields are omitted; sort is always sent.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(size) = self.size {
            pairs.push(("size".to_string(), size.as_str().to_string()));
        }
        if let Some(skin_tone) = self.skin_tone {
            pairs.push(("skinTone".to_string(), skin_tone.as_str().to_string()));
        }
        pairs.push(("sort".to_string(), self.sort.as_str().to_string()));
        pairs
    }
}

#[derive(Debug, Deserialize)]
struct ProductPage {
    items: Vec<Product>,
}

/// Client for the product feed endpoint
pub struct ProductsClient {
    /// The base URL for the backend
    url: String,

    /// HTTP client used for requests
    client: Client,

    /// The current session; the feed works anonymously too
    session: SessionHandle,
}

impl ProductsClient {
    /// Create a new ProductsClient
    pub(crate) fn new(url: &str, client: Client, session: SessionHandle) -> Self {
        Self {
            url: url.to_string(),
            client,
            session,
        }
    }

    /// Fetch the products matching a derived query
    pub async fn list(&self, query: &ProductQuery) -> Result<Vec<Product>> {
        let url = format!("{}/api/products", self.url);

        let page = Fetch::get(&self.client, &url)
            .maybe_bearer_auth(self.session.token().as_deref())
            .query(query.to_pairs())
            .execute::<ProductPage>()
            .await?;

        Ok(page.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_pairs_follow_backend_order() {
        let query = ProductQuery::new(Preference::new(Size::L, SkinTone::Fair), SortKey::Newest);
        assert_eq!(
            query.to_pairs(),
            vec![
                ("size".to_string(), "L".to_string()),
                ("skinTone".to_string(), "fair".to_string()),
                ("sort".to_string(), "newest".to_string()),
            ]
        );
    }

    #[test]
    fn unset_preference_fields_are_omitted() {
        let query = ProductQuery::new(Preference::default(), SortKey::Trending);
        assert_eq!(
            query.to_pairs(),
            vec![("sort".to_string(), "trending".to_string())]
        );
    }

    #[test]
    fn product_parses_with_sparse_fields() {
        let product: Product =
            serde_json::from_str(r#"{"id":"p1","title":"Linen Shirt","price":4900}"#).unwrap();
        assert_eq!(product.id, "p1");
        assert_eq!(product.price, 4900);
        assert!(product.images.is_empty());
        assert!(product.tags.is_empty());
        assert_eq!(product.combo_code, None);
    }

    #[test]
    fn product_parses_combo_code() {
        let raw = r#"{
            "id": "p2",
            "title": "Wool Coat",
            "price": 18900,
            "images": [{"url": "https://img.example/coat.jpg", "alt": "coat"}],
            "tags": ["outerwear", "winter"],
            "comboCode": "CAPSULE-3"
        }"#;
        let product: Product = serde_json::from_str(raw).unwrap();
        assert_eq!(product.combo_code.as_deref(), Some("CAPSULE-3"));
        assert_eq!(product.images[0].alt.as_deref(), Some("coat"));
    }
}

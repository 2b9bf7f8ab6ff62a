//! Feed controller: derives queries from preferences and tracks feed state

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, RwLock};

use crate::error::Result;
use crate::preferences::Preference;
use crate::products::{Product, ProductQuery, ProductsClient, SortKey};

/// Rendering state of the product feed.
///
/// An empty result set is distinct from a fetch still in flight.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedState {
    Loading,
    Empty,
    Loaded(Vec<Product>),
}

/// Drives the product feed from the current preference and sort choice.
///
/// Responses are applied last-request-wins: every fetch takes a monotonic
/// sequence number, and a response whose fetch has since been superseded is
/// discarded without touching state.
pub struct Feed {
    products: ProductsClient,
    state: RwLock<FeedState>,
    last_query: Mutex<Option<ProductQuery>>,
    issued: AtomicU64,
}

impl Feed {
    /// Create a new Feed
    pub(crate) fn new(products: ProductsClient) -> Self {
        Self {
            products,
            state: RwLock::new(FeedState::Loading),
            last_query: Mutex::new(None),
            issued: AtomicU64::new(0),
        }
    }

    /// The current feed state
    pub fn state(&self) -> FeedState {
        self.state.read().unwrap().clone()
    }

    /// The most recently issued query, if any
    pub fn last_query(&self) -> Option<ProductQuery> {
        self.last_query.lock().unwrap().clone()
    }

    /// Recompute the derived query and fetch if it differs from the last one.
    ///
    /// Returns the feed state after the call: the freshly applied result, or
    /// the unchanged current state when the query was identical or the
    /// response arrived stale. A failed fetch leaves the feed in `Loading`.
    pub async fn refresh(&self, preference: Preference, sort: SortKey) -> Result<FeedState> {
        let query = ProductQuery::new(preference, sort);

        {
            let last_query = self.last_query.lock().unwrap();
            if last_query.as_ref() == Some(&query) {
                return Ok(self.state());
            }
        }

        self.fetch(query).await
    }

    /// Fetch with the derived query even if it matches the last one
    pub async fn force_refresh(&self, preference: Preference, sort: SortKey) -> Result<FeedState> {
        self.fetch(ProductQuery::new(preference, sort)).await
    }

    async fn fetch(&self, query: ProductQuery) -> Result<FeedState> {
        let ticket = self.issued.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut state = self.state.write().unwrap();
            *state = FeedState::Loading;
            let mut last_query = self.last_query.lock().unwrap();
            *last_query = Some(query.clone());
        }

        let result = self.products.list(&query).await;

        // A newer fetch was issued while this one was in flight; its
        // outcome, success or failure, no longer matters.
        if self.issued.load(Ordering::SeqCst) != ticket {
            return Ok(self.state());
        }

        let items = result?;
        let next = if items.is_empty() {
            FeedState::Empty
        } else {
            FeedState::Loaded(items)
        };

        {
            let mut state = self.state.write().unwrap();
            *state = next.clone();
        }

        Ok(next)
    }
}

//! Per-user country-browsing state.
//!
//! A snapshot of the provider listing is cached per user for the
//! duration of one browsing session so page flips don't re-fetch.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use virtnum_provider::CountryListing;

/// Countries shown per page when browsing.
pub const COUNTRIES_PER_PAGE: usize = 10;

/// One user's country-browsing snapshot.
#[derive(Debug, Clone)]
pub struct CountryBrowse {
    pub countries: Vec<CountryListing>,
    pub page: usize,
}

#[derive(Clone)]
pub struct SessionService {
    browses: Arc<RwLock<HashMap<i64, CountryBrowse>>>,
}

impl SessionService {
    pub fn new() -> Self {
        Self {
            browses: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Replace the user's snapshot with a fresh listing, back on page 0.
    pub async fn set_countries(&self, tg_id: i64, countries: Vec<CountryListing>) {
        self.browses
            .write()
            .await
            .insert(tg_id, CountryBrowse { countries, page: 0 });
    }

    /// Remember the page the user is on. No-op without a snapshot.
    pub async fn set_page(&self, tg_id: i64, page: usize) {
        if let Some(browse) = self.browses.write().await.get_mut(&tg_id) {
            browse.page = page;
        }
    }

    pub async fn browse(&self, tg_id: i64) -> Option<CountryBrowse> {
        self.browses.read().await.get(&tg_id).cloned()
    }
}

/// Items shown on page `page`: fixed-size slices of 10.
pub fn page_slice(countries: &[CountryListing], page: usize) -> &[CountryListing] {
    let start = page * COUNTRIES_PER_PAGE;
    if start >= countries.len() {
        return &[];
    }
    let end = (start + COUNTRIES_PER_PAGE).min(countries.len());
    &countries[start..end]
}

pub fn total_pages(len: usize) -> usize {
    len.div_ceil(COUNTRIES_PER_PAGE).max(1)
}

pub fn has_next_page(len: usize, page: usize) -> bool {
    (page + 1) * COUNTRIES_PER_PAGE < len
}

pub mod config;
pub mod error;
pub mod listing;
pub mod prosper;

use std::sync::Arc;

pub use error::{Error, Result};
pub use listing::{AccessToken, Api, Listing, ListingPage};
pub use prosper::{Client, DEFAULT_FILTER};

/// Runs one token-then-fetch round against the marketplace.
#[derive(Debug)]
pub struct ListingScanner {
    client: Arc<dyn Api>,
    filter: Option<String>,
}

impl ListingScanner {
    pub fn new(config: Arc<config::Config>) -> anyhow::Result<Self> {
        let client: Arc<dyn Api> = Arc::new(Client::from(config.as_ref()));
        Ok(Self::with_api(client, None))
    }

    pub fn with_api(client: Arc<dyn Api>, filter: Option<String>) -> Self {
        Self { client, filter }
    }

    pub fn with_filter(mut self, filter: Option<String>) -> Self {
        self.filter = filter;
        self
    }

    /// An explicit filter wins over the configured one; when neither is set
    /// the client falls back to [`DEFAULT_FILTER`].
    pub fn filter(&self) -> Option<&str> {
        match self.filter.as_deref() {
            Some(f) if !f.is_empty() => Some(f),
            _ => Some(self.client.default_filter()).filter(|f| !f.is_empty()),
        }
    }

    pub fn run(&self) -> Result<ListingPage> {
        let token = self.client.authenticate()?;
        log::debug!(
            "got {} token, expires in {}s",
            token.token_type,
            token.expires_in
        );

        let page = self.client.listings(self.filter(), token.token.as_str())?;
        log::info!(
            "fetched {} listings (server reported {})",
            page.results.len(),
            page.count
        );

        Ok(page)
    }
}

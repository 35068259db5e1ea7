mod api;
mod deserializer;
mod listing;

use secrecy::{ExposeSecret, Secret};
use std::time::Duration;

use crate::config::Config;

pub use api::DEFAULT_FILTER;

/// Blocking client for the Prosper marketplace API. Holds nothing mutable,
/// so one instance can serve any number of calls.
#[derive(Debug)]
pub struct Client {
    client_id: Secret<String>,
    client_secret: Secret<String>,
    default_filter: String,
    base_url: String,
    client: reqwest::blocking::Client,
}

impl From<&Config> for Client {
    fn from(item: &Config) -> Self {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(secs) = item.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = match builder.build() {
            Ok(client) => client,
            Err(err) => {
                log::warn!(
                    "http client setup failed, using defaults without timeout: {:?}",
                    err
                );
                reqwest::blocking::Client::new()
            }
        };

        Self {
            client_id: Secret::new(item.client_id.expose_secret().clone()),
            client_secret: Secret::new(item.client_secret.expose_secret().clone()),
            default_filter: item.default_filter.clone(),
            base_url: item.base_url.trim_end_matches('/').to_string(),
            client,
        }
    }
}

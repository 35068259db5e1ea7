use anyhow::Result;
use secrecy::Secret;
use serde::Deserialize;
use std::sync::Arc;

pub const DEFAULT_BASE_URL: &str = "https://api.prosper.com";
static ENV_PREFIX: &str = "PROSPER";

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default = "empty_secret")]
    pub client_id: Secret<String>,
    #[serde(default = "empty_secret")]
    pub client_secret: Secret<String>,
    #[serde(default, rename = "filter")]
    pub default_filter: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub timeout_secs: Option<u64>,
}

fn empty_secret() -> Secret<String> {
    Secret::new(String::new())
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            client_id: empty_secret(),
            client_secret: empty_secret(),
            default_filter: String::new(),
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

impl Config {
    /// Loads `file_name` if it exists, then overlays `PROSPER_*` environment
    /// variables. Keys missing from both sources fall back to empty values.
    pub fn from_file(file_name: &str) -> Result<Arc<Self>> {
        let conf = config::Config::builder()
            .add_source(config::File::with_name(file_name).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?;
        Ok(Arc::new(conf.try_deserialize()?))
    }

    pub fn new(client_id: &str, client_secret: &str) -> Self {
        Self {
            client_id: Secret::new(client_id.to_string()),
            client_secret: Secret::new(client_secret.to_string()),
            ..Default::default()
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_filter(mut self, filter: &str) -> Self {
        self.default_filter = filter.to_string();
        self
    }
}

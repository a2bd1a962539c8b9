//! Configuration resolved from flags and environment.

use std::time::Duration;

use converter_client::ApiGateway;
use converter_core::ConverterOptions;

/// Validated runtime configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub api_key: String,
    pub debounce: Duration,
}

impl Config {
    /// Validates raw values taken from the command line or environment.
    pub fn new(api_url: &str, api_key: Option<&str>, debounce_ms: u64) -> anyhow::Result<Self> {
        let api_url = api_url.trim();
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            anyhow::bail!("API URL must start with http:// or https://, got {:?}", api_url);
        }

        let api_key = api_key.map(str::trim).unwrap_or_default();
        if api_key.is_empty() {
            anyhow::bail!("an API key is required (--api-key or CONVERTER_API_KEY)");
        }

        Ok(Self {
            api_url: api_url.to_string(),
            api_key: api_key.to_string(),
            debounce: Duration::from_millis(debounce_ms),
        })
    }

    pub fn gateway(&self) -> ApiGateway {
        ApiGateway::new(&self.api_url).with_api_key(&self.api_key)
    }

    pub fn options(&self) -> ConverterOptions {
        ConverterOptions::default().with_debounce(self.debounce)
    }
}

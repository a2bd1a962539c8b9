//! # Converter Client
//!
//! HTTP gateway for the currency conversion API.
//!
//! `ApiGateway` owns the base URL and API key, builds query parameters,
//! applies retry policies and validates response shapes. Raw HTTP goes
//! through an injected `HttpTransport`, `ReqwestTransport` by default.

mod response;
mod retry;
mod transport;

use converter_types::{
    ConversionRequest, ConversionResult, Currency, CurrencyApi, GatewayError, HttpTransport,
    QueryParams,
};
use tracing::{debug, instrument, warn};

pub use response::{conversion_value, currencies_from_body};
pub use retry::{RetryPolicy, with_retry};
pub use transport::{ClientError, ReqwestTransport};

const CURRENCIES_ENDPOINT: &str = "currencies";
const CONVERT_ENDPOINT: &str = "convert";

/// Gateway to the currency API.
pub struct ApiGateway<T: HttpTransport = ReqwestTransport> {
    base_url: String,
    api_key: String,
    transport: T,
    currencies_retry: RetryPolicy,
    conversion_retry: RetryPolicy,
}

impl ApiGateway<ReqwestTransport> {
    /// Creates a gateway over a default `reqwest` client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_transport(base_url, ReqwestTransport::new())
    }
}

impl<T: HttpTransport> ApiGateway<T> {
    /// Creates a gateway over the given transport.
    pub fn with_transport(base_url: impl Into<String>, transport: T) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: String::new(),
            transport,
            currencies_retry: RetryPolicy::CURRENCIES,
            conversion_retry: RetryPolicy::CONVERSION,
        }
    }

    /// Sets the API key sent with every request.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Overrides the retry policy for the currency list.
    pub fn with_currencies_retry(mut self, policy: RetryPolicy) -> Self {
        self.currencies_retry = policy;
        self
    }

    /// Overrides the retry policy for conversions.
    pub fn with_conversion_retry(mut self, policy: RetryPolicy) -> Self {
        self.conversion_retry = policy;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `api_key` first, then `extra` in order.
    pub fn params(&self, extra: &[(&str, String)]) -> QueryParams {
        std::iter::once(("api_key".to_string(), self.api_key.clone()))
            .chain(extra.iter().map(|(k, v)| (k.to_string(), v.clone())))
            .collect()
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    async fn get(
        &self,
        endpoint: &'static str,
        extra: &[(&str, String)],
        policy: RetryPolicy,
    ) -> Result<serde_json::Value, GatewayError> {
        let url = self.url(endpoint);
        let params = self.params(extra);
        with_retry(endpoint, policy, || self.transport.get(&url, &params)).await
    }
}

#[async_trait::async_trait]
impl<T: HttpTransport> CurrencyApi for ApiGateway<T> {
    #[instrument(skip(self))]
    async fn currencies(&self) -> Result<Vec<Currency>, GatewayError> {
        let body = self
            .get(CURRENCIES_ENDPOINT, &[], self.currencies_retry)
            .await?;

        match currencies_from_body(&body) {
            Some(currencies) => {
                debug!(count = currencies.len(), "currencies fetched");
                Ok(currencies)
            }
            None => {
                warn!("currencies response has no `response` array, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    #[instrument(
        skip(self, request),
        fields(from = %request.from, to = %request.to, amount = request.amount)
    )]
    async fn convert(&self, request: &ConversionRequest) -> Result<ConversionResult, GatewayError> {
        if !request.is_valid() {
            return Ok(None);
        }

        let body = self
            .get(CONVERT_ENDPOINT, &request.query(), self.conversion_retry)
            .await?;

        let value = conversion_value(&body);
        if value.is_none() {
            warn!("convert response has no numeric `response.value`");
        }
        Ok(value)
    }
}

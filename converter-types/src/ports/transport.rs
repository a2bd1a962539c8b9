//! HTTP transport port.
//!
//! The gateway builds URLs and parameters; a transport only moves bytes.
//! Implementations can be a real HTTP client or a scripted fake.

use crate::error::GatewayError;

/// Ordered query parameters, already stringified.
pub type QueryParams = Vec<(String, String)>;

/// Port trait for issuing GET requests that answer with JSON.
#[async_trait::async_trait]
pub trait HttpTransport: Send + Sync + 'static {
    /// GET `url` with `params` appended as a query string.
    async fn get(&self, url: &str, params: &QueryParams)
    -> Result<serde_json::Value, GatewayError>;
}

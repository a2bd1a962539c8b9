//! Currency API port.
//!
//! This is the primary port consumed by the cache and the conversion
//! pipeline. The HTTP gateway implements it; tests substitute fakes.

use crate::domain::{ConversionRequest, ConversionResult, Currency};
use crate::error::GatewayError;

/// Port trait for the remote currency API.
#[async_trait::async_trait]
pub trait CurrencyApi: Send + Sync + 'static {
    /// Fetches the full currency list.
    ///
    /// A response without a currency array is an empty list, not an error.
    async fn currencies(&self) -> Result<Vec<Currency>, GatewayError>;

    /// Converts `request.amount` from `request.from` to `request.to`.
    ///
    /// Returns `Ok(None)` without touching the network for invalid requests,
    /// and `Ok(None)` when the API answers without a numeric value.
    async fn convert(&self, request: &ConversionRequest) -> Result<ConversionResult, GatewayError>;
}

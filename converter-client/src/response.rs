//! Shape validation for API response bodies.
//!
//! Bodies are inspected as loose JSON so a partially wrong document degrades
//! to "empty" or "no result" instead of failing the whole call.

use converter_types::{ConversionResult, Currency};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

/// Extracts `response[]` from a currencies body.
///
/// Returns `None` when `response` is missing or not an array. Entries that do
/// not deserialize are skipped.
pub fn currencies_from_body(body: &Value) -> Option<Vec<Currency>> {
    let entries = body.get("response")?.as_array()?;
    let currencies = entries
        .iter()
        .filter_map(|entry| match Currency::deserialize(entry) {
            Ok(currency) => Some(currency),
            Err(e) => {
                warn!(error = %e, "skipping malformed currency entry");
                None
            }
        })
        .collect();
    Some(currencies)
}

/// Extracts the numeric `response.value` from a convert body.
///
/// Anything that is not a finite, non-negative number is no result.
pub fn conversion_value(body: &Value) -> ConversionResult {
    body.pointer("/response/value")
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite() && *v >= 0.0)
}

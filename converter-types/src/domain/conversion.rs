//! Conversion requests and the arithmetic applied to their results.

use serde::{Deserialize, Serialize};

/// Outcome of a conversion call: a converted amount, or `None` when the API
/// produced nothing usable. `None` is distinct from `Some(0.0)`.
pub type ConversionResult = Option<f64>;

/// A single "convert `amount` of `from` into `to`" request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub from: String,
    pub to: String,
    pub amount: f64,
}

impl ConversionRequest {
    pub fn new(from: impl Into<String>, to: impl Into<String>, amount: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            amount,
        }
    }

    /// Both codes present and distinct, amount strictly positive.
    ///
    /// Invalid requests never reach the network.
    pub fn is_valid(&self) -> bool {
        !self.from.is_empty() && !self.to.is_empty() && self.from != self.to && self.amount > 0.0
    }

    /// Query parameters for the convert endpoint, in wire order.
    pub fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("from", self.from.clone()),
            ("to", self.to.clone()),
            ("amount", self.amount.to_string()),
        ]
    }
}

/// Rounds to 2 decimal places, half away from zero at the cent boundary.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Effective rate `to / from` with 4 decimals, or `None` when either side is
/// missing or zero. Ties round half away from zero, like `round_to_cents`.
pub fn format_rate(from_amount: f64, to_amount: Option<f64>) -> Option<String> {
    let to_amount = to_amount?;
    if from_amount == 0.0 || to_amount == 0.0 || from_amount.is_nan() || to_amount.is_nan() {
        return None;
    }
    let rate = ((to_amount / from_amount) * 10_000.0).round() / 10_000.0;
    Some(format!("{rate:.4}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_request() {
        assert!(ConversionRequest::new("USD", "EUR", 100.0).is_valid());
        assert!(ConversionRequest::new("USD", "EUR", 0.01).is_valid());
    }

    #[test]
    fn test_invalid_requests() {
        assert!(!ConversionRequest::new("USD", "USD", 100.0).is_valid());
        assert!(!ConversionRequest::new("", "EUR", 100.0).is_valid());
        assert!(!ConversionRequest::new("USD", "", 100.0).is_valid());
        assert!(!ConversionRequest::new("USD", "EUR", 0.0).is_valid());
        assert!(!ConversionRequest::new("USD", "EUR", -5.0).is_valid());
        assert!(!ConversionRequest::new("USD", "EUR", f64::NAN).is_valid());
    }

    #[test]
    fn test_query_params() {
        let query = ConversionRequest::new("GBP", "JPY", 12.5).query();
        assert_eq!(
            query,
            vec![
                ("from", "GBP".to_string()),
                ("to", "JPY".to_string()),
                ("amount", "12.5".to_string()),
            ]
        );
    }

    #[test]
    fn test_round_to_cents() {
        assert_eq!(round_to_cents(92.1549), 92.15);
        assert_eq!(round_to_cents(123.456), 123.46);
        assert_eq!(round_to_cents(0.125), 0.13);
        assert_eq!(round_to_cents(-0.125), -0.13);
        assert_eq!(round_to_cents(7.0), 7.0);
    }

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(100.0, Some(123.456)), Some("1.2346".to_string()));
        assert_eq!(format_rate(100.0, Some(92.15)), Some("0.9215".to_string()));
    }

    #[test]
    fn test_format_rate_rounds_ties_up() {
        assert_eq!(format_rate(16.0, Some(0.5)), Some("0.0313".to_string()));
        assert_eq!(format_rate(8.0, Some(1.25)), Some("0.1563".to_string()));
        assert_eq!(format_rate(16.0, Some(-0.5)), Some("-0.0313".to_string()));
    }

    #[test]
    fn test_format_rate_absent() {
        assert_eq!(format_rate(100.0, None), None);
        assert_eq!(format_rate(0.0, Some(5.0)), None);
        assert_eq!(format_rate(100.0, Some(0.0)), None);
    }
}

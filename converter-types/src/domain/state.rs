//! Widget state shared between the view model and its subscribers.

use std::sync::Arc;

use serde::Serialize;

use super::conversion::{ConversionRequest, format_rate};
use super::currency::Currency;

/// Snapshot of everything the converter widget renders.
///
/// Invariants:
/// - `is_converting` is true only while a conversion is outstanding
/// - a non-empty `error_message` implies `to_amount` is `None`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConverterState {
    pub currencies: Arc<[Currency]>,
    pub from_code: String,
    pub to_code: String,
    pub from_amount: f64,
    pub to_amount: Option<f64>,
    pub is_converting: bool,
    pub error_message: String,
}

impl Default for ConverterState {
    fn default() -> Self {
        Self::new("USD", "EUR", 100.0)
    }
}

impl ConverterState {
    pub fn new(from_code: impl Into<String>, to_code: impl Into<String>, from_amount: f64) -> Self {
        Self {
            currencies: Arc::from(Vec::new()),
            from_code: from_code.into(),
            to_code: to_code.into(),
            from_amount,
            to_amount: None,
            is_converting: false,
            error_message: String::new(),
        }
    }

    /// Both codes selected and a strictly positive amount entered.
    pub fn should_convert(&self) -> bool {
        !self.from_code.is_empty() && !self.to_code.is_empty() && self.from_amount > 0.0
    }

    /// Builds a request from the current selection.
    pub fn request(&self) -> ConversionRequest {
        ConversionRequest::new(&self.from_code, &self.to_code, self.from_amount)
    }

    /// Effective exchange rate, `to_amount / from_amount` to 4 decimals.
    pub fn exchange_rate(&self) -> Option<String> {
        format_rate(self.from_amount, self.to_amount)
    }

    pub fn has_error(&self) -> bool {
        !self.error_message.is_empty()
    }

    /// Looks up a loaded currency by short code.
    pub fn currency(&self, short_code: &str) -> Option<&Currency> {
        self.currencies.iter().find(|c| c.short_code == short_code)
    }

    /// Installs a freshly loaded list and repairs selections that point at
    /// codes the list does not contain: `from` falls back to entry 0, `to` to
    /// entry 1, or empty if the list is too short.
    ///
    /// Returns true when either selected code changed.
    pub fn apply_currencies(&mut self, currencies: Arc<[Currency]>) -> bool {
        self.currencies = currencies;

        let mut changed = false;
        if self.currency(&self.from_code).is_none() {
            let fallback = self.fallback_code(0);
            changed |= fallback != self.from_code;
            self.from_code = fallback;
        }
        if self.currency(&self.to_code).is_none() {
            let fallback = self.fallback_code(1);
            changed |= fallback != self.to_code;
            self.to_code = fallback;
        }
        changed
    }

    fn fallback_code(&self, index: usize) -> String {
        self.currencies
            .get(index)
            .map(|c| c.short_code.clone())
            .unwrap_or_default()
    }
}

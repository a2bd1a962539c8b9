//! View model tuning knobs.

use std::time::Duration;

/// Quiet period before a trigger turns into a request.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Initial selection and timing for a `ConverterViewModel`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConverterOptions {
    pub debounce: Duration,
    pub from_code: String,
    pub to_code: String,
    pub from_amount: f64,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            from_code: "USD".to_string(),
            to_code: "EUR".to_string(),
            from_amount: 100.0,
        }
    }
}

impl ConverterOptions {
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_selection(
        mut self,
        from_code: impl Into<String>,
        to_code: impl Into<String>,
        from_amount: f64,
    ) -> Self {
        self.from_code = from_code.into();
        self.to_code = to_code.into();
        self.from_amount = from_amount;
        self
    }
}

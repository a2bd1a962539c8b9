//! Domain models for the currency converter.

pub mod conversion;
pub mod currency;
pub mod state;

pub use conversion::{ConversionRequest, ConversionResult, format_rate, round_to_cents};
pub use currency::Currency;
pub use state::ConverterState;

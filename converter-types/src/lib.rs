//! # Converter Types
//!
//! Domain types and port traits for the currency converter widget.
//! This crate has ZERO IO - only data structures, validation rules,
//! and trait definitions.
//!
//! ## Architecture
//!
//! - `domain/` - Pure domain types (Currency, ConversionRequest, ConverterState)
//! - `ports/` - Trait definitions that adapters must implement
//! - `error/` - Gateway and conversion error types

pub mod domain;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    ConversionRequest, ConversionResult, ConverterState, Currency, format_rate, round_to_cents,
};
pub use error::{ConversionError, GatewayError};
pub use ports::{CurrencyApi, HttpTransport, QueryParams};

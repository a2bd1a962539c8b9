//! # Converter Core
//!
//! Currency cache, conversion pipeline and view model for the converter widget.
//!
//! ## Architecture
//!
//! - `cache` - single-flight, invalidatable currency list
//! - `pipeline` - debounce plus switch-latest conversion requests
//! - `view_model` - observable widget state tying the two together
//! - `widgets` - event and prop contracts of the presentational widgets
//!
//! Everything is generic over `A: CurrencyApi`, so the HTTP gateway and
//! in-memory fakes are interchangeable.

pub mod cache;
pub mod options;
pub mod pipeline;
pub mod store;
pub mod view_model;
pub mod widgets;

#[cfg(test)]
mod fake_api;

pub use cache::CurrencyCache;
pub use options::{ConverterOptions, DEFAULT_DEBOUNCE};
pub use pipeline::{ConversionPipeline, PipelinePhase, TriggerHandle};
pub use store::StateStore;
pub use view_model::ConverterViewModel;
pub use widgets::{AmountFieldProps, CurrencySelectorProps, WidgetEvent};

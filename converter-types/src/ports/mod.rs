//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The view model and pipeline depend on these traits, not concrete clients.

mod api;
mod transport;

pub use api::CurrencyApi;
pub use transport::{HttpTransport, QueryParams};

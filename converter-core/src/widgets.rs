//! Event and property contracts of the presentational widgets.
//!
//! Widgets hold no logic: they render props derived from a state snapshot
//! and emit `WidgetEvent`s back into the view model.

use std::sync::Arc;

use converter_types::{ConverterState, Currency};

/// Something the user did to one of the widgets.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent {
    /// The amount field was edited.
    AmountChanged(f64),
    /// A currency was picked in the "from" selector.
    FromSelected(String),
    /// A currency was picked in the "to" selector.
    ToSelected(String),
    /// The swap control was pressed.
    SwapRequested,
}

/// What an amount field displays.
#[derive(Debug, Clone, PartialEq)]
pub struct AmountFieldProps {
    pub value: Option<f64>,
    pub read_only: bool,
}

/// What a currency selector displays.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencySelectorProps {
    pub options: Arc<[Currency]>,
    pub selected: String,
}

impl CurrencySelectorProps {
    /// The selected currency, if it is among the options.
    pub fn selected_currency(&self) -> Option<&Currency> {
        self.options.iter().find(|c| c.short_code == self.selected)
    }
}

/// Editable source amount.
pub fn from_amount_field(state: &ConverterState) -> AmountFieldProps {
    AmountFieldProps {
        value: Some(state.from_amount),
        read_only: false,
    }
}

/// Read-only converted amount.
pub fn to_amount_field(state: &ConverterState) -> AmountFieldProps {
    AmountFieldProps {
        value: state.to_amount,
        read_only: true,
    }
}

pub fn from_selector(state: &ConverterState) -> CurrencySelectorProps {
    CurrencySelectorProps {
        options: Arc::clone(&state.currencies),
        selected: state.from_code.clone(),
    }
}

pub fn to_selector(state: &ConverterState) -> CurrencySelectorProps {
    CurrencySelectorProps {
        options: Arc::clone(&state.currencies),
        selected: state.to_code.clone(),
    }
}

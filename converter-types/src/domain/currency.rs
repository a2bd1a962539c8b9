//! Currency metadata as served by the currencies endpoint.

use serde::{Deserialize, Deserializer, Serialize};

/// A tradeable currency.
///
/// Keyed by `short_code` (e.g. "USD"); everything else is display metadata.
/// Missing metadata falls back to defaults so one sparse entry does not
/// take the whole list down with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub short_code: String,
    #[serde(default)]
    pub code: String,
    #[serde(default = "default_precision")]
    pub precision: u32,
    #[serde(default = "default_subunit")]
    pub subunit: u32,
    #[serde(default)]
    pub symbol: String,
    #[serde(default = "default_symbol_first")]
    pub symbol_first: bool,
    #[serde(default = "default_decimal_mark")]
    pub decimal_mark: String,
    #[serde(default = "default_thousands_separator")]
    pub thousands_separator: String,
}

/// Decimal places `format_amount` will render at most.
const MAX_PRECISION: u32 = 12;

fn default_precision() -> u32 {
    2
}

fn default_subunit() -> u32 {
    100
}

fn default_symbol_first() -> bool {
    true
}

fn default_decimal_mark() -> String {
    ".".to_string()
}

fn default_thousands_separator() -> String {
    ",".to_string()
}

/// The live API emits numeric ids, older fixtures use strings.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

impl Currency {
    /// Creates a currency with default formatting metadata.
    pub fn new(short_code: impl Into<String>, name: impl Into<String>) -> Self {
        let short_code = short_code.into();
        Self {
            id: short_code.clone(),
            name: name.into(),
            code: short_code.clone(),
            short_code,
            precision: default_precision(),
            subunit: default_subunit(),
            symbol: String::new(),
            symbol_first: default_symbol_first(),
            decimal_mark: default_decimal_mark(),
            thousands_separator: default_thousands_separator(),
        }
    }

    /// Sets the display symbol and whether it precedes the amount.
    pub fn with_symbol(mut self, symbol: impl Into<String>, symbol_first: bool) -> Self {
        self.symbol = symbol.into();
        self.symbol_first = symbol_first;
        self
    }

    /// Sets the decimal mark and thousands separator.
    pub fn with_separators(
        mut self,
        decimal_mark: impl Into<String>,
        thousands_separator: impl Into<String>,
    ) -> Self {
        self.decimal_mark = decimal_mark.into();
        self.thousands_separator = thousands_separator.into();
        self
    }

    /// Formats an amount using this currency's precision, separators and
    /// symbol placement, e.g. `$1,234.50` or `1.234,50 €`.
    pub fn format_amount(&self, value: f64) -> String {
        let precision = self.precision.min(MAX_PRECISION) as usize;
        let fixed = format!("{:.*}", precision, value.abs());
        let (int_part, frac_part) = match fixed.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (fixed.as_str(), None),
        };

        let mut grouped = String::with_capacity(fixed.len() + int_part.len() / 3);
        for (i, digit) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push_str(&self.thousands_separator);
            }
            grouped.push(digit);
        }
        if let Some(frac) = frac_part {
            grouped.push_str(&self.decimal_mark);
            grouped.push_str(frac);
        }

        let sign = if value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
            "-"
        } else {
            ""
        };

        match (self.symbol.is_empty(), self.symbol_first) {
            (true, _) => format!("{sign}{grouped} {}", self.short_code),
            (false, true) => format!("{sign}{}{grouped}", self.symbol),
            (false, false) => format!("{sign}{grouped} {}", self.symbol),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn euro() -> Currency {
        Currency::new("EUR", "Euro")
            .with_symbol("€", false)
            .with_separators(",", ".")
    }

    #[test]
    fn test_deserialize_numeric_id() {
        let json = r#"{
            "id": 1, "name": "UAE Dirham", "short_code": "AED", "code": "784",
            "precision": 2, "subunit": 100, "symbol": "د.إ", "symbol_first": true,
            "decimal_mark": ".", "thousands_separator": ","
        }"#;
        let currency: Currency = serde_json::from_str(json).unwrap();
        assert_eq!(currency.id, "1");
        assert_eq!(currency.short_code, "AED");
        assert_eq!(currency.code, "784");
    }

    #[test]
    fn test_deserialize_sparse_entry_uses_defaults() {
        let currency: Currency =
            serde_json::from_str(r#"{"id": "7", "short_code": "JPY"}"#).unwrap();
        assert_eq!(currency.id, "7");
        assert_eq!(currency.precision, 2);
        assert_eq!(currency.decimal_mark, ".");
        assert!(currency.symbol_first);
    }

    #[test]
    fn test_deserialize_requires_short_code() {
        let result = serde_json::from_str::<Currency>(r#"{"id": 3, "name": "Nameless"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_format_symbol_first() {
        let usd = Currency::new("USD", "US Dollar").with_symbol("$", true);
        assert_eq!(usd.format_amount(1234.5), "$1,234.50");
        assert_eq!(usd.format_amount(0.0), "$0.00");
    }

    #[test]
    fn test_format_symbol_after_with_european_separators() {
        assert_eq!(euro().format_amount(1234567.891), "1.234.567,89 €");
    }

    #[test]
    fn test_format_zero_precision() {
        let mut jpy = Currency::new("JPY", "Yen").with_symbol("¥", true);
        jpy.precision = 0;
        assert_eq!(jpy.format_amount(15300.4), "¥15,300");
    }

    #[test]
    fn test_format_negative_and_missing_symbol() {
        let xyz = Currency::new("XYZ", "Test");
        assert_eq!(xyz.format_amount(-12.5), "-12.50 XYZ");
        assert_eq!(xyz.format_amount(-0.001), "0.00 XYZ");
    }

    #[test]
    fn test_format_caps_absurd_precision() {
        let currency: Currency =
            serde_json::from_str(r#"{"short_code": "BAD", "precision": 4000000000}"#).unwrap();
        assert_eq!(currency.format_amount(1.5), "1.500000000000 BAD");
    }
}

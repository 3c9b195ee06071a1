//! Currency masking

use serde::{Deserialize, Serialize};

use crate::error::{FieldError, Result};

/// Largest accepted number of fractional digits
pub const MAX_PRECISION: usize = 20;

/// Currency rendering options
///
/// `separator` goes before the fractional digits and `delimiter` groups the
/// integer part in thousands, so the defaults render `R$ 1.234,56`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyOptions {
    /// Number of fractional digits
    pub precision: usize,
    /// Mark placed before the fractional digits
    pub separator: String,
    /// Thousands grouping mark
    pub delimiter: String,
    /// Label placed before the amount
    pub unit: String,
    /// Label placed after the amount
    pub suffix_unit: String,
}

impl Default for CurrencyOptions {
    fn default() -> Self {
        Self {
            precision: 2,
            separator: ",".to_string(),
            delimiter: ".".to_string(),
            unit: "R$".to_string(),
            suffix_unit: String::new(),
        }
    }
}

impl CurrencyOptions {
    /// Reject marks that would be read back as part of the amount
    pub fn validate(&self) -> Result<()> {
        let marks = [
            ("separator", &self.separator),
            ("delimiter", &self.delimiter),
            ("unit", &self.unit),
            ("suffix_unit", &self.suffix_unit),
        ];
        for (option, value) in marks {
            if value.chars().any(|c| c.is_ascii_digit()) {
                return Err(FieldError::InvalidCurrency {
                    option,
                    reason: "must not contain digits",
                });
            }
        }
        if self.precision > MAX_PRECISION {
            return Err(FieldError::InvalidCurrency {
                option: "precision",
                reason: "must be at most 20",
            });
        }
        if self.precision > 0 && self.separator.is_empty() {
            return Err(FieldError::InvalidCurrency {
                option: "separator",
                reason: "must not be empty when precision is non-zero",
            });
        }
        Ok(())
    }
}

/// Group an ASCII digit string in thousands from the right
fn group_thousands(integer: &str, delimiter: &str) -> String {
    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3 * delimiter.len());
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push_str(delimiter);
        }
        grouped.push(c);
    }
    grouped
}

fn strip_whitespace(label: &str) -> String {
    label.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Render the digits found in `raw` as a currency amount.
///
/// The last `precision` digits are the fraction; everything that is not an
/// ASCII digit is ignored. Precision beyond [`MAX_PRECISION`] is clamped.
pub fn to_money(raw: &str, options: &CurrencyOptions) -> String {
    let precision = options.precision.min(MAX_PRECISION);
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    let (integer, fraction) = digits.split_at(digits.len().saturating_sub(precision));

    let integer = integer.trim_start_matches('0');
    let integer = if integer.is_empty() { "0" } else { integer };

    let mut output = String::new();

    let unit = strip_whitespace(&options.unit);
    if !unit.is_empty() {
        output.push_str(&unit);
        output.push(' ');
    }

    output.push_str(&group_thousands(integer, &options.delimiter));

    if precision > 0 {
        output.push_str(&options.separator);
        output.push_str(&"0".repeat(precision - fraction.len()));
        output.push_str(fraction);
    }

    let suffix = strip_whitespace(&options.suffix_unit);
    if !suffix.is_empty() {
        output.push(' ');
        output.push_str(&suffix);
    }

    output
}

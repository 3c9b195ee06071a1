//! Masking engine
//!
//! Pure functions turning raw keystrokes into display strings:
//! - `pattern`: template masks such as `(99) 99999-9999`
//! - `money`: currency amounts such as `R$ 1.234,56`
//!
//! Formatting is total and idempotent. Characters that do not fit are dropped.

mod money;
mod pattern;

pub use money::{to_money, CurrencyOptions, MAX_PRECISION};
pub use pattern::{is_placeholder, to_pattern};

use crate::error::Result;

/// Which formatter a field uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaskMode {
    #[default]
    PlainPattern,
    Money,
}

/// Mask configuration for one field
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MaskConfig {
    pub mode: MaskMode,
    /// Ignored in money mode. Empty means no masking.
    pub pattern: String,
    pub currency: CurrencyOptions,
}

impl MaskConfig {
    /// No masking at all
    pub fn identity() -> Self {
        Self::default()
    }

    /// Template mask
    pub fn pattern(pattern: &str) -> Self {
        Self {
            mode: MaskMode::PlainPattern,
            pattern: pattern.to_string(),
            currency: CurrencyOptions::default(),
        }
    }

    /// Currency mask
    pub fn money(currency: CurrencyOptions) -> Self {
        Self {
            mode: MaskMode::Money,
            pattern: String::new(),
            currency,
        }
    }

    /// Build from the input's `format` / `isMoney` options
    pub fn from_options(format: &str, is_money: bool, currency: &CurrencyOptions) -> Self {
        if is_money {
            Self::money(currency.clone())
        } else {
            Self::pattern(format)
        }
    }

    pub fn is_money(&self) -> bool {
        self.mode == MaskMode::Money
    }

    /// Only money mode has options that can break idempotency
    pub fn validate(&self) -> Result<()> {
        match self.mode {
            MaskMode::Money => self.currency.validate(),
            MaskMode::PlainPattern => Ok(()),
        }
    }
}

/// Format a raw value for display
pub fn format(raw: &str, config: &MaskConfig) -> String {
    match config.mode {
        MaskMode::Money => to_money(raw, &config.currency),
        MaskMode::PlainPattern if !config.pattern.is_empty() => to_pattern(raw, &config.pattern),
        MaskMode::PlainPattern => raw.to_string(),
    }
}

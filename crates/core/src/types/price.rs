//! Type-safe price representation using decimal arithmetic.
//!
//! Product prices arrive from the API as decimal strings (`"49999"`) in the
//! platform currency, Nigerian naira. They are parsed into [`Price`] so
//! display never goes through floating point.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is not a decimal number.
    #[error("invalid price amount: {0}")]
    Invalid(String),
    /// The amount is below zero.
    #[error("price cannot be negative")]
    Negative,
}

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., naira, not kobo).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Parse an amount in [`PLATFORM_CURRENCY`].
    ///
    /// A leading currency symbol and thousands separators are tolerated
    /// (`₦49,999.00`).
    ///
    /// # Errors
    ///
    /// Returns [`PriceError`] if the amount is not a non-negative decimal.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let raw = s.trim();
        let raw = raw
            .strip_prefix(PLATFORM_CURRENCY.symbol())
            .unwrap_or(raw)
            .replace(',', "");
        let amount =
            Decimal::from_str(raw.trim()).map_err(|_| PriceError::Invalid(s.to_owned()))?;
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        Ok(Self::new(amount, PLATFORM_CURRENCY))
    }

    /// Format for display with grouped thousands (e.g., `₦49,999.00`).
    #[must_use]
    pub fn display(&self) -> String {
        let fixed = format!("{:.2}", self.amount.abs().round_dp(2));
        let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
        let sign = if self.amount.is_sign_negative() && !self.amount.is_zero() {
            "-"
        } else {
            ""
        };
        format!(
            "{sign}{}{}.{fraction}",
            self.currency_code.symbol(),
            group_thousands(whole)
        )
    }
}

/// Insert `,` between every three digits of an unsigned integer string.
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

/// Currency every platform price is quoted in.
pub const PLATFORM_CURRENCY: CurrencyCode = CurrencyCode::NGN;

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    NGN,
    USD,
    EUR,
    GBP,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::NGN => "₦",
            Self::USD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }
}

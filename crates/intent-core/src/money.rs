//! # Money Types
//!
//! Currency and price types for the checkout service.
//! Amounts are always carried in the smallest currency unit (sen, cents).

use crate::error::PaymentError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Supported currencies (ISO 4217)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    MYR,
    USD,
    EUR,
    GBP,
    JPY,
    SGD,
    AUD,
}

impl Currency {
    /// Returns the ISO 4217 currency code
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::MYR => "myr",
            Currency::USD => "usd",
            Currency::EUR => "eur",
            Currency::GBP => "gbp",
            Currency::JPY => "jpy",
            Currency::SGD => "sgd",
            Currency::AUD => "aud",
        }
    }

    /// Returns the number of decimal places for this currency
    /// (JPY has 0 decimals, most others have 2)
    pub fn decimal_places(&self) -> u8 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Convert from smallest unit back to decimal
    pub fn from_smallest_unit(&self, amount: i64) -> f64 {
        let divisor = 10_f64.powi(self.decimal_places() as i32);
        amount as f64 / divisor
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::MYR
    }
}

impl FromStr for Currency {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "myr" => Ok(Currency::MYR),
            "usd" => Ok(Currency::USD),
            "eur" => Ok(Currency::EUR),
            "gbp" => Ok(Currency::GBP),
            "jpy" => Ok(Currency::JPY),
            "sgd" => Ok(Currency::SGD),
            "aud" => Ok(Currency::AUD),
            other => Err(PaymentError::UnsupportedCurrency {
                currency: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Price with amount in smallest currency unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in smallest currency unit (sen for MYR, cents for USD)
    pub amount: i64,
    /// Currency
    pub currency: Currency,
}

impl Price {
    /// Create a price from the smallest currency unit
    pub fn from_minor_units(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Get the decimal amount
    pub fn as_decimal(&self) -> f64 {
        self.currency.from_smallest_unit(self.amount)
    }

    /// Format for display (e.g., "RM 25.00")
    pub fn display(&self) -> String {
        let symbol = match self.currency {
            Currency::MYR => "RM ",
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::JPY => "¥",
            Currency::SGD => "S$",
            Currency::AUD => "A$",
        };
        if self.currency.decimal_places() == 0 {
            format!("{}{}", symbol, self.amount)
        } else {
            format!("{}{:.2}", symbol, self.as_decimal())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_parse() {
        assert_eq!("myr".parse::<Currency>().unwrap(), Currency::MYR);
        assert_eq!("USD".parse::<Currency>().unwrap(), Currency::USD);

        let err = "xyz".parse::<Currency>().unwrap_err();
        assert!(matches!(err, PaymentError::UnsupportedCurrency { .. }));
    }

    #[test]
    fn test_currency_roundtrip() {
        let myr = Currency::MYR;
        assert_eq!(myr.as_str().parse::<Currency>().unwrap(), myr);
        assert_eq!(myr.from_smallest_unit(2500), 25.0);

        let jpy = Currency::JPY;
        assert_eq!(jpy.from_smallest_unit(1000), 1000.0);
    }

    #[test]
    fn test_price_display() {
        let price = Price::from_minor_units(2500, Currency::MYR);
        assert_eq!(price.display(), "RM 25.00");

        let price_jpy = Price::from_minor_units(1000, Currency::JPY);
        assert_eq!(price_jpy.display(), "¥1000");
    }
}

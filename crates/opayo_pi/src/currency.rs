//! The currency registry: the subset of ISO 4217 the gateway accepts.

use error_stack::report;

use crate::errors::{CustomResult, UnknownCurrency};

/// Currencies accepted by the gateway for transaction amounts.
///
/// Unknown codes are rejected at construction via [`Currency::from_code`];
/// the enum itself is the registry, so there is no mutable global state.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::EnumString,
    strum::VariantNames,
)]
pub enum Currency {
    /// Australian dollar
    AUD,
    /// Canadian dollar
    CAD,
    /// Swiss franc
    CHF,
    /// Danish krone
    DKK,
    /// Euro
    EUR,
    /// Pound sterling
    GBP,
    /// Hong Kong dollar
    HKD,
    /// Japanese yen
    JPY,
    /// Norwegian krone
    NOK,
    /// New Zealand dollar
    NZD,
    /// Swedish krona
    SEK,
    /// Singapore dollar
    SGD,
    /// United States dollar
    USD,
    /// South African rand
    ZAR,
}

impl Currency {
    /// Look up a currency by its ISO 4217 code.
    pub fn from_code(code: &str) -> CustomResult<Self, UnknownCurrency> {
        code.parse().map_err(|_| {
            report!(UnknownCurrency {
                code: code.to_string(),
            })
        })
    }

    /// Number of digits after the decimal separator in the major unit.
    pub fn digits(self) -> u32 {
        match self {
            Self::JPY => 0,
            Self::AUD
            | Self::CAD
            | Self::CHF
            | Self::DKK
            | Self::EUR
            | Self::GBP
            | Self::HKD
            | Self::NOK
            | Self::NZD
            | Self::SEK
            | Self::SGD
            | Self::USD
            | Self::ZAR => 2,
        }
    }

    /// The ISO 4217 code.
    pub fn code(self) -> &'static str {
        match self {
            Self::AUD => "AUD",
            Self::CAD => "CAD",
            Self::CHF => "CHF",
            Self::DKK => "DKK",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::HKD => "HKD",
            Self::JPY => "JPY",
            Self::NOK => "NOK",
            Self::NZD => "NZD",
            Self::SEK => "SEK",
            Self::SGD => "SGD",
            Self::USD => "USD",
            Self::ZAR => "ZAR",
        }
    }

    /// Currency symbol used for display.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::AUD | Self::CAD | Self::HKD | Self::NZD | Self::SGD | Self::USD => "$",
            Self::CHF => "CHF",
            Self::DKK | Self::NOK | Self::SEK => "kr",
            Self::EUR => "\u{20ac}",
            Self::GBP => "\u{a3}",
            Self::JPY => "\u{a5}",
            Self::ZAR => "R",
        }
    }

    /// English currency name.
    pub fn name(self) -> &'static str {
        match self {
            Self::AUD => "Australian Dollar",
            Self::CAD => "Canadian Dollar",
            Self::CHF => "Swiss Franc",
            Self::DKK => "Danish Krone",
            Self::EUR => "Euro",
            Self::GBP => "Pound Sterling",
            Self::HKD => "Hong Kong Dollar",
            Self::JPY => "Yen",
            Self::NOK => "Norwegian Krone",
            Self::NZD => "New Zealand Dollar",
            Self::SEK => "Swedish Krona",
            Self::SGD => "Singapore Dollar",
            Self::USD => "US Dollar",
            Self::ZAR => "Rand",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_code() {
        assert_eq!(Currency::from_code("GBP").unwrap(), Currency::GBP);
        assert_eq!(Currency::from_code("JPY").unwrap(), Currency::JPY);
    }

    #[test]
    fn unknown_code_is_rejected() {
        let err = Currency::from_code("XYZ").unwrap_err();
        assert_eq!(
            err.current_context(),
            &UnknownCurrency {
                code: "XYZ".to_string()
            }
        );
    }

    #[test]
    fn decimal_digits() {
        assert_eq!(Currency::GBP.digits(), 2);
        assert_eq!(Currency::JPY.digits(), 0);
    }

    #[test]
    fn serde_uses_iso_codes() {
        assert_eq!(serde_json::to_string(&Currency::EUR).unwrap(), "\"EUR\"");
        let parsed: Currency = serde_json::from_str("\"USD\"").unwrap();
        assert_eq!(parsed, Currency::USD);
    }
}

//! Amount types in which the gateway works.
//!
//! All wire-format amounts are minor units (pence, cents); major-unit
//! conversion is exact, using the currency's decimal digit count, and
//! rejects values whose precision the currency cannot represent.

use std::{
    fmt::Display,
    ops::{Add, Sub},
    str::FromStr,
};

use error_stack::report;
use rust_decimal::{prelude::ToPrimitive, Decimal};

use crate::{
    currency::Currency,
    errors::{CustomResult, InvalidAmount},
};

/// This unit struct represents the minor units in which all wire amounts
/// are expressed.
#[derive(
    Default,
    Debug,
    serde::Deserialize,
    serde::Serialize,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
)]
pub struct MinorUnit(i64);

impl MinorUnit {
    /// Forms a new minor unit from an amount
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Gets the amount as an i64 value
    pub fn get_amount_as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for MinorUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for MinorUnit {
    type Output = Self;
    fn add(self, a2: Self) -> Self {
        Self(self.0 + a2.0)
    }
}

impl Sub for MinorUnit {
    type Output = Self;
    fn sub(self, a2: Self) -> Self {
        Self(self.0 - a2.0)
    }
}

/// A monetary amount bound to its currency.
///
/// Pure value type: constructed once, immutable afterwards; the `with_*`
/// modifiers return modified copies and leave the original unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Amount {
    minor_units: MinorUnit,
    currency: Currency,
}

impl Amount {
    /// Construct from a wire-format minor-unit count.
    ///
    /// Negative values are rejected: the gateway has no concept of a
    /// negative amount (refunds are their own transaction type).
    pub fn from_minor_units(
        currency: Currency,
        minor_units: i64,
    ) -> CustomResult<Self, InvalidAmount> {
        if minor_units < 0 {
            return Err(report!(InvalidAmount::InvalidMinorUnits));
        }
        Ok(Self {
            minor_units: MinorUnit::new(minor_units),
            currency,
        })
    }

    /// Construct from an integer-valued numeral string of minor units.
    pub fn from_minor_string(currency: Currency, value: &str) -> CustomResult<Self, InvalidAmount> {
        let minor_units = i64::from_str(value.trim())
            .map_err(|_| report!(InvalidAmount::UnsupportedNumeral))?;
        Self::from_minor_units(currency, minor_units)
    }

    /// Construct from a major-unit decimal numeral string (e.g. `"12.34"`).
    ///
    /// The value is scaled by the currency's digit count; anything left
    /// after scaling means the caller supplied more precision than the
    /// currency supports and the amount is rejected.
    pub fn from_major_units(currency: Currency, value: &str) -> CustomResult<Self, InvalidAmount> {
        let decimal = Decimal::from_str(value.trim())
            .map_err(|_| report!(InvalidAmount::UnsupportedNumeral))?;
        Self::from_major_decimal(currency, decimal)
    }

    /// Construct from a major-unit float.
    pub fn from_major_f64(currency: Currency, value: f64) -> CustomResult<Self, InvalidAmount> {
        let decimal =
            Decimal::try_from(value).map_err(|_| report!(InvalidAmount::UnsupportedNumeral))?;
        Self::from_major_decimal(currency, decimal)
    }

    fn from_major_decimal(currency: Currency, value: Decimal) -> CustomResult<Self, InvalidAmount> {
        if value.is_sign_negative() {
            return Err(report!(InvalidAmount::InvalidMinorUnits));
        }
        let factor = Decimal::from(10_i64.pow(currency.digits()));
        let scaled = value
            .checked_mul(factor)
            .ok_or_else(|| report!(InvalidAmount::OutOfRange))?;
        if scaled.normalize().scale() != 0 {
            return Err(report!(InvalidAmount::TooManyDecimalPlaces {
                currency: currency.code(),
                digits: currency.digits(),
            }));
        }
        let minor_units = scaled
            .to_i64()
            .ok_or_else(|| report!(InvalidAmount::OutOfRange))?;
        Ok(Self {
            minor_units: MinorUnit::new(minor_units),
            currency,
        })
    }

    /// The wire-format minor-unit count.
    pub fn minor_units(&self) -> MinorUnit {
        self.minor_units
    }

    /// The currency this amount is bound to.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Format as a major-unit string with exactly the currency's digit
    /// count after the decimal separator (`"12.30"`, or `"1230"` for
    /// zero-decimal currencies).
    pub fn to_major_units(&self) -> String {
        Decimal::new(self.minor_units.get_amount_as_i64(), self.currency.digits()).to_string()
    }

    /// Return a copy carrying a different minor-unit count.
    pub fn with_minor_units(self, minor_units: i64) -> CustomResult<Self, InvalidAmount> {
        Self::from_minor_units(self.currency, minor_units)
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.to_major_units(), self.currency.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minor_major_round_trip() {
        for currency in [Currency::GBP, Currency::EUR, Currency::USD, Currency::JPY] {
            for n in [0_i64, 1, 99, 100, 2_599, 1_000_000] {
                let amount = Amount::from_minor_units(currency, n).unwrap();
                let major = amount.to_major_units();
                let back = Amount::from_major_units(currency, &major).unwrap();
                assert_eq!(back.minor_units().get_amount_as_i64(), n, "{currency} {n}");
            }
        }
    }

    #[test]
    fn excess_precision_is_rejected() {
        let err = Amount::from_major_units(Currency::GBP, "12.345").unwrap_err();
        assert_eq!(
            err.current_context(),
            &InvalidAmount::TooManyDecimalPlaces {
                currency: "GBP",
                digits: 2
            }
        );

        // trailing zeros do not count as extra precision
        let amount = Amount::from_major_units(Currency::GBP, "12.340").unwrap();
        assert_eq!(amount.minor_units().get_amount_as_i64(), 1_234);
    }

    #[test]
    fn zero_decimal_currency() {
        let amount = Amount::from_major_units(Currency::JPY, "150").unwrap();
        assert_eq!(amount.minor_units().get_amount_as_i64(), 150);
        assert_eq!(amount.to_major_units(), "150");

        let err = Amount::from_major_units(Currency::JPY, "150.5").unwrap_err();
        assert_eq!(
            err.current_context(),
            &InvalidAmount::TooManyDecimalPlaces {
                currency: "JPY",
                digits: 0
            }
        );
    }

    #[test]
    fn negative_amounts_are_rejected() {
        assert!(Amount::from_minor_units(Currency::GBP, -1).is_err());
        assert!(Amount::from_major_units(Currency::GBP, "-0.01").is_err());
    }

    #[test]
    fn float_input() {
        let amount = Amount::from_major_f64(Currency::EUR, 10.99).unwrap();
        assert_eq!(amount.minor_units().get_amount_as_i64(), 1_099);
    }

    #[test]
    fn minor_string_input() {
        let amount = Amount::from_minor_string(Currency::GBP, "2599").unwrap();
        assert_eq!(amount.minor_units().get_amount_as_i64(), 2_599);

        assert!(Amount::from_minor_string(Currency::GBP, "25.99").is_err());
        assert!(Amount::from_minor_string(Currency::GBP, "pennies").is_err());
    }

    #[test]
    fn formatting_pads_to_currency_digits() {
        let amount = Amount::from_minor_units(Currency::GBP, 1_230).unwrap();
        assert_eq!(amount.to_major_units(), "12.30");
        assert_eq!(amount.to_string(), "12.30 GBP");
    }

    #[test]
    fn copy_on_write_modifier() {
        let original = Amount::from_minor_units(Currency::GBP, 100).unwrap();
        let modified = original.with_minor_units(250).unwrap();
        assert_eq!(original.minor_units().get_amount_as_i64(), 100);
        assert_eq!(modified.minor_units().get_amount_as_i64(), 250);
    }
}

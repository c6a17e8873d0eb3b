//! Errors surfaced while constructing messages or decoding responses.
//!
//! Gateway-reported business errors (4xx bodies) are NOT part of this
//! taxonomy: they parse successfully into
//! [`ErrorCollection`](crate::responses::ErrorCollection) so callers can
//! inspect per-field messages. Everything here is a local failure that is
//! surfaced immediately and never retried.

/// Custom Result
/// A custom datatype that wraps the error variant <E> into a report, allowing
/// error_stack::Report<E> specific extendability
///
/// Effectively, equivalent to `Result<T, error_stack::Report<E>>`
pub type CustomResult<T, E> = error_stack::Result<T, E>;

/// Amount construction failures.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InvalidAmount {
    /// Minor units must be a non-negative whole number.
    #[error("minor units must be a non-negative integer")]
    InvalidMinorUnits,
    /// The major-unit value carries more decimal places than the currency
    /// supports.
    #[error("too many decimal places for {currency} (at most {digits} allowed)")]
    TooManyDecimalPlaces {
        /// Currency code the amount was constructed for
        currency: &'static str,
        /// Decimal digits that currency supports
        digits: u32,
    },
    /// The input was not a decimal numeral this library accepts.
    #[error("unsupported numeral format")]
    UnsupportedNumeral,
    /// The minor-unit value does not fit the wire representation.
    #[error("amount out of range")]
    OutOfRange,
}

/// An ISO 4217 code outside the set the gateway accepts.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown or unsupported currency code: {code}")]
pub struct UnknownCurrency {
    /// The rejected code, as provided
    pub code: String,
}

/// An enumerated request option outside its allowed set. Raised at
/// builder-construction time, before any network call.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown value `{value}` for {option}; allowed values are {allowed:?}")]
pub struct UnknownOptionValue {
    /// Name of the option field
    pub option: &'static str,
    /// The rejected value
    pub value: String,
    /// The closed set of accepted names
    pub allowed: &'static [&'static str],
}

/// Unparseable or wrong-typed date input.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InvalidTimestamp {
    /// The string did not parse as ISO 8601.
    #[error("timestamp is not a valid ISO 8601 date-time")]
    Unparseable,
    /// The input was neither a string nor an integer Unix timestamp.
    #[error("unsupported timestamp input type")]
    UnsupportedType,
    /// The canonical representation could not be produced.
    #[error("timestamp could not be formatted")]
    FormattingFailed,
}

/// A response body that claims a content type but fails to decode as that
/// type. Distinct from gateway-reported errors: this indicates a transport
/// or protocol problem, not a payment-domain one.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MalformedResponse {
    /// Body declared as JSON but undecodable as JSON.
    #[error("response body is not valid JSON")]
    Json,
    /// Body declared as form-urlencoded but undecodable as such.
    #[error("response body is not valid form-urlencoded data")]
    FormUrlEncoded,
    /// The body decoded, but a recognized shape carried unusable field data.
    #[error("response shape recognized but fields failed to parse")]
    InvalidFields,
}

/// Failures while assembling an outbound request descriptor.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BuildError {
    /// The request body could not be serialized.
    #[error("failed to encode request body")]
    RequestEncodingFailed,
    /// The endpoint URL could not be produced.
    #[error("failed to construct endpoint URL")]
    UrlConstructionFailed,
}

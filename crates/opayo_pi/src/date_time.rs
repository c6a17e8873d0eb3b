//! Timestamp parsing and the canonical wire format.
//!
//! The gateway emits ISO 8601 date-times with fractional seconds and an
//! offset; legacy endpoints occasionally omit the offset, in which case UTC
//! is assumed. Everything this library serializes uses the canonical
//! `YYYY-MM-DDThh:mm:ss.ffffff+hh:mm` layout so stored responses round-trip
//! exactly.

use error_stack::report;
use time::{
    format_description::{well_known::Rfc3339, BorrowedFormatItem},
    macros::format_description,
    OffsetDateTime, PrimitiveDateTime,
};

use crate::errors::{CustomResult, InvalidTimestamp};

/// The canonical serialization layout.
const CANONICAL_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:6][offset_hour \
     sign:mandatory]:[offset_minute]"
);

/// Layout accepted on input when the offset is missing; UTC is assumed.
const LOCAL_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    version = 2,
    "[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"
);

/// Current date and time in UTC.
pub fn now() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

/// Parse an ISO 8601 date-time string, assuming UTC when no offset is given.
pub fn parse_str(value: &str) -> CustomResult<OffsetDateTime, InvalidTimestamp> {
    if let Ok(parsed) = OffsetDateTime::parse(value, &Rfc3339) {
        return Ok(parsed);
    }
    if let Ok(parsed) = OffsetDateTime::parse(value, CANONICAL_FORMAT) {
        return Ok(parsed);
    }
    PrimitiveDateTime::parse(value, LOCAL_FORMAT)
        .map(PrimitiveDateTime::assume_utc)
        .map_err(|_| report!(InvalidTimestamp::Unparseable))
}

/// Interpret an integer as a Unix timestamp in seconds.
pub fn from_unix(seconds: i64) -> CustomResult<OffsetDateTime, InvalidTimestamp> {
    OffsetDateTime::from_unix_timestamp(seconds)
        .map_err(|_| report!(InvalidTimestamp::Unparseable))
}

/// Parse whatever timestamp representation a decoded payload carries:
/// an ISO 8601 string or an integer Unix timestamp. Anything else is
/// rejected as wrong-typed.
pub fn parse_value(value: &serde_json::Value) -> CustomResult<OffsetDateTime, InvalidTimestamp> {
    match value {
        serde_json::Value::String(text) => parse_str(text),
        serde_json::Value::Number(number) => number
            .as_i64()
            .ok_or_else(|| report!(InvalidTimestamp::UnsupportedType))
            .and_then(from_unix),
        _ => Err(report!(InvalidTimestamp::UnsupportedType)),
    }
}

/// Render in the canonical layout.
pub fn format(value: OffsetDateTime) -> CustomResult<String, InvalidTimestamp> {
    value
        .format(CANONICAL_FORMAT)
        .map_err(|_| report!(InvalidTimestamp::FormattingFailed))
}

/// Serde adapter for required timestamp fields: canonical on output,
/// permissive ISO 8601 on input.
pub mod canonical {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::OffsetDateTime;

    /// Serialize in the canonical layout.
    pub fn serialize<S>(value: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let formatted = super::format(*value).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }

    /// Deserialize any accepted ISO 8601 representation.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_str(&raw).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for optional timestamp fields.
pub mod canonical_option {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::OffsetDateTime;

    /// Serialize in the canonical layout when present.
    pub fn serialize<S>(value: &Option<OffsetDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(inner) => super::canonical::serialize(inner, serializer),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize any accepted ISO 8601 representation when present.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        raw.map(|text| super::parse_str(&text).map_err(serde::de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn parses_offset_and_fraction() {
        let parsed = parse_str("2020-01-01T12:30:45.123456+01:00").unwrap();
        assert_eq!(parsed, datetime!(2020-01-01 12:30:45.123456 +01:00));
    }

    #[test]
    fn parses_utc_designator() {
        let parsed = parse_str("2020-01-01T00:00:00.000000Z").unwrap();
        assert_eq!(parsed, datetime!(2020-01-01 00:00:00 UTC));
    }

    #[test]
    fn missing_offset_assumes_utc() {
        let parsed = parse_str("2020-06-15T08:00:00").unwrap();
        assert_eq!(parsed, datetime!(2020-06-15 08:00:00 UTC));
    }

    #[test]
    fn rejects_garbage() {
        let err = parse_str("next tuesday").unwrap_err();
        assert_eq!(err.current_context(), &InvalidTimestamp::Unparseable);
    }

    #[test]
    fn unix_timestamps() {
        let parsed = parse_value(&serde_json::json!(1_577_836_800)).unwrap();
        assert_eq!(parsed, datetime!(2020-01-01 00:00:00 UTC));

        let err = parse_value(&serde_json::json!(true)).unwrap_err();
        assert_eq!(err.current_context(), &InvalidTimestamp::UnsupportedType);
    }

    #[test]
    fn canonical_round_trip() {
        let original = datetime!(2023-03-09 14:05:33.000001 +00:00);
        let formatted = format(original).unwrap();
        assert_eq!(formatted, "2023-03-09T14:05:33.000001+00:00");
        assert_eq!(parse_str(&formatted).unwrap(), original);
    }
}

//! Normalization of the gateway's inconsistent error formats.
//!
//! Two generations of the wire protocol coexist: the current REST fields
//! (`code`/`description`) and the legacy ones (`statusCode`/`statusDetail`),
//! plus a third spelling used only by the card-identifier endpoint. All of
//! them normalize into one [`Error`] shape here, with the static
//! [`error_codes`](crate::error_codes) table backfilling field targeting
//! for legacy codes that carry none.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;

use crate::{error_codes, ext_traits::ValueGetExt};

/// An error code as the gateway sends it: numeric in JSON bodies, textual
/// in form-encoded ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorCode {
    /// Numeric code
    Number(i64),
    /// Textual code
    Text(String),
}

impl ErrorCode {
    /// The code as a number, when it is one (possibly spelled as digits).
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Self::Number(value) => u32::try_from(*value).ok(),
            Self::Text(value) => value.parse().ok(),
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => number.as_i64().map(Self::Number),
            Value::String(text) => Some(Self::Text(text.clone())),
            _ => None,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

/// One normalized field-level error reported by the gateway.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    /// Gateway error code
    pub code: Option<ErrorCode>,
    /// Technical description, for the merchant's logs
    pub description: Option<String>,
    /// The request property the error relates to, when known
    pub property: Option<String>,
    /// A message fit for showing to the paying customer
    pub client_message: Option<String>,
    /// HTTP status the error arrived under
    pub http_code: Option<u16>,
}

impl Error {
    /// Normalize one raw error object.
    ///
    /// Field fallbacks, in order: current REST naming, legacy naming, the
    /// card-identifier spelling, then the HTTP status hint. When the payload
    /// carries no `property`, well-known legacy codes get theirs (and a
    /// client message) from the static lookup table.
    pub fn from_payload(data: &Value, http_code: Option<u16>) -> Self {
        // explicit nulls count as absent, like every other fallback here
        let code = [
            data.get_path("code"),
            data.get_path("statusCode"),
            data.get_path("card-identifier-error-code"),
        ]
        .into_iter()
        .flatten()
        .find_map(ErrorCode::from_value)
        .or_else(|| http_code.map(|status| ErrorCode::Number(i64::from(status))));

        let description = data
            .get_path_str("description")
            .or_else(|| data.get_path_str("statusDetail"))
            .or_else(|| data.get_path_str("card-identifier-error-message"))
            .map(str::to_string);

        let http_code = [
            data.get_path("card-identifier-http-code"),
            data.get_path("httpCode"),
        ]
        .into_iter()
        .flatten()
        .find_map(Value::as_u64)
        .and_then(|status| u16::try_from(status).ok())
        .or(http_code);

        let mut property = data.get_path_str("property").map(str::to_string);
        let mut client_message = data.get_path_str("clientMessage").map(str::to_string);

        if property.is_none() {
            if let Some(details) = code
                .as_ref()
                .and_then(ErrorCode::as_u32)
                .and_then(error_codes::lookup)
            {
                property = Some(details.property.to_string());
                if client_message.is_none() {
                    client_message = Some(details.client_message.to_string());
                }
            }
        }

        Self {
            code,
            description,
            property,
            client_message,
            http_code,
        }
    }
}

/// The ordered list of errors one response reported.
///
/// Not an exception type: a 4xx body parses successfully into one of these
/// so callers can walk per-field messages.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ErrorCollection {
    errors: Vec<Error>,
}

impl ErrorCollection {
    /// Build from a response body.
    ///
    /// A non-empty `errors` array yields one [`Error`] per element. A body
    /// with no `errors` key at all, but which itself looks like one error
    /// object (carries a `code` or `statusCode`), yields a single-element
    /// collection. Anything else is empty.
    pub fn from_payload(data: &Value, http_code: Option<u16>) -> Self {
        match data.get_path("errors") {
            Some(Value::Array(items)) if !items.is_empty() => items
                .iter()
                .map(|item| Error::from_payload(item, http_code))
                .collect(),
            Some(_) => Self::default(),
            None => {
                if data.get_path("code").is_some() || data.get_path("statusCode").is_some() {
                    std::iter::once(Error::from_payload(data, http_code)).collect()
                } else {
                    Self::default()
                }
            }
        }
    }

    /// The sub-collection whose errors relate to `property`; `None` selects
    /// errors carrying no property at all.
    pub fn by_property(&self, property: Option<&str>) -> Self {
        self.errors
            .iter()
            .filter(|error| error.property.as_deref() == property)
            .cloned()
            .collect()
    }

    /// Whether any error was reported.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Number of errors reported.
    pub fn count(&self) -> usize {
        self.errors.len()
    }

    /// The first error, if any; convenient for single-error legacy bodies.
    pub fn first(&self) -> Option<&Error> {
        self.errors.first()
    }

    /// Iterate the errors in reported order.
    pub fn iter(&self) -> std::slice::Iter<'_, Error> {
        self.errors.iter()
    }
}

impl FromIterator<Error> for ErrorCollection {
    fn from_iter<I: IntoIterator<Item = Error>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ErrorCollection {
    type Item = Error;
    type IntoIter = std::vec::IntoIter<Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorCollection {
    type Item = &'a Error;
    type IntoIter = std::slice::Iter<'a, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

//!
//! This module holds traits for extending functionalities for existing
//! datatypes & inbuilt datatypes.
//!

use error_stack::ResultExt;
use serde::Deserialize;

use crate::errors::{CustomResult, MalformedResponse};

///
/// Extending functionalities of `[u8]` for performing parsing
///
pub trait ByteSliceExt<T> {
    ///
    /// Convert `[u8]` into type `<T>` by using `serde::Deserialize`
    ///
    fn parse_struct<'de>(&'de self, type_name: &str) -> CustomResult<T, MalformedResponse>
    where
        T: Deserialize<'de>;
}

impl<T> ByteSliceExt<T> for [u8] {
    fn parse_struct<'de>(&'de self, type_name: &str) -> CustomResult<T, MalformedResponse>
    where
        T: Deserialize<'de>,
    {
        serde_json::from_slice(self)
            .change_context(MalformedResponse::Json)
            .attach_printable_lazy(|| format!("Unable to parse {type_name} from bytes"))
    }
}

///
/// Extending functionalities of `serde_json::Value` for performing parsing
///
pub trait ValueExt<T> {
    ///
    /// Convert `serde_json::Value` into type `<T>` by using `serde::Deserialize`
    ///
    fn parse_value(self, type_name: &str) -> CustomResult<T, MalformedResponse>
    where
        T: serde::de::DeserializeOwned;
}

impl<T> ValueExt<T> for serde_json::Value {
    fn parse_value(self, type_name: &str) -> CustomResult<T, MalformedResponse>
    where
        T: serde::de::DeserializeOwned,
    {
        serde_json::from_value::<T>(self)
            .change_context(MalformedResponse::InvalidFields)
            .attach_printable_lazy(|| format!("Unable to parse {type_name} from value"))
    }
}

///
/// Safe nested lookup over decoded payloads.
///
/// Gateway payloads mix plain objects, nested blocks and arrays depending on
/// endpoint and decode mode; every response-parsing routine goes through this
/// accessor so a missing intermediate segment is an `Option::None`, never a
/// panic.
///
pub trait ValueGetExt {
    /// Walk a `.`-separated path. An empty path returns the value itself;
    /// each segment is tried as an object key first, then as an array index.
    fn get_path(&self, path: &str) -> Option<&serde_json::Value>;

    /// [`ValueGetExt::get_path`] with a fallback for missing segments.
    fn get_path_or<'a>(
        &'a self,
        path: &str,
        default: &'a serde_json::Value,
    ) -> &'a serde_json::Value;

    /// The string at the path, if the path resolves to a string.
    fn get_path_str(&self, path: &str) -> Option<&str>;
}

impl ValueGetExt for serde_json::Value {
    fn get_path(&self, path: &str) -> Option<&serde_json::Value> {
        if path.is_empty() {
            return Some(self);
        }
        let mut current = self;
        for segment in path.split('.') {
            current = match current {
                serde_json::Value::Object(map) => map.get(segment)?,
                serde_json::Value::Array(items) => {
                    segment.parse::<usize>().ok().and_then(|i| items.get(i))?
                }
                _ => return None,
            };
        }
        Some(current)
    }

    fn get_path_or<'a>(
        &'a self,
        path: &str,
        default: &'a serde_json::Value,
    ) -> &'a serde_json::Value {
        self.get_path(path).unwrap_or(default)
    }

    fn get_path_str(&self, path: &str) -> Option<&str> {
        self.get_path(path).and_then(serde_json::Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn walks_nested_objects() {
        let body = json!({"3DSecure": {"status": "Authenticated"}});
        assert_eq!(
            body.get_path_str("3DSecure.status"),
            Some("Authenticated")
        );
    }

    #[test]
    fn walks_array_indices() {
        let body = json!({"errors": [{"code": 1003}, {"code": 1004}]});
        assert_eq!(body.get_path("errors.1.code"), Some(&json!(1004)));
    }

    #[test]
    fn empty_path_returns_target() {
        let body = json!({"a": 1});
        assert_eq!(body.get_path(""), Some(&body));
    }

    #[test]
    fn missing_segments_fall_through() {
        let body = json!({"a": {"b": 2}});
        assert_eq!(body.get_path("a.c.d"), None);
        assert_eq!(body.get_path_or("a.c.d", &json!(null)), &json!(null));
        // scalar in the middle of the path
        assert_eq!(body.get_path("a.b.c"), None);
    }
}

//! Merchant session keys: short-lived bearer tokens authorizing card
//! tokenization from an untrusted client.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::date_time;

/// A merchant session key and its expiry.
///
/// Designed to be serialized into the merchant's session storage between
/// HTTP round-trips; the expiry round-trips through the canonical date
/// format.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionKeyResponse {
    /// The bearer token handed to the browser-side tokenization widget
    pub merchant_session_key: String,
    /// When the key stops being accepted
    #[serde(with = "crate::date_time::canonical")]
    pub expiry: OffsetDateTime,
}

impl SessionKeyResponse {
    /// The session key value.
    pub fn session_key(&self) -> &str {
        &self.merchant_session_key
    }

    /// When the key stops being accepted.
    pub fn expiry(&self) -> OffsetDateTime {
        self.expiry
    }

    /// Whether the key has already expired. Callers should request a fresh
    /// key rather than sending a request doomed to a 401.
    pub fn is_expired(&self) -> bool {
        date_time::now() >= self.expiry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_gateway_payload() {
        let response: SessionKeyResponse = serde_json::from_str(
            r#"{"merchantSessionKey": "M1E996F5-A9BC-41FE-B088-E5B73DB94277",
                "expiry": "2100-01-01T00:00:00.000000+00:00"}"#,
        )
        .unwrap();
        assert_eq!(
            response.session_key(),
            "M1E996F5-A9BC-41FE-B088-E5B73DB94277"
        );
        assert!(!response.is_expired());
    }

    #[test]
    fn expired_key_is_reported() {
        let response: SessionKeyResponse = serde_json::from_str(
            r#"{"merchantSessionKey": "M1", "expiry": "2020-01-01T00:00:00.000000Z"}"#,
        )
        .unwrap();
        assert!(response.is_expired());
    }

    #[test]
    fn storage_round_trip() {
        let original: SessionKeyResponse = serde_json::from_str(
            r#"{"merchantSessionKey": "M1", "expiry": "2031-07-01T09:30:00.000000+01:00"}"#,
        )
        .unwrap();
        let stored = serde_json::to_string(&original).unwrap();
        let restored: SessionKeyResponse = serde_json::from_str(&stored).unwrap();
        assert_eq!(original, restored);
    }
}

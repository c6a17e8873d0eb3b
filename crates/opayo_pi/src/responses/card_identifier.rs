//! Card identifiers: tokens representing captured card details.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use time::OffsetDateTime;

use crate::date_time;

/// A tokenized card, exchangeable for a charge until it expires.
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardIdentifierResponse {
    /// The token representing the captured card details
    pub card_identifier: String,
    /// When the token stops being exchangeable
    #[serde(with = "crate::date_time::canonical")]
    pub expiry: OffsetDateTime,
    /// Card scheme name, e.g. `Visa`
    pub card_type: Option<String>,
}

impl CardIdentifierResponse {
    /// The token value.
    pub fn card_identifier(&self) -> &str {
        &self.card_identifier
    }

    /// When the token stops being exchangeable.
    pub fn expiry(&self) -> OffsetDateTime {
        self.expiry
    }

    /// Card scheme name, when the gateway reported one.
    pub fn card_type(&self) -> Option<&str> {
        self.card_type.as_deref()
    }

    /// Whether the token has already expired relative to now.
    pub fn is_expired(&self) -> bool {
        date_time::now() >= self.expiry
    }
}

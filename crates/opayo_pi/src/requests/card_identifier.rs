//! Card tokenization endpoint.

use opayo_masking::{CardNumber, SensitiveValue};
use serde::Serialize;

use crate::{
    auth::RequestAuth,
    errors::{BuildError, CustomResult},
    request::RequestContent,
    requests::ApiRequest,
};

/// The card details being tokenized. Every field that identifies the card
/// is wrapped so it cannot be cloned or logged.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    /// Name as printed on the card
    pub cardholder_name: SensitiveValue<String>,
    /// Primary account number
    pub card_number: SensitiveValue<String, CardNumber>,
    /// Expiry in `MMYY`
    pub expiry_date: SensitiveValue<String>,
    /// CVC / CVV
    pub security_code: SensitiveValue<String>,
}

impl CardDetails {
    /// Bundle the captured card fields.
    pub fn new(
        cardholder_name: SensitiveValue<String>,
        card_number: SensitiveValue<String, CardNumber>,
        expiry_date: SensitiveValue<String>,
        security_code: SensitiveValue<String>,
    ) -> Self {
        Self {
            cardholder_name,
            card_number,
            expiry_date,
            security_code,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CardIdentifierBody<'a> {
    card_details: &'a CardDetails,
}

/// `POST /card-identifiers` — exchange card details for a single-use token.
///
/// Authenticates with the session key (Bearer), never the integration
/// credentials: this is the one endpoint an untrusted client calls.
#[derive(Debug)]
pub struct CreateCardIdentifier {
    session_key: String,
    card_details: CardDetails,
}

impl CreateCardIdentifier {
    /// A tokenization request under the given session key.
    pub fn new(session_key: impl Into<String>, card_details: CardDetails) -> Self {
        Self {
            session_key: session_key.into(),
            card_details,
        }
    }
}

impl ApiRequest for CreateCardIdentifier {
    fn resource_segments(&self) -> Vec<String> {
        vec!["card-identifiers".to_string()]
    }

    fn auth(&self) -> RequestAuth<'_> {
        RequestAuth::Bearer(&self.session_key)
    }

    fn request_content(&self) -> CustomResult<Option<RequestContent>, BuildError> {
        RequestContent::json(&CardIdentifierBody {
            card_details: &self.card_details,
        })
        .map(Some)
    }
}

//! Response classification: from raw HTTP exchange to typed variant.
//!
//! This module is the sole construction point for response variants. The
//! wire format is irregular and versioned, and the payload shapes overlap,
//! so selection runs as a single ordered first-match chain; the order is a
//! behavioral contract (changing it changes which variant wins), not an
//! implementation detail.

use serde_json::Value;

use crate::{
    errors::{CustomResult, MalformedResponse},
    ext_traits::{ValueExt, ValueGetExt},
    responses::{
        CardIdentifierResponse, ErrorCollection, Secure3dRedirect, Secure3dResponse,
        SessionKeyResponse, TransactionResponse, TransactionStatus, TransactionType,
    },
};

/// Everything the transport hands back from one HTTP exchange.
#[derive(Debug)]
pub struct HttpResponse {
    /// HTTP status code
    pub status_code: u16,
    /// `Content-Type` header value, if any
    pub content_type: Option<String>,
    /// Raw body bytes
    pub body: bytes::Bytes,
}

/// The typed outcome of one HTTP exchange.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseVariant {
    /// Gateway-reported validation or business errors (4xx bodies).
    Errors(ErrorCollection),
    /// A tokenized card.
    CardIdentifier(CardIdentifierResponse),
    /// A payment transaction snapshot.
    Payment(TransactionResponse),
    /// A repeat-payment transaction snapshot.
    Repeat(TransactionResponse),
    /// A merchant session key.
    SessionKey(SessionKeyResponse),
    /// A standalone 3-D Secure authentication outcome.
    Secure3d(Secure3dResponse),
    /// A 3-D Secure v1 redirect that must be continued at the ACS.
    Secure3dRedirect(Secure3dRedirect),
    /// A shape this library does not recognize; the caller decides.
    Unclassified(Value),
}

/// Classify a raw response.
///
/// Decoding failures (a body that does not match its declared content
/// type) surface as [`MalformedResponse`]; unrecognized but well-formed
/// shapes never fail, they fall through to
/// [`ResponseVariant::Unclassified`].
pub fn classify(
    http_status: u16,
    content_type: &str,
    body: &[u8],
) -> CustomResult<ResponseVariant, MalformedResponse> {
    let decoded = decode_body(content_type, body)?;
    let variant = classify_value(http_status, decoded)?;
    tracing::debug!(http_status, gateway_response = ?variant, "classified gateway response");
    Ok(variant)
}

/// [`classify`] over a transport-level [`HttpResponse`].
pub fn classify_response(
    response: &HttpResponse,
) -> CustomResult<ResponseVariant, MalformedResponse> {
    classify(
        response.status_code,
        response.content_type.as_deref().unwrap_or_default(),
        &response.body,
    )
}

fn decode_body(content_type: &str, body: &[u8]) -> CustomResult<Value, MalformedResponse> {
    use error_stack::ResultExt;

    if body.is_empty() {
        return Ok(Value::Null);
    }
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    match essence {
        crate::consts::CONTENT_TYPE_JSON => {
            serde_json::from_slice(body).change_context(MalformedResponse::Json)
        }
        crate::consts::CONTENT_TYPE_FORM => {
            let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body)
                .change_context(MalformedResponse::FormUrlEncoded)?;
            Ok(Value::Object(
                pairs
                    .into_iter()
                    .map(|(name, value)| (name, Value::String(value)))
                    .collect(),
            ))
        }
        // any other content type is opaque to this library
        _ => Ok(Value::Null),
    }
}

/// The ordered first-match selection over a decoded body.
pub fn classify_value(
    http_status: u16,
    body: Value,
) -> CustomResult<ResponseVariant, MalformedResponse> {
    // 1. Any 4xx is the gateway reporting errors, whatever else the body
    //    carries.
    if (400..500).contains(&http_status) {
        return Ok(ResponseVariant::Errors(ErrorCollection::from_payload(
            &body,
            Some(http_status),
        )));
    }

    // 2. A card identifier.
    if body
        .get_path_str("cardIdentifier")
        .is_some_and(|identifier| !identifier.is_empty())
    {
        let parsed = body.parse_value("CardIdentifierResponse")?;
        return Ok(ResponseVariant::CardIdentifier(parsed));
    }

    // 3./4. Transaction snapshots, payment before repeat.
    if body.get_path("transactionId").is_some() {
        let transaction_type = body.get_path_str("transactionType").map(str::to_string);
        match transaction_type.as_deref() {
            Some("Payment") => {
                return classify_transaction(body, ResponseVariant::Payment);
            }
            Some("Repeat") => {
                return classify_transaction(body, ResponseVariant::Repeat);
            }
            _ => {}
        }
    }

    // 5. A merchant session key.
    if body.get_path("merchantSessionKey").is_some() && body.get_path("expiry").is_some() {
        let parsed = body.parse_value("SessionKeyResponse")?;
        return Ok(ResponseVariant::SessionKey(parsed));
    }

    // 6. A standalone 3-D Secure outcome.
    if body.get_path("3DSecure.status").is_some() {
        let parsed = body.parse_value("Secure3dResponse")?;
        return Ok(ResponseVariant::Secure3d(parsed));
    }

    // 7. A legacy-shaped v1 redirect (no transactionId to match on).
    if is_v1_redirect_shape(&body) {
        let parsed = body.parse_value("Secure3dRedirect")?;
        return Ok(ResponseVariant::Secure3dRedirect(parsed));
    }

    // 8. Unrecognized shapes are the caller's problem, not an error.
    Ok(ResponseVariant::Unclassified(body))
}

/// A transaction snapshot that is really a 3-D Secure redirect still
/// classifies as the redirect sibling, so callers get `acsUrl`/`paReq`
/// (and the PaReq form fields) without re-inspecting the body.
fn classify_transaction(
    body: Value,
    variant: fn(TransactionResponse) -> ResponseVariant,
) -> CustomResult<ResponseVariant, MalformedResponse> {
    if is_v1_redirect_shape(&body) && body.get_path_str("acsUrl").is_some() {
        let parsed = body.parse_value("Secure3dRedirect")?;
        return Ok(ResponseVariant::Secure3dRedirect(parsed));
    }
    let parsed: TransactionResponse = body.parse_value("TransactionResponse")?;
    Ok(variant(parsed))
}

fn is_v1_redirect_shape(body: &Value) -> bool {
    let code_matches = match body.get_path("statusCode") {
        Some(Value::String(code)) => code == "2007",
        Some(Value::Number(code)) => code.as_i64() == Some(2007),
        _ => false,
    };
    let status_matches = body
        .get_path_str("status")
        .and_then(|raw| raw.parse::<TransactionStatus>().ok())
        == Some(TransactionStatus::ThreeDAuth);
    code_matches && status_matches
}

impl ResponseVariant {
    /// The transaction snapshot, for the variants that carry one.
    pub fn as_transaction(&self) -> Option<&TransactionResponse> {
        match self {
            Self::Payment(transaction) | Self::Repeat(transaction) => Some(transaction),
            _ => None,
        }
    }

    /// The transaction type the variant implies, if any.
    pub fn transaction_type(&self) -> Option<TransactionType> {
        match self {
            Self::Payment(_) => Some(TransactionType::Payment),
            Self::Repeat(_) => Some(TransactionType::Repeat),
            Self::Secure3dRedirect(redirect) => redirect.transaction_type,
            _ => None,
        }
    }
}

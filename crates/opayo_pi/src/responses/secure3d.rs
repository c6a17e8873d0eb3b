//! 3-D Secure response shapes.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::responses::{
    error::ErrorCode,
    transaction::{TransactionStatus, TransactionType},
};

/// Authentication outcome the gateway reports in a `3DSecure` block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Secure3dStatus {
    /// Cardholder authenticated.
    Authenticated,
    /// Authentication attempted and proof is available.
    AttemptOnly,
    /// Cardholder not authenticated.
    NotAuthenticated,
    /// The card is not enrolled for 3-D Secure.
    CardNotEnrolled,
    /// The issuer is not participating.
    IssuerNotEnrolled,
    /// The authentication response was malformed or invalid.
    MalformedOrInvalid,
    /// The flow was abandoned before completion.
    Incomplete,
    /// The directory or access-control server reported an error.
    Error,
}

impl Serialize for Secure3dStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Secure3dStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        // unrecognized statuses degrade to Error rather than failing the
        // whole response parse
        Ok(raw.parse().unwrap_or(Self::Error))
    }
}

/// The `3DSecure` block embedded in transaction snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreeDSecureBlock {
    /// Authentication outcome
    pub status: Secure3dStatus,
}

/// Standalone 3-D Secure status object (returned once an authentication
/// result has been submitted back to the gateway).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secure3dResponse {
    /// The reported authentication outcome
    #[serde(rename = "3DSecure")]
    pub three_d_secure: ThreeDSecureBlock,
}

impl Secure3dResponse {
    /// The reported authentication outcome.
    pub fn status(&self) -> Secure3dStatus {
        self.three_d_secure.status
    }
}

/// A 3-D Secure v1 redirect: the caller must POST the cardholder's browser
/// to `acs_url` and later hand the returned `PaRes` back to the gateway.
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Secure3dRedirect {
    /// Transaction the authentication belongs to, when the gateway sends it
    pub transaction_id: Option<String>,
    /// Transaction type, when the gateway sends it
    pub transaction_type: Option<TransactionType>,
    /// Always `3DAuth` for this shape
    pub status: TransactionStatus,
    /// Legacy status code, `2007` for v1 redirects
    pub status_code: Option<ErrorCode>,
    /// Legacy status detail
    pub status_detail: Option<String>,
    /// The issuer's access-control server URL
    pub acs_url: String,
    /// Payer authentication request token
    pub pa_req: Option<String>,
    /// Merchant data echoed back by the ACS
    pub md: Option<String>,
}

impl Secure3dRedirect {
    /// The form fields to POST to the ACS: `PaReq`, `MD` (possibly empty)
    /// and the merchant's `TermUrl` the ACS will return the cardholder to.
    pub fn pa_request_fields(&self, term_url: &str) -> Vec<(String, String)> {
        vec![
            (
                "PaReq".to_string(),
                self.pa_req.clone().unwrap_or_default(),
            ),
            ("MD".to_string(), self.md.clone().unwrap_or_default()),
            ("TermUrl".to_string(), term_url.to_string()),
        ]
    }
}

/// A 3-D Secure v2 challenge: the caller must POST the cardholder's browser
/// to `acs_url` with the `creq` payload.
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Secure3dv2Challenge {
    /// Transaction the challenge belongs to, when the gateway sends it
    pub transaction_id: Option<String>,
    /// The issuer's access-control server URL
    pub acs_url: String,
    /// Challenge request payload
    pub c_req: String,
    /// Directory-server transaction identifier
    #[serde(rename = "dsTranId")]
    pub ds_tran_id: Option<String>,
}

impl Secure3dv2Challenge {
    /// The form fields to POST to the ACS: `creq` plus the opaque
    /// `threeDSSessionData` the ACS echoes back in its notification.
    pub fn creq_fields(&self, three_ds_session_data: Option<&str>) -> Vec<(String, String)> {
        let mut fields = vec![("creq".to_string(), self.c_req.clone())];
        if let Some(session_data) = three_ds_session_data {
            fields.push((
                "threeDSSessionData".to_string(),
                session_data.to_string(),
            ));
        }
        fields
    }
}

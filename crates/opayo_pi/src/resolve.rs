//! Transaction / 3-D Secure state resolution.
//!
//! The resolver is a pure function over a single response body; it never
//! holds state between invocations. Each gateway response is
//! self-describing: which fields are populated selects the 3-D Secure
//! state, and the base `status` selects the transaction state. The caller
//! persists whatever (`md`, `transactionId`, `dsTranId`) it needs to
//! continue the flow between HTTP round-trips.

use error_stack::{report, ResultExt};
use serde_json::Value;

use crate::{
    consts,
    errors::{CustomResult, MalformedResponse},
    ext_traits::ValueGetExt,
    responses::{Secure3dStatus, TransactionStatus},
};

/// Where a transaction stands within the 3-D Secure protocol.
///
/// A tagged union, not a hierarchy: exactly one shape is populated per
/// snapshot, selected by which fields the response carried.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Secure3dState {
    /// No 3-D Secure involvement; the base status stands on its own.
    NotApplicable,
    /// v1: the cardholder must be redirected to the ACS.
    V1Redirect {
        /// Access-control server URL to POST the browser to
        acs_url: String,
        /// Payer authentication request token
        pa_req: String,
        /// Merchant data the ACS echoes back
        md: Option<String>,
    },
    /// v1: the ACS returned the cardholder with an authentication result.
    V1Returned {
        /// Payer authentication response to submit to the gateway
        pa_res: String,
        /// Merchant data identifying the transaction
        md: Option<String>,
    },
    /// v2: the cardholder must complete a challenge at the ACS.
    V2Challenge {
        /// Access-control server URL to POST the browser to
        acs_url: String,
        /// Challenge request payload
        c_req: String,
        /// Directory-server transaction identifier
        ds_tran_id: Option<String>,
    },
    /// v2: the ACS notified completion of the challenge.
    V2Returned {
        /// Challenge response to submit to the gateway
        c_res: String,
        /// Opaque session data echoed back by the ACS
        three_ds_session_data: Option<String>,
    },
    /// The gateway reported a final authentication outcome.
    Final(Secure3dStatus),
}

impl Secure3dState {
    /// Whether the flow still needs cardholder interaction.
    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            Self::V1Redirect { .. }
                | Self::V1Returned { .. }
                | Self::V2Challenge { .. }
                | Self::V2Returned { .. }
        )
    }
}

/// Where the transaction itself stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransactionState {
    /// Authorized; funds will move.
    Authorized,
    /// Declined by the bank or by fraud rules.
    Declined,
    /// Waiting on 3-D Secure authentication.
    PendingSecure3d,
    /// The gateway failed.
    Error,
    /// The request was malformed or invalid.
    Invalid,
}

/// The state one response resolves to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateSnapshot {
    /// The transaction state
    pub transaction: TransactionState,
    /// The 3-D Secure state
    pub secure3d: Secure3dState,
}

impl StateSnapshot {
    /// Whether no further transitions are expected for this transaction.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.transaction,
            TransactionState::Authorized
                | TransactionState::Declined
                | TransactionState::Error
                | TransactionState::Invalid
        )
    }
}

/// The fields state resolution runs on, however they were extracted.
#[derive(Debug, Default)]
pub(crate) struct Secure3dParts<'a> {
    pub(crate) status: Option<TransactionStatus>,
    pub(crate) block_status: Option<Secure3dStatus>,
    /// A bare `{"status": "Authenticated"}` body, as the 3-D Secure
    /// submission endpoints answer with.
    pub(crate) top_level_secure3d_status: Option<Secure3dStatus>,
    pub(crate) acs_url: Option<&'a str>,
    pub(crate) pa_req: Option<&'a str>,
    pub(crate) md: Option<&'a str>,
    pub(crate) c_req: Option<&'a str>,
    pub(crate) ds_tran_id: Option<&'a str>,
    pub(crate) pa_res: Option<&'a str>,
    pub(crate) c_res: Option<&'a str>,
    pub(crate) three_ds_session_data: Option<&'a str>,
}

pub(crate) fn snapshot_from_parts(parts: Secure3dParts<'_>) -> StateSnapshot {
    let secure3d = if let Some(status) = parts.block_status {
        Secure3dState::Final(status)
    } else if let Some(status) = parts.top_level_secure3d_status {
        Secure3dState::Final(status)
    } else if let Some(c_res) = parts.c_res {
        Secure3dState::V2Returned {
            c_res: c_res.to_string(),
            three_ds_session_data: parts.three_ds_session_data.map(str::to_string),
        }
    } else if let Some(pa_res) = parts.pa_res {
        Secure3dState::V1Returned {
            pa_res: pa_res.to_string(),
            md: parts.md.map(str::to_string),
        }
    } else if parts.status == Some(TransactionStatus::ThreeDAuth) {
        match (parts.acs_url, parts.c_req) {
            (Some(acs_url), Some(c_req)) => Secure3dState::V2Challenge {
                acs_url: acs_url.to_string(),
                c_req: c_req.to_string(),
                ds_tran_id: parts.ds_tran_id.map(str::to_string),
            },
            (Some(acs_url), None) => Secure3dState::V1Redirect {
                acs_url: acs_url.to_string(),
                pa_req: parts.pa_req.unwrap_or_default().to_string(),
                md: parts.md.map(str::to_string),
            },
            (None, _) => Secure3dState::NotApplicable,
        }
    } else {
        Secure3dState::NotApplicable
    };

    let transaction = match parts.status {
        Some(TransactionStatus::Ok) => TransactionState::Authorized,
        Some(TransactionStatus::NotAuthed | TransactionStatus::Rejected) => {
            TransactionState::Declined
        }
        Some(TransactionStatus::ThreeDAuth) => TransactionState::PendingSecure3d,
        Some(TransactionStatus::Error) => TransactionState::Error,
        Some(TransactionStatus::Malformed | TransactionStatus::Invalid) => {
            TransactionState::Invalid
        }
        None => match &secure3d {
            Secure3dState::Final(
                Secure3dStatus::Authenticated | Secure3dStatus::AttemptOnly,
            ) => TransactionState::Authorized,
            Secure3dState::Final(_) => TransactionState::Declined,
            Secure3dState::V1Redirect { .. }
            | Secure3dState::V1Returned { .. }
            | Secure3dState::V2Challenge { .. }
            | Secure3dState::V2Returned { .. } => TransactionState::PendingSecure3d,
            Secure3dState::NotApplicable => TransactionState::Invalid,
        },
    };

    StateSnapshot {
        transaction,
        secure3d,
    }
}

/// Resolve one response body to a state snapshot.
pub fn resolve(body: &Value) -> StateSnapshot {
    let raw_status = body.get_path_str("status");
    let status = raw_status.and_then(|raw| raw.parse::<TransactionStatus>().ok());
    let top_level_secure3d_status = match status {
        None => raw_status.and_then(|raw| raw.parse::<Secure3dStatus>().ok()),
        Some(_) => None,
    };
    let block_status = body
        .get_path_str("3DSecure.status")
        .map(|raw| raw.parse().unwrap_or(Secure3dStatus::Error));

    snapshot_from_parts(Secure3dParts {
        status,
        block_status,
        top_level_secure3d_status,
        acs_url: body.get_path_str("acsUrl"),
        pa_req: body.get_path_str("paReq"),
        md: body.get_path_str("md"),
        c_req: body.get_path_str("cReq"),
        ds_tran_id: body.get_path_str("dsTranId"),
        pa_res: body.get_path_str("paRes"),
        c_res: body
            .get_path_str("cRes")
            .or_else(|| body.get_path_str("cres")),
        three_ds_session_data: body.get_path_str("threeDSSessionData"),
    })
}

/// Parse a server-to-server ACS callback into the state it advances the
/// flow to: form-encoded `PaRes`/`MD` for v1, JSON `cres` for v2.
pub fn from_acs_notification(
    content_type: &str,
    body: &[u8],
) -> CustomResult<Secure3dState, MalformedResponse> {
    let essence = content_type.split(';').next().unwrap_or("").trim();
    match essence {
        consts::CONTENT_TYPE_FORM => {
            let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body)
                .change_context(MalformedResponse::FormUrlEncoded)?;
            let mut pa_res = None;
            let mut md = None;
            for (name, value) in pairs {
                match name.as_str() {
                    "PaRes" => pa_res = Some(value),
                    "MD" => md = (!value.is_empty()).then_some(value),
                    _ => {}
                }
            }
            pa_res
                .map(|pa_res| Secure3dState::V1Returned { pa_res, md })
                .ok_or_else(|| {
                    report!(MalformedResponse::InvalidFields)
                        .attach_printable("v1 ACS notification carries no PaRes")
                })
        }
        consts::CONTENT_TYPE_JSON => {
            let value: Value =
                serde_json::from_slice(body).change_context(MalformedResponse::Json)?;
            let c_res = value
                .get_path_str("cres")
                .or_else(|| value.get_path_str("cRes"))
                .map(str::to_string);
            let three_ds_session_data = value
                .get_path_str("threeDSSessionData")
                .map(str::to_string);
            c_res
                .map(|c_res| Secure3dState::V2Returned {
                    c_res,
                    three_ds_session_data,
                })
                .ok_or_else(|| {
                    report!(MalformedResponse::InvalidFields)
                        .attach_printable("v2 ACS notification carries no cres")
                })
        }
        other => Err(report!(MalformedResponse::InvalidFields)
            .attach_printable(format!("unexpected notification content type: {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn authorized_without_secure3d() {
        let snapshot = resolve(&json!({"status": "Ok", "transactionId": "T1"}));
        assert_eq!(snapshot.transaction, TransactionState::Authorized);
        assert_eq!(snapshot.secure3d, Secure3dState::NotApplicable);
        assert!(snapshot.is_terminal());
    }

    #[test]
    fn declined_statuses_are_terminal() {
        for status in ["NotAuthed", "Rejected"] {
            let snapshot = resolve(&json!({"status": status}));
            assert_eq!(snapshot.transaction, TransactionState::Declined);
            assert!(snapshot.is_terminal());
        }
    }

    #[test]
    fn v1_redirect() {
        let snapshot = resolve(&json!({
            "status": "3DAuth",
            "statusCode": "2007",
            "acsUrl": "https://acs.example",
            "paReq": "tok",
            "md": "M123"
        }));
        assert_eq!(snapshot.transaction, TransactionState::PendingSecure3d);
        assert_eq!(
            snapshot.secure3d,
            Secure3dState::V1Redirect {
                acs_url: "https://acs.example".to_string(),
                pa_req: "tok".to_string(),
                md: Some("M123".to_string()),
            }
        );
        assert!(!snapshot.is_terminal());
    }

    #[test]
    fn v2_challenge_wins_when_creq_present() {
        let snapshot = resolve(&json!({
            "status": "3DAuth",
            "acsUrl": "https://acs.example",
            "cReq": "challenge-payload",
            "dsTranId": "DS1"
        }));
        assert_eq!(
            snapshot.secure3d,
            Secure3dState::V2Challenge {
                acs_url: "https://acs.example".to_string(),
                c_req: "challenge-payload".to_string(),
                ds_tran_id: Some("DS1".to_string()),
            }
        );
    }

    #[test]
    fn final_status_converges() {
        let snapshot = resolve(&json!({
            "status": "Ok",
            "3DSecure": {"status": "Authenticated"}
        }));
        assert_eq!(snapshot.transaction, TransactionState::Authorized);
        assert_eq!(
            snapshot.secure3d,
            Secure3dState::Final(Secure3dStatus::Authenticated)
        );
    }

    #[test]
    fn bare_secure3d_status_body() {
        let snapshot = resolve(&json!({"status": "Authenticated"}));
        assert_eq!(snapshot.transaction, TransactionState::Authorized);
        assert_eq!(
            snapshot.secure3d,
            Secure3dState::Final(Secure3dStatus::Authenticated)
        );

        let declined = resolve(&json!({"status": "NotAuthenticated"}));
        assert_eq!(declined.transaction, TransactionState::Declined);
    }

    #[test]
    fn absent_secure3d_block_is_not_applicable() {
        let snapshot = resolve(&json!({"status": "Error", "statusDetail": "boom"}));
        assert_eq!(snapshot.transaction, TransactionState::Error);
        assert_eq!(snapshot.secure3d, Secure3dState::NotApplicable);
    }

    #[test]
    fn v1_acs_notification() {
        let state = from_acs_notification(
            "application/x-www-form-urlencoded; charset=UTF-8",
            b"PaRes=eJxVUtt&MD=M123",
        )
        .unwrap();
        assert_eq!(
            state,
            Secure3dState::V1Returned {
                pa_res: "eJxVUtt".to_string(),
                md: Some("M123".to_string()),
            }
        );
    }

    #[test]
    fn v2_acs_notification() {
        let state = from_acs_notification(
            "application/json",
            br#"{"cres": "eyJhY3", "threeDSSessionData": "sess"}"#,
        )
        .unwrap();
        assert_eq!(
            state,
            Secure3dState::V2Returned {
                c_res: "eyJhY3".to_string(),
                three_ds_session_data: Some("sess".to_string()),
            }
        );
    }

    #[test]
    fn notification_without_result_is_malformed() {
        let err = from_acs_notification("application/x-www-form-urlencoded", b"MD=M123")
            .unwrap_err();
        assert_eq!(err.current_context(), &MalformedResponse::InvalidFields);
    }
}

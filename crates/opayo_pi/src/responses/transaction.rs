//! Transaction snapshots: the gateway's answer to payment, repeat, refund
//! and fetch operations.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
    currency::Currency,
    resolve::{self, Secure3dState, StateSnapshot},
    responses::{
        error::ErrorCode,
        secure3d::{Secure3dv2Challenge, ThreeDSecureBlock},
    },
    types::{Amount, MinorUnit},
};

/// Transaction outcome, canonicalized from the gateway's case-insensitive
/// spelling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(ascii_case_insensitive)]
pub enum TransactionStatus {
    /// Authorized.
    Ok,
    /// The bank declined the authorization.
    NotAuthed,
    /// Rejected by fraud or AVS/CVC rules.
    Rejected,
    /// 3-D Secure authentication required before authorization.
    #[strum(serialize = "3DAuth")]
    ThreeDAuth,
    /// The request was malformed.
    Malformed,
    /// The request was invalid.
    Invalid,
    /// The gateway failed internally.
    Error,
}

impl Serialize for TransactionStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TransactionStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        // statuses outside the documented set degrade to Error rather than
        // failing the whole response parse
        Ok(raw.parse().unwrap_or(Self::Error))
    }
}

/// The kind of transaction a snapshot describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum TransactionType {
    /// Immediate authorization and settlement.
    Payment,
    /// Authorization now, settlement on release.
    Deferred,
    /// A repeat against an earlier transaction.
    Repeat,
    /// A refund against an earlier transaction.
    Refund,
}

/// The amount breakdown attached to a transaction snapshot, in minor units.
#[skip_serializing_none]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionAmounts {
    /// Total charged, including any surcharge
    pub total_amount: MinorUnit,
    /// The sale amount before surcharges
    pub sale_amount: Option<MinorUnit>,
    /// Surcharge applied, if any
    pub surcharge_amount: Option<MinorUnit>,
}

/// Card summary echoed back inside `paymentMethod`.
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSummary {
    /// The card identifier, when the card was saved as reusable
    pub card_identifier: Option<String>,
    /// Card scheme name
    pub card_type: Option<String>,
    /// Last four digits of the PAN
    pub last_four_digits: Option<String>,
    /// Expiry in `MMYY`
    pub expiry_date: Option<String>,
    /// Whether the identifier may be charged again
    pub reusable: Option<bool>,
}

/// The payment method echoed back on a transaction snapshot.
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    /// Card details, for card transactions
    pub card: Option<CardSummary>,
}

/// Immutable snapshot of a transaction as one response described it.
///
/// Self-describing: the 3-D Secure state is derived entirely from which
/// fields the gateway populated, never from client-held state.
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    /// Gateway identifier for the transaction
    pub transaction_id: String,
    /// What kind of transaction this is
    pub transaction_type: TransactionType,
    /// Outcome, if the gateway reported one
    pub status: Option<TransactionStatus>,
    /// Legacy protocol status code (e.g. `"0000"`, `"2007"`)
    pub status_code: Option<ErrorCode>,
    /// Legacy protocol status detail
    pub status_detail: Option<String>,
    /// Bank retrieval reference
    pub retrieval_reference: Option<i64>,
    /// Raw response code from the acquiring bank
    pub bank_response_code: Option<String>,
    /// Authorisation code from the acquiring bank
    pub bank_authorisation_code: Option<String>,
    /// Amount breakdown in minor units
    pub amount: Option<TransactionAmounts>,
    /// Currency of the amounts
    pub currency: Option<Currency>,
    /// Payment method echoed back
    pub payment_method: Option<PaymentMethod>,
    /// 3-D Secure outcome block, present once authentication concluded
    #[serde(rename = "3DSecure")]
    pub three_d_secure: Option<ThreeDSecureBlock>,
    /// Access-control server URL (3-D Secure redirect/challenge pending)
    pub acs_url: Option<String>,
    /// v1 payer authentication request token
    pub pa_req: Option<String>,
    /// v1 merchant data
    pub md: Option<String>,
    /// v2 challenge request payload
    pub c_req: Option<String>,
    /// v2 directory-server transaction identifier
    #[serde(rename = "dsTranId")]
    pub ds_tran_id: Option<String>,
}

impl TransactionResponse {
    /// The total amount as a currency-bound [`Amount`], when the snapshot
    /// carries both parts.
    pub fn total_amount(&self) -> Option<Amount> {
        let amounts = self.amount.as_ref()?;
        let currency = self.currency?;
        Amount::from_minor_units(currency, amounts.total_amount.get_amount_as_i64()).ok()
    }

    /// The full state snapshot: transaction state plus 3-D Secure state.
    pub fn state(&self) -> StateSnapshot {
        resolve::snapshot_from_parts(resolve::Secure3dParts {
            status: self.status,
            block_status: self.three_d_secure.map(|block| block.status),
            top_level_secure3d_status: None,
            acs_url: self.acs_url.as_deref(),
            pa_req: self.pa_req.as_deref(),
            md: self.md.as_deref(),
            c_req: self.c_req.as_deref(),
            ds_tran_id: self.ds_tran_id.as_deref(),
            pa_res: None,
            c_res: None,
            three_ds_session_data: None,
        })
    }

    /// The 3-D Secure state alone.
    pub fn secure3d_state(&self) -> Secure3dState {
        self.state().secure3d
    }

    /// The v2 challenge details, when the snapshot is pending one.
    pub fn secure3d_v2_challenge(&self) -> Option<Secure3dv2Challenge> {
        match self.state().secure3d {
            Secure3dState::V2Challenge {
                acs_url,
                c_req,
                ds_tran_id,
            } => Some(Secure3dv2Challenge {
                transaction_id: Some(self.transaction_id.clone()),
                acs_url,
                c_req,
                ds_tran_id,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_case_insensitive_and_canonical() {
        let parsed: TransactionStatus = serde_json::from_str("\"ok\"").unwrap();
        assert_eq!(parsed, TransactionStatus::Ok);

        let parsed: TransactionStatus = serde_json::from_str("\"3dauth\"").unwrap();
        assert_eq!(parsed, TransactionStatus::ThreeDAuth);
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"3DAuth\"");

        let parsed: TransactionStatus = serde_json::from_str("\"NOTAUTHED\"").unwrap();
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"NotAuthed\"");
    }

    #[test]
    fn total_amount_combines_currency_and_minor_units() {
        let body = serde_json::json!({
            "transactionId": "T1",
            "transactionType": "Payment",
            "status": "Ok",
            "amount": {"totalAmount": 2599, "saleAmount": 2599, "surchargeAmount": 0},
            "currency": "GBP"
        });
        let response: TransactionResponse = serde_json::from_value(body).unwrap();
        let amount = response.total_amount().unwrap();
        assert_eq!(amount.to_major_units(), "25.99");
        assert_eq!(amount.currency(), Currency::GBP);
    }
}

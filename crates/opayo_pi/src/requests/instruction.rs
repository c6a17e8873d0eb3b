//! Post-authorization instructions: void, abort, release.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
    auth::{Authentication, RequestAuth},
    errors::{BuildError, CustomResult, UnknownOptionValue},
    request::RequestContent,
    requests::{parse_option, ApiRequest},
    types::{Amount, MinorUnit},
};

/// The closed set of instructions a transaction accepts.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum InstructionType {
    /// Cancel a settled-today transaction before it is sent to the bank.
    Void,
    /// Cancel a deferred authorization without taking funds.
    Abort,
    /// Settle a deferred authorization.
    Release,
}

impl InstructionType {
    /// Look up by name, rejecting values outside the closed set.
    pub fn from_name(value: &str) -> CustomResult<Self, UnknownOptionValue> {
        parse_option("instructionType", value)
    }
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InstructionBody {
    instruction_type: InstructionType,
    amount: Option<MinorUnit>,
}

/// `POST /transactions/{transactionId}/instructions`.
#[derive(Debug)]
pub struct CreateInstruction<'a> {
    authentication: &'a Authentication,
    transaction_id: String,
    instruction_type: InstructionType,
    amount: Option<Amount>,
}

impl<'a> CreateInstruction<'a> {
    /// Void a transaction settled in the current batch.
    pub fn void(authentication: &'a Authentication, transaction_id: impl Into<String>) -> Self {
        Self {
            authentication,
            transaction_id: transaction_id.into(),
            instruction_type: InstructionType::Void,
            amount: None,
        }
    }

    /// Abort a deferred authorization.
    pub fn abort(authentication: &'a Authentication, transaction_id: impl Into<String>) -> Self {
        Self {
            authentication,
            transaction_id: transaction_id.into(),
            instruction_type: InstructionType::Abort,
            amount: None,
        }
    }

    /// Release a deferred authorization for `amount` (at most the amount
    /// originally authorized).
    pub fn release(
        authentication: &'a Authentication,
        transaction_id: impl Into<String>,
        amount: Amount,
    ) -> Self {
        Self {
            authentication,
            transaction_id: transaction_id.into(),
            instruction_type: InstructionType::Release,
            amount: Some(amount),
        }
    }

    /// Which instruction this request posts.
    pub fn instruction_type(&self) -> InstructionType {
        self.instruction_type
    }
}

impl ApiRequest for CreateInstruction<'_> {
    fn resource_segments(&self) -> Vec<String> {
        vec![
            "transactions".to_string(),
            self.transaction_id.clone(),
            "instructions".to_string(),
        ]
    }

    fn auth(&self) -> RequestAuth<'_> {
        RequestAuth::Basic(self.authentication)
    }

    fn request_content(&self) -> CustomResult<Option<RequestContent>, BuildError> {
        RequestContent::json(&InstructionBody {
            instruction_type: self.instruction_type,
            amount: self.amount.map(|amount| amount.minor_units()),
        })
        .map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instruction_names_are_lowercase_on_the_wire() {
        assert_eq!(
            serde_json::to_string(&InstructionType::Void).unwrap(),
            "\"void\""
        );
        assert_eq!(
            InstructionType::from_name("release").unwrap(),
            InstructionType::Release
        );
    }

    #[test]
    fn unknown_instruction_is_rejected_with_the_allowed_set() {
        let err = InstructionType::from_name("cancel").unwrap_err();
        assert_eq!(err.current_context().allowed, &["void", "abort", "release"]);
    }
}

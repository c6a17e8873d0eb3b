//! Instruction receipts from the post-authorization endpoints.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use time::OffsetDateTime;

use crate::requests::InstructionType;

/// Receipt for a void, abort or release posted against a transaction.
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructionResponse {
    /// Which instruction the gateway accepted
    pub instruction_type: InstructionType,
    /// When the gateway recorded it
    #[serde(with = "crate::date_time::canonical_option", default)]
    pub date: Option<OffsetDateTime>,
}

//! Typed response variants.
//!
//! Every shape the gateway answers with lives here; the
//! [`classify`](crate::classify) module is the sole construction point for
//! the variants so shape detection stays in one place.

pub mod card_identifier;
pub mod error;
pub mod instruction;
pub mod secure3d;
pub mod session_key;
pub mod transaction;

pub use card_identifier::CardIdentifierResponse;
pub use error::{Error, ErrorCode, ErrorCollection};
pub use instruction::InstructionResponse;
pub use secure3d::{
    Secure3dRedirect, Secure3dResponse, Secure3dStatus, Secure3dv2Challenge, ThreeDSecureBlock,
};
pub use session_key::SessionKeyResponse;
pub use transaction::{
    CardSummary, PaymentMethod, TransactionAmounts, TransactionResponse, TransactionStatus,
    TransactionType,
};

#![forbid(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

//!
//! Client-side message library for the Opayo (Sage Pay) Pi REST API.
//!
//! The library constructs well-formed, validated request messages and
//! parses the gateway's heterogeneous JSON / form-encoded responses into
//! typed result objects. It performs no network I/O: request builders
//! produce [`request::Request`] descriptors for an external transport, and
//! the transport's raw responses feed [`classify::classify`].
//!
//! Everything is purely functional and stateless per call; the only
//! process-wide state is the read-only legacy error-code table, loaded
//! lazily once.
//!

#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/", "README.md"))]

pub mod auth;
pub mod classify;
pub mod consts;
pub mod currency;
pub mod date_time;
pub mod endpoint;
pub mod error_codes;
pub mod errors;
pub mod ext_traits;
pub mod request;
pub mod requests;
pub mod resolve;
pub mod responses;
pub mod types;

pub use auth::Authentication;
pub use classify::{classify, classify_response, HttpResponse, ResponseVariant};
pub use currency::Currency;
pub use endpoint::{Endpoint, Environment};
pub use requests::ApiRequest;
pub use resolve::{resolve, Secure3dState, StateSnapshot, TransactionState};
pub use types::{Amount, MinorUnit};

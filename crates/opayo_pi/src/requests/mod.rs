//! Outbound request builders.
//!
//! One builder per gateway endpoint. Builders are immutable value objects:
//! `with_*` modifiers consume the builder and return a new instance, and
//! every enumerated option is validated against its closed set at the point
//! of assignment, before any network call can happen.

use error_stack::report;
use std::str::FromStr;

use crate::{
    auth::RequestAuth,
    consts::headers,
    endpoint::Endpoint,
    errors::{BuildError, CustomResult, UnknownOptionValue},
    request::{Method, Request, RequestBuilder, RequestContent},
};

pub mod card_identifier;
pub mod instruction;
pub mod payment;
pub mod secure3d;
pub mod session_key;
pub mod transaction;

pub use card_identifier::{CardDetails, CreateCardIdentifier};
pub use instruction::{CreateInstruction, InstructionType};
pub use payment::{
    Address, Apply3dSecure, ApplyAvsCvcCheck, CardRequest, ChallengeWindowSize, CreatePayment,
    CreateRefund, CreateRepeatPayment, EntryMethod, PaymentMethodRequest, RecurringIndicator,
    ScaRequest, ShippingDetails,
};
pub use secure3d::{CreateSecure3d, CreateSecure3dv2Challenge};
pub use session_key::{CreateSessionKey, FetchSessionKey};
pub use transaction::FetchTransaction;

/// A message this library knows how to turn into a transport-ready
/// [`Request`] descriptor.
pub trait ApiRequest {
    /// HTTP method of the endpoint.
    fn method(&self) -> Method {
        Method::Post
    }

    /// Resource path segments under the API base URL, path parameters
    /// already substituted. Each segment is percent-encoded individually
    /// when the URL is assembled.
    fn resource_segments(&self) -> Vec<String>;

    /// How the endpoint authenticates.
    fn auth(&self) -> RequestAuth<'_>;

    /// The serialized body, for endpoints that take one.
    fn request_content(&self) -> CustomResult<Option<RequestContent>, BuildError> {
        Ok(None)
    }

    /// Assemble the complete request descriptor for an endpoint.
    fn build(&self, endpoint: &Endpoint) -> CustomResult<Request, BuildError> {
        let url = endpoint.url_for(&self.resource_segments())?;
        let mut builder = RequestBuilder::new().method(self.method()).url(&url);
        if let Some((name, value)) = self.auth().header() {
            builder = builder.header(&name, value);
        }
        if let Some(content) = self.request_content()? {
            builder = builder
                .header(headers::CONTENT_TYPE, content.content_type())
                .set_body(content);
        }
        let request = builder.build();
        // bodies and credential headers render masked through Debug
        tracing::debug!(gateway_request = ?request, "assembled gateway request");
        Ok(request)
    }
}

/// Look an option value up by name against its closed set, naming the
/// allowed values on rejection.
pub(crate) fn parse_option<T>(
    option: &'static str,
    value: &str,
) -> CustomResult<T, UnknownOptionValue>
where
    T: FromStr + strum::VariantNames,
{
    T::from_str(value).map_err(|_| {
        report!(UnknownOptionValue {
            option,
            value: value.to_string(),
            allowed: T::VARIANTS,
        })
    })
}

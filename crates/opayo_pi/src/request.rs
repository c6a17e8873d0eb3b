//! The outbound request descriptor handed to an external HTTP transport.
//!
//! Nothing here performs I/O. A [`Request`] is a complete description of
//! one HTTP exchange: method, URL, headers (secret-bearing values masked)
//! and an optional serialized body.

use error_stack::ResultExt;
use opayo_masking::{ExposeInterface, Maskable, SensitiveValue};
use serde::{Deserialize, Serialize};

use crate::errors::{BuildError, CustomResult};

/// Header list with per-value masking.
pub type Headers = Vec<(String, Maskable<String>)>;

/// HTTP methods the gateway endpoints use.
#[derive(
    Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    /// HTTP GET
    Get,
    /// HTTP POST
    Post,
}

/// A serialized request body. The raw text is wrapped so `Debug` on a
/// [`Request`] cannot print card data.
pub enum RequestContent {
    /// JSON body
    Json(SensitiveValue<String>),
    /// Form-urlencoded body
    FormUrlEncoded(SensitiveValue<String>),
}

impl RequestContent {
    /// Serialize a body type as JSON.
    pub fn json<T: Serialize>(body: &T) -> CustomResult<Self, BuildError> {
        serde_json::to_string(body)
            .map(|text| Self::Json(SensitiveValue::new(text)))
            .change_context(BuildError::RequestEncodingFailed)
    }

    /// The MIME type the transport should declare for this body.
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Json(_) => crate::consts::CONTENT_TYPE_JSON,
            Self::FormUrlEncoded(_) => crate::consts::CONTENT_TYPE_FORM,
        }
    }

    /// Release the serialized body text to the transport.
    pub fn into_inner(self) -> String {
        match self {
            Self::Json(inner) | Self::FormUrlEncoded(inner) => inner.expose(),
        }
    }
}

impl std::fmt::Debug for RequestContent {
    /// Formats the request body type to a string representation based on the
    /// enum variant.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Json(_) => "JsonRequestBody",
            Self::FormUrlEncoded(_) => "FormUrlEncodedRequestBody",
        })
    }
}

/// A fully assembled request descriptor.
#[derive(Debug)]
pub struct Request {
    /// Fully resolved URL including path parameters
    pub url: String,
    /// Headers, secret values masked
    pub headers: Headers,
    /// HTTP method
    pub method: Method,
    /// Serialized body, if the endpoint takes one
    pub body: Option<RequestContent>,
}

/// Builder for [`Request`].
#[derive(Debug)]
pub struct RequestBuilder {
    url: String,
    headers: Headers,
    method: Method,
    body: Option<RequestContent>,
}

impl RequestBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self {
            method: Method::Get,
            url: String::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Sets the URL for the request and returns the modified builder.
    pub fn url(mut self, url: &str) -> Self {
        self.url = url.into();
        self
    }

    /// Sets the method for the request and returns the modified builder.
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Appends one header and returns the modified builder.
    pub fn header(mut self, name: &str, value: impl Into<Maskable<String>>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Appends the provided headers and returns the modified builder.
    pub fn headers(mut self, headers: Headers) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Sets the body of the request and returns the modified builder.
    pub fn set_body(mut self, body: RequestContent) -> Self {
        self.body.replace(body);
        self
    }

    /// Builds a [`Request`] from the values stored in the builder.
    pub fn build(self) -> Request {
        Request {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//! Merchant session key endpoints.

use serde::Serialize;

use crate::{
    auth::{Authentication, RequestAuth},
    errors::{BuildError, CustomResult},
    request::{Method, RequestContent},
    requests::ApiRequest,
};

/// `POST /merchant-session-keys` — mint a short-lived tokenization key.
#[derive(Debug)]
pub struct CreateSessionKey<'a> {
    authentication: &'a Authentication,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionKeyBody<'a> {
    vendor_name: &'a str,
}

impl<'a> CreateSessionKey<'a> {
    /// A session-key request for this merchant.
    pub fn new(authentication: &'a Authentication) -> Self {
        Self { authentication }
    }
}

impl ApiRequest for CreateSessionKey<'_> {
    fn resource_segments(&self) -> Vec<String> {
        vec!["merchant-session-keys".to_string()]
    }

    fn auth(&self) -> RequestAuth<'_> {
        RequestAuth::Basic(self.authentication)
    }

    fn request_content(&self) -> CustomResult<Option<RequestContent>, BuildError> {
        RequestContent::json(&SessionKeyBody {
            vendor_name: self.authentication.vendor_name(),
        })
        .map(Some)
    }
}

/// `GET /merchant-session-keys/{key}` — check whether a key is still valid.
#[derive(Debug)]
pub struct FetchSessionKey<'a> {
    authentication: &'a Authentication,
    session_key: String,
}

impl<'a> FetchSessionKey<'a> {
    /// A fetch for the given session key.
    pub fn new(authentication: &'a Authentication, session_key: impl Into<String>) -> Self {
        Self {
            authentication,
            session_key: session_key.into(),
        }
    }
}

impl ApiRequest for FetchSessionKey<'_> {
    fn method(&self) -> Method {
        Method::Get
    }

    fn resource_segments(&self) -> Vec<String> {
        vec![
            "merchant-session-keys".to_string(),
            self.session_key.clone(),
        ]
    }

    fn auth(&self) -> RequestAuth<'_> {
        RequestAuth::Basic(self.authentication)
    }
}

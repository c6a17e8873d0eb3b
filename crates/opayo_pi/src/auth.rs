//! Endpoint authentication: HTTP Basic from the integration credentials,
//! Bearer from a merchant session key, or none.

use base64::Engine;
use opayo_masking::{Mask, Maskable, PeekInterface, SensitiveValue};

use crate::consts::headers;

/// The merchant's integration credentials.
///
/// Key and password are wrapped in [`SensitiveValue`] so they cannot be
/// cloned or logged; requests borrow the credentials and derive the header
/// value on demand.
#[derive(Debug)]
pub struct Authentication {
    vendor_name: String,
    integration_key: SensitiveValue<String>,
    integration_password: SensitiveValue<String>,
}

impl Authentication {
    /// Bundle the vendor name with its integration key and password.
    pub fn new(
        vendor_name: impl Into<String>,
        integration_key: SensitiveValue<String>,
        integration_password: SensitiveValue<String>,
    ) -> Self {
        Self {
            vendor_name: vendor_name.into(),
            integration_key,
            integration_password,
        }
    }

    /// The vendor name sent in session-key requests.
    pub fn vendor_name(&self) -> &str {
        &self.vendor_name
    }

    fn basic_header_value(&self) -> Maskable<String> {
        let credentials = format!(
            "{}:{}",
            self.integration_key.peek(),
            self.integration_password.peek()
        );
        let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);
        format!("Basic {encoded}").into_masked()
    }
}

/// How a request authenticates against its endpoint.
#[derive(Debug)]
pub enum RequestAuth<'a> {
    /// HTTP Basic from the integration key and password.
    Basic(&'a Authentication),
    /// Bearer from a merchant session key (tokenization endpoints).
    Bearer(&'a str),
    /// Anonymous.
    None,
}

impl RequestAuth<'_> {
    /// The `Authorization` header for this scheme, if one is needed.
    pub fn header(&self) -> Option<(String, Maskable<String>)> {
        match self {
            Self::Basic(authentication) => Some((
                headers::AUTHORIZATION.to_string(),
                authentication.basic_header_value(),
            )),
            Self::Bearer(session_key) => Some((
                headers::AUTHORIZATION.to_string(),
                format!("Bearer {session_key}").into_masked(),
            )),
            Self::None => None,
        }
    }
}

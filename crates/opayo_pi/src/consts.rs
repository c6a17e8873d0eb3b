//! Commonly used constants

/// Base URL of the live gateway.
pub const LIVE_BASE_URL: &str = "https://pi-live.sagepay.com/api/v1";

/// Base URL of the test gateway.
pub const TEST_BASE_URL: &str = "https://pi-test.sagepay.com/api/v1";

/// Content type of JSON request bodies and most responses.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Content type of v1 ACS notification callbacks.
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

pub(crate) mod headers {
    pub(crate) const AUTHORIZATION: &str = "Authorization";
    pub(crate) const CONTENT_TYPE: &str = "Content-Type";
}
